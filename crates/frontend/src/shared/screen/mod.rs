pub mod guarded;
pub mod panels;
pub mod reducer;

pub use guarded::GuardedScreen;
pub use reducer::{reduce, Dependency, ScreenInputs, ScreenState};

/// Delay before denied and not-found screens navigate away
pub const REDIRECT_DELAY_MS: u64 = 1500;

/// Where screens without a better target send the user
pub const HOME_PATH: &str = "/";
