pub mod dto;

pub use dto::{ModuleCount, OverviewResponse};
