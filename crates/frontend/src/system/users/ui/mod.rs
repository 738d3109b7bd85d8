pub mod details;
pub mod list;
pub mod rights;

pub use details::{UserAdd, UserEdit};
pub use list::UserList;
pub use rights::UserRightsEditor;
