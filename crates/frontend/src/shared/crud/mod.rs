//! Guarded list and form screens shared by every record module.

pub mod form;
pub mod list;
pub mod traits;

pub use form::{record_form_page, FormMode, LookupSet};
pub use list::{list_query, record_list_page, record_list_page_with, ConfirmDelete, ListOptions};
pub use traits::{mutation_plan, or_dash, ListRow, ResourceScreen, DASHBOARD_RESOURCE};
