pub mod model;
pub mod view;

pub use model::{apply, filter_options, Column, TableState, Tabular};
pub use view::DataTable;
