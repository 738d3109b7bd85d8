mod dashboard;

pub use dashboard::{summary_query, OverviewDashboard};
