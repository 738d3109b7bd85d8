use serde::{Deserialize, Serialize};

/// Number of stored records of one module
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleCount {
    /// Guarded route of the module, used to hide counts the user cannot view
    pub route: String,
    pub title: String,
    pub count: u64,
}

/// Response of `GET /api/dashboard/summary`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverviewResponse {
    pub modules: Vec<ModuleCount>,
    /// Motor quotes still waiting for a decision
    pub pending_quotes: u64,
    /// Call-us requests nobody has contacted yet
    pub pending_call_us: u64,
    /// Generation time, RFC 3339
    pub generated_at: String,
}
