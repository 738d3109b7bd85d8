use serde::{Deserialize, Serialize};

use crate::shared::metadata::ValidationErrors;

/// Products an API user is allowed to sell.
///
/// Written with `POST /api/api-users/:id/products`, which replaces the
/// whole set, so repeating the same request leaves the same state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiUserProducts {
    pub api_user_id: String,
    #[serde(default)]
    pub product_ids: Vec<String>,
}

impl ApiUserProducts {
    /// Sorted, deduplicated, without blanks
    pub fn normalized(mut self) -> Self {
        self.product_ids.retain(|id| !id.trim().is_empty());
        self.product_ids.sort();
        self.product_ids.dedup();
        self
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.api_user_id.trim().is_empty() {
            errors.add("api_user_id", "API user is required");
        }
        errors.into_result()
    }

    pub fn contains(&self, product_id: &str) -> bool {
        self.product_ids.iter().any(|id| id == product_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized() {
        let set = ApiUserProducts {
            api_user_id: "u-1".into(),
            product_ids: vec!["p2".into(), "".into(), "p1".into(), "p2".into()],
        }
        .normalized();
        assert_eq!(set.product_ids, vec!["p1".to_string(), "p2".to_string()]);
        assert!(set.contains("p1"));
        assert!(set.validate().is_ok());
    }
}
