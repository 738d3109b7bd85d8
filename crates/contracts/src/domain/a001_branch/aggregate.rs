use serde::{Deserialize, Serialize};

use crate::domain::common::AggregateRoot;
use crate::shared::metadata::{ValidationErrors, ValidationRules};
use crate::system::routes::{ScreenRoute, BRANCHES};

pub const NAME_RULES: ValidationRules = ValidationRules::required().with_max_length(100);
/// IGIS and Takaful codes are both fixed-width branch codes
pub const BRANCH_CODE_RULES: ValidationRules = ValidationRules::required().with_exact_length(8);
pub const CITY_RULES: ValidationRules = ValidationRules::required().with_max_length(60);
pub const PHONE_RULES: ValidationRules = ValidationRules::required()
    .with_min_length(7)
    .with_max_length(15);
pub const MONTHLY_TARGET_RULES: ValidationRules = ValidationRules::required().with_min(0.0);
pub const MAX_AGENTS_RULES: ValidationRules = ValidationRules::required().with_min(1.0);

/// Branch of the brokerage
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    pub name: String,
    pub igis_code: String,
    pub takaful_code: String,
    pub city: String,
    pub phone: String,
    pub monthly_target: f64,
    pub max_agents: i64,
    #[serde(default)]
    pub manager_user_id: Option<String>,
}

impl AggregateRoot for Branch {
    fn aggregate_index() -> &'static str {
        "a001"
    }

    fn collection_name() -> &'static str {
        "branches"
    }

    fn element_name() -> &'static str {
        "Branch"
    }

    fn list_name() -> &'static str {
        "Branches"
    }

    fn route() -> &'static ScreenRoute {
        &BRANCHES
    }

    fn label(&self) -> String {
        format!("{} ({})", self.name, self.city)
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check("name", NAME_RULES.validate_string(&self.name, "Name"));
        errors.check(
            "igis_code",
            BRANCH_CODE_RULES.validate_string(&self.igis_code, "IGIS code"),
        );
        errors.check(
            "takaful_code",
            BRANCH_CODE_RULES.validate_string(&self.takaful_code, "Takaful code"),
        );
        errors.check("city", CITY_RULES.validate_string(&self.city, "City"));
        errors.check("phone", PHONE_RULES.validate_string(&self.phone, "Phone"));
        errors.check(
            "monthly_target",
            MONTHLY_TARGET_RULES.validate_number(self.monthly_target, "Monthly target"),
        );
        errors.check(
            "max_agents",
            MAX_AGENTS_RULES.validate_number(self.max_agents as f64, "Max agents"),
        );
        errors.into_result()
    }

    fn unique_keys(&self) -> Vec<(&'static str, String)> {
        vec![
            ("igis_code", self.igis_code.trim().to_string()),
            ("takaful_code", self.takaful_code.trim().to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn branch() -> Branch {
        Branch {
            name: "Gulberg".into(),
            igis_code: "IGIS0001".into(),
            takaful_code: "TKFL0001".into(),
            city: "Lahore".into(),
            phone: "0421234567".into(),
            monthly_target: 250000.0,
            max_agents: 12,
            manager_user_id: None,
        }
    }

    #[test]
    fn test_valid_branch() {
        assert!(branch().validate().is_ok());
    }

    #[test]
    fn test_codes_must_be_eight_characters() {
        let mut b = branch();
        b.takaful_code = "TK1".into();
        b.max_agents = 0;
        let errors = b.validate().unwrap_err();
        assert_eq!(
            errors.get("takaful_code"),
            Some("Takaful code must be exactly 8 characters")
        );
        assert_eq!(errors.get("max_agents"), Some("Max agents must be at least 1"));
        assert_eq!(errors.first_field(), Some("takaful_code"));
    }
}
