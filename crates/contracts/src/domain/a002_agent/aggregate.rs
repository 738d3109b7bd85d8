use serde::{Deserialize, Serialize};

use crate::domain::common::{AggregateRoot, Reference};
use crate::shared::metadata::{ValidationErrors, ValidationRules};
use crate::system::routes::{ScreenRoute, AGENTS};

pub const FULL_NAME_RULES: ValidationRules = ValidationRules::required().with_max_length(100);
pub const EMAIL_RULES: ValidationRules = ValidationRules::required().with_max_length(120);
pub const PHONE_RULES: ValidationRules = ValidationRules::required()
    .with_min_length(7)
    .with_max_length(15);
pub const BRANCH_RULES: ValidationRules = ValidationRules::required();
pub const COMMISSION_RULES: ValidationRules = ValidationRules::required().with_range(0.0, 100.0);
pub const AFFILIATE_ID_RULES: ValidationRules = ValidationRules::required()
    .with_min(1.0)
    .with_error("Affiliate ID must be a positive number");

/// Sales agent attached to a branch
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub branch_id: String,
    pub commission_rate: f64,
    #[serde(default)]
    pub is_affiliate: bool,
    /// Present only for affiliates
    #[serde(default)]
    pub affiliate_id: Option<i64>,
}

impl AggregateRoot for Agent {
    fn aggregate_index() -> &'static str {
        "a002"
    }

    fn collection_name() -> &'static str {
        "agents"
    }

    fn element_name() -> &'static str {
        "Agent"
    }

    fn list_name() -> &'static str {
        "Agents"
    }

    fn route() -> &'static ScreenRoute {
        &AGENTS
    }

    fn label(&self) -> String {
        self.full_name.clone()
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check(
            "full_name",
            FULL_NAME_RULES.validate_string(&self.full_name, "Full name"),
        );
        errors.check("email", EMAIL_RULES.validate_string(&self.email, "Email"));
        if !self.email.trim().is_empty() && !self.email.contains('@') {
            errors.add("email", "Email is not valid");
        }
        errors.check("phone", PHONE_RULES.validate_string(&self.phone, "Phone"));
        errors.check("branch_id", BRANCH_RULES.validate_string(&self.branch_id, "Branch"));
        errors.check(
            "commission_rate",
            COMMISSION_RULES.validate_number(self.commission_rate, "Commission rate"),
        );
        match (self.is_affiliate, self.affiliate_id) {
            (true, Some(id)) => errors.check(
                "affiliate_id",
                AFFILIATE_ID_RULES.validate_number(id as f64, "Affiliate ID"),
            ),
            (true, None) => errors.add("affiliate_id", "Affiliate ID is required"),
            (false, Some(_)) => {
                errors.add("affiliate_id", "Affiliate ID is only allowed for affiliates")
            }
            (false, None) => {}
        }
        errors.into_result()
    }

    fn unique_keys(&self) -> Vec<(&'static str, String)> {
        vec![("email", self.email.trim().to_lowercase())]
    }

    fn references(&self) -> Vec<Reference> {
        vec![Reference::new("branches", "branch_id", "Branch", &self.branch_id)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agent() -> Agent {
        Agent {
            full_name: "Sara Khan".into(),
            email: "sara@broker.pk".into(),
            phone: "03001234567".into(),
            branch_id: "b-1".into(),
            commission_rate: 7.5,
            is_affiliate: false,
            affiliate_id: None,
        }
    }

    #[test]
    fn test_affiliate_id_follows_flag() {
        let mut a = agent();
        assert!(a.validate().is_ok());

        a.is_affiliate = true;
        assert_eq!(
            a.validate().unwrap_err().get("affiliate_id"),
            Some("Affiliate ID is required")
        );

        a.affiliate_id = Some(0);
        assert_eq!(
            a.validate().unwrap_err().get("affiliate_id"),
            Some("Affiliate ID must be a positive number")
        );

        a.affiliate_id = Some(42);
        assert!(a.validate().is_ok());

        a.is_affiliate = false;
        assert!(a.validate().is_err());
    }

    #[test]
    fn test_commission_range_and_reference() {
        let mut a = agent();
        a.commission_rate = 101.0;
        assert!(a.validate().unwrap_err().get("commission_rate").is_some());
        assert_eq!(a.references()[0].collection, "branches");
    }
}
