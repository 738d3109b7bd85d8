use serde::{Deserialize, Serialize};

use crate::domain::common::{AggregateRoot, Reference};
use crate::shared::metadata::{ValidationErrors, ValidationRules};
use crate::system::routes::{ScreenRoute, PLANS};

pub const NAME_RULES: ValidationRules = ValidationRules::required().with_max_length(100);
pub const PREMIUM_RULES: ValidationRules = ValidationRules::required()
    .with_min(0.01)
    .with_error("Premium must be greater than 0");
pub const DURATION_RULES: ValidationRules = ValidationRules::required().with_range(1.0, 120.0);

/// Priced plan of a product
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub product_id: String,
    pub name: String,
    pub premium: f64,
    pub duration_months: i64,
}

impl AggregateRoot for Plan {
    fn aggregate_index() -> &'static str {
        "a006"
    }

    fn collection_name() -> &'static str {
        "plans"
    }

    fn element_name() -> &'static str {
        "Plan"
    }

    fn list_name() -> &'static str {
        "Plans"
    }

    fn route() -> &'static ScreenRoute {
        &PLANS
    }

    fn label(&self) -> String {
        format!("{} ({} months)", self.name, self.duration_months)
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.product_id.trim().is_empty() {
            errors.add("product_id", "Product is required");
        }
        errors.check("name", NAME_RULES.validate_string(&self.name, "Name"));
        errors.check("premium", PREMIUM_RULES.validate_number(self.premium, "Premium"));
        errors.check(
            "duration_months",
            DURATION_RULES.validate_number(self.duration_months as f64, "Duration"),
        );
        errors.into_result()
    }

    fn references(&self) -> Vec<Reference> {
        vec![Reference::new("products", "product_id", "Product", &self.product_id)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_premium_and_duration() {
        let plan = Plan {
            product_id: "p-1".into(),
            name: "Comprehensive".into(),
            premium: 0.0,
            duration_months: 121,
        };
        let errors = plan.validate().unwrap_err();
        assert_eq!(errors.get("premium"), Some("Premium must be greater than 0"));
        assert_eq!(
            errors.get("duration_months"),
            Some("Duration must be at most 120")
        );
    }
}
