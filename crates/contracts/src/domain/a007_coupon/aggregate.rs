use serde::{Deserialize, Serialize};

use crate::domain::common::{AggregateRoot, Reference};
use crate::shared::metadata::{parse_date, ValidationErrors, ValidationRules};
use crate::system::routes::{ScreenRoute, COUPONS};

pub const CODE_RULES: ValidationRules = ValidationRules::required()
    .with_min_length(4)
    .with_max_length(20);
pub const DISCOUNT_RULES: ValidationRules = ValidationRules::required().with_range(1.0, 100.0);
pub const MAX_USES_RULES: ValidationRules = ValidationRules::required().with_min(1.0);

/// Discount coupon, optionally restricted to one product
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Coupon {
    pub code: String,
    pub discount_percent: f64,
    /// `YYYY-MM-DD`
    pub valid_from: String,
    /// `YYYY-MM-DD`, not before `valid_from`
    pub valid_to: String,
    #[serde(default)]
    pub product_id: Option<String>,
    pub max_uses: i64,
}

impl AggregateRoot for Coupon {
    fn aggregate_index() -> &'static str {
        "a007"
    }

    fn collection_name() -> &'static str {
        "coupons"
    }

    fn element_name() -> &'static str {
        "Coupon"
    }

    fn list_name() -> &'static str {
        "Coupons"
    }

    fn route() -> &'static ScreenRoute {
        &COUPONS
    }

    fn label(&self) -> String {
        format!("{} (-{}%)", self.code, self.discount_percent)
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check("code", CODE_RULES.validate_string(&self.code, "Code"));
        errors.check(
            "discount_percent",
            DISCOUNT_RULES.validate_number(self.discount_percent, "Discount"),
        );

        let from = parse_date(&self.valid_from, "Valid from");
        let to = parse_date(&self.valid_to, "Valid to");
        match (&from, &to) {
            (Ok(from), Ok(to)) if to < from => {
                errors.add("valid_to", "Valid to must not be before Valid from")
            }
            _ => {
                errors.check("valid_from", from.map(|_| ()));
                errors.check("valid_to", to.map(|_| ()));
            }
        }

        errors.check(
            "max_uses",
            MAX_USES_RULES.validate_number(self.max_uses as f64, "Max uses"),
        );
        errors.into_result()
    }

    fn unique_keys(&self) -> Vec<(&'static str, String)> {
        vec![("code", self.code.trim().to_uppercase())]
    }

    fn references(&self) -> Vec<Reference> {
        self.product_id
            .iter()
            .filter(|id| !id.trim().is_empty())
            .map(|id| Reference::new("products", "product_id", "Product", id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coupon() -> Coupon {
        Coupon {
            code: "EID25".into(),
            discount_percent: 25.0,
            valid_from: "2026-03-01".into(),
            valid_to: "2026-03-31".into(),
            product_id: None,
            max_uses: 100,
        }
    }

    #[test]
    fn test_valid_to_not_before_valid_from() {
        let mut c = coupon();
        assert!(c.validate().is_ok());

        c.valid_to = "2026-02-28".into();
        assert_eq!(
            c.validate().unwrap_err().get("valid_to"),
            Some("Valid to must not be before Valid from")
        );
    }

    #[test]
    fn test_optional_product_reference() {
        let mut c = coupon();
        assert!(c.references().is_empty());
        c.product_id = Some("p-9".into());
        assert_eq!(c.references()[0].id, "p-9");
    }
}
