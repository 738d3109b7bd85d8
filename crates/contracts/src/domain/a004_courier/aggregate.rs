use serde::{Deserialize, Serialize};

use crate::domain::common::AggregateRoot;
use crate::shared::metadata::{ValidationErrors, ValidationRules};
use crate::system::routes::{ScreenRoute, COURIERS};

pub const NAME_RULES: ValidationRules = ValidationRules::required().with_max_length(80);
pub const CODE_RULES: ValidationRules = ValidationRules::required().with_max_length(20);
pub const TRACKING_URL_RULES: ValidationRules = ValidationRules::none().with_max_length(250);

/// Courier company delivering policy documents
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Courier {
    pub name: String,
    pub code: String,
    /// Tracking link template, e.g. `https://track.example/{tracking_no}`
    #[serde(default)]
    pub tracking_url: Option<String>,
    #[serde(default)]
    pub is_active: bool,
}

impl AggregateRoot for Courier {
    fn aggregate_index() -> &'static str {
        "a004"
    }

    fn collection_name() -> &'static str {
        "couriers"
    }

    fn element_name() -> &'static str {
        "Courier"
    }

    fn list_name() -> &'static str {
        "Couriers"
    }

    fn route() -> &'static ScreenRoute {
        &COURIERS
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check("name", NAME_RULES.validate_string(&self.name, "Name"));
        errors.check("code", CODE_RULES.validate_string(&self.code, "Code"));
        errors.check(
            "tracking_url",
            TRACKING_URL_RULES.validate_optional(self.tracking_url.as_deref(), "Tracking URL"),
        );
        if let Some(url) = self.tracking_url.as_deref().map(str::trim) {
            if !url.is_empty() && !url.starts_with("http://") && !url.starts_with("https://") {
                errors.add("tracking_url", "Tracking URL must start with http:// or https://");
            }
        }
        errors.into_result()
    }

    fn unique_keys(&self) -> Vec<(&'static str, String)> {
        vec![("code", self.code.trim().to_uppercase())]
    }
}
