use serde::{Deserialize, Serialize};

use crate::domain::common::AggregateRoot;
use crate::shared::metadata::{ValidationErrors, ValidationRules};
use crate::system::routes::{ScreenRoute, PRODUCTS};

pub const NAME_RULES: ValidationRules = ValidationRules::required().with_max_length(100);
pub const CODE_RULES: ValidationRules = ValidationRules::required().with_max_length(20);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductCategory {
    #[default]
    Motor,
    Health,
    Life,
    Travel,
    Home,
}

impl ProductCategory {
    pub const ALL: [ProductCategory; 5] = [
        ProductCategory::Motor,
        ProductCategory::Health,
        ProductCategory::Life,
        ProductCategory::Travel,
        ProductCategory::Home,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            ProductCategory::Motor => "motor",
            ProductCategory::Health => "health",
            ProductCategory::Life => "life",
            ProductCategory::Travel => "travel",
            ProductCategory::Home => "home",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProductCategory::Motor => "Motor",
            ProductCategory::Health => "Health",
            ProductCategory::Life => "Life",
            ProductCategory::Travel => "Travel",
            ProductCategory::Home => "Home",
        }
    }
}

/// Insurance product sold by the brokerage
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub code: String,
    pub category: ProductCategory,
    #[serde(default)]
    pub is_active: bool,
}

impl AggregateRoot for Product {
    fn aggregate_index() -> &'static str {
        "a005"
    }

    fn collection_name() -> &'static str {
        "products"
    }

    fn element_name() -> &'static str {
        "Product"
    }

    fn list_name() -> &'static str {
        "Products"
    }

    fn route() -> &'static ScreenRoute {
        &PRODUCTS
    }

    fn label(&self) -> String {
        format!("{} ({})", self.name, self.category.label())
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check("name", NAME_RULES.validate_string(&self.name, "Name"));
        errors.check("code", CODE_RULES.validate_string(&self.code, "Code"));
        errors.into_result()
    }

    fn unique_keys(&self) -> Vec<(&'static str, String)> {
        vec![("code", self.code.trim().to_uppercase())]
    }
}
