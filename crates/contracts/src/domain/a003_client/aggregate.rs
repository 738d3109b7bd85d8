use serde::{Deserialize, Serialize};

use crate::domain::common::{AggregateRoot, Reference};
use crate::shared::metadata::{ValidationErrors, ValidationRules};
use crate::system::routes::{ScreenRoute, CLIENTS};
use crate::system::users::validate_email;

pub const FULL_NAME_RULES: ValidationRules = ValidationRules::required().with_max_length(100);
pub const CNIC_RULES: ValidationRules = ValidationRules::required()
    .with_exact_length(13)
    .digits()
    .with_error("CNIC must be 13 digits without dashes");
pub const PHONE_RULES: ValidationRules = ValidationRules::required()
    .with_min_length(7)
    .with_max_length(15);
pub const ADDRESS_RULES: ValidationRules = ValidationRules::none().with_max_length(250);

/// Policy holder registered at a branch
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub full_name: String,
    pub cnic: String,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    pub branch_id: String,
    #[serde(default)]
    pub address: Option<String>,
}

impl AggregateRoot for Client {
    fn aggregate_index() -> &'static str {
        "a003"
    }

    fn collection_name() -> &'static str {
        "clients"
    }

    fn element_name() -> &'static str {
        "Client"
    }

    fn list_name() -> &'static str {
        "Clients"
    }

    fn route() -> &'static ScreenRoute {
        &CLIENTS
    }

    fn label(&self) -> String {
        format!("{} ({})", self.full_name, self.cnic)
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check(
            "full_name",
            FULL_NAME_RULES.validate_string(&self.full_name, "Full name"),
        );
        errors.check("cnic", CNIC_RULES.validate_string(&self.cnic, "CNIC"));
        errors.check("phone", PHONE_RULES.validate_string(&self.phone, "Phone"));
        errors.check("email", validate_email(self.email.as_deref()));
        if self.branch_id.trim().is_empty() {
            errors.add("branch_id", "Branch is required");
        }
        errors.check(
            "address",
            ADDRESS_RULES.validate_optional(self.address.as_deref(), "Address"),
        );
        errors.into_result()
    }

    fn unique_keys(&self) -> Vec<(&'static str, String)> {
        vec![("cnic", self.cnic.trim().to_string())]
    }

    fn references(&self) -> Vec<Reference> {
        vec![Reference::new("branches", "branch_id", "Branch", &self.branch_id)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cnic_digits() {
        let mut client = Client {
            full_name: "Ali Raza".into(),
            cnic: "3520212345671".into(),
            phone: "03211234567".into(),
            branch_id: "b-1".into(),
            ..Default::default()
        };
        assert!(client.validate().is_ok());

        client.cnic = "35202-1234567-1".into();
        assert_eq!(
            client.validate().unwrap_err().get("cnic"),
            Some("CNIC must be 13 digits without dashes")
        );
    }
}
