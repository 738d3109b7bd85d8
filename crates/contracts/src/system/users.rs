use serde::{Deserialize, Serialize};

use crate::shared::metadata::{ValidationErrors, ValidationRules};

pub const USERNAME_RULES: ValidationRules = ValidationRules::required()
    .with_min_length(3)
    .with_max_length(50);
pub const PASSWORD_RULES: ValidationRules = ValidationRules::required().with_min_length(6);
pub const EMAIL_RULES: ValidationRules = ValidationRules::none().with_max_length(120);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub is_active: bool,
    pub is_admin: bool,
    pub created_at: String,
    pub updated_at: String,
    pub last_login_at: Option<String>,
    pub created_by: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateUserDto {
    pub username: String,
    pub password: String,
    pub email: Option<String>,
    pub full_name: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
}

impl CreateUserDto {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check("username", USERNAME_RULES.validate_string(&self.username, "Username"));
        errors.check("password", PASSWORD_RULES.validate_string(&self.password, "Password"));
        errors.check("email", validate_email(self.email.as_deref()));
        errors.into_result()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUserDto {
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub is_active: bool,
    pub is_admin: bool,
}

impl UpdateUserDto {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check("email", validate_email(self.email.as_deref()));
        errors.into_result()
    }
}

pub(crate) fn validate_email(email: Option<&str>) -> Result<(), String> {
    EMAIL_RULES.validate_optional(email, "Email")?;
    match email.map(str::trim) {
        Some(e) if !e.is_empty() && !e.contains('@') => Err("Email is not valid".to_string()),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_user_validation() {
        let dto = CreateUserDto {
            username: "ops".into(),
            password: "12345".into(),
            ..Default::default()
        };
        let errors = dto.validate().unwrap_err();
        assert_eq!(
            errors.get("password"),
            Some("Password must be at least 6 characters")
        );
        assert!(errors.get("username").is_none());
    }

    #[test]
    fn test_email_is_optional() {
        assert!(validate_email(None).is_ok());
        assert!(validate_email(Some("")).is_ok());
        assert!(validate_email(Some("ops@broker.pk")).is_ok());
        assert!(validate_email(Some("ops")).is_err());
    }
}
