use serde::{Deserialize, Serialize};

use crate::domain::common::AggregateRoot;
use crate::shared::metadata::{ValidationErrors, ValidationRules};
use crate::system::routes::{ScreenRoute, CALL_US};

pub const NAME_RULES: ValidationRules = ValidationRules::required().with_max_length(100);
pub const PHONE_RULES: ValidationRules = ValidationRules::required()
    .with_min_length(7)
    .with_max_length(15);
pub const TOPIC_RULES: ValidationRules = ValidationRules::required().with_max_length(120);
pub const NOTE_RULES: ValidationRules = ValidationRules::none().with_max_length(1000);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallUsStatus {
    #[default]
    Pending,
    Contacted,
    Closed,
}

impl CallUsStatus {
    pub const ALL: [CallUsStatus; 3] = [
        CallUsStatus::Pending,
        CallUsStatus::Contacted,
        CallUsStatus::Closed,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            CallUsStatus::Pending => "pending",
            CallUsStatus::Contacted => "contacted",
            CallUsStatus::Closed => "closed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CallUsStatus::Pending => "Pending",
            CallUsStatus::Contacted => "Contacted",
            CallUsStatus::Closed => "Closed",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.code() == code)
    }
}

/// Body of `POST /api/call-us/:id/status`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallUsStatusChange {
    pub status: CallUsStatus,
}

/// Query of `GET /api/call-us`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CallUsQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<CallUsStatus>,
}

/// Call-back request left by a visitor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CallUsRequest {
    pub name: String,
    pub phone: String,
    pub topic: String,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub status: CallUsStatus,
}

impl AggregateRoot for CallUsRequest {
    fn aggregate_index() -> &'static str {
        "a010"
    }

    fn collection_name() -> &'static str {
        "call-us"
    }

    fn element_name() -> &'static str {
        "Call-us Request"
    }

    fn list_name() -> &'static str {
        "Call-us Requests"
    }

    fn route() -> &'static ScreenRoute {
        &CALL_US
    }

    fn label(&self) -> String {
        format!("{} ({})", self.name, self.topic)
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check("name", NAME_RULES.validate_string(&self.name, "Name"));
        errors.check("phone", PHONE_RULES.validate_string(&self.phone, "Phone"));
        errors.check("topic", TOPIC_RULES.validate_string(&self.topic, "Topic"));
        errors.check(
            "note",
            NOTE_RULES.validate_optional(self.note.as_deref(), "Note"),
        );
        errors.into_result()
    }

    fn preserve_on_update(&mut self, stored: &Self) {
        self.status = stored.status;
    }
}
