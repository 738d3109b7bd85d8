use serde::{Deserialize, Serialize};

use crate::domain::common::{AggregateRoot, Reference};
use crate::shared::metadata::{ValidationErrors, ValidationRules};
use crate::system::routes::{ScreenRoute, MOTOR_QUOTES};

pub const CUSTOMER_RULES: ValidationRules = ValidationRules::required().with_max_length(100);
pub const VEHICLE_RULES: ValidationRules = ValidationRules::required().with_max_length(50);
pub const YEAR_RULES: ValidationRules = ValidationRules::required().with_range(1980.0, 2100.0);
pub const SUM_INSURED_RULES: ValidationRules = ValidationRules::required()
    .with_min(1.0)
    .with_error("Sum insured must be greater than 0");

/// Status of a motor quote. Only a pending quote can change status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStatus {
    #[default]
    Pending,
    Approved,
    Cancelled,
}

impl QuoteStatus {
    pub const ALL: [QuoteStatus; 3] = [
        QuoteStatus::Pending,
        QuoteStatus::Approved,
        QuoteStatus::Cancelled,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            QuoteStatus::Pending => "pending",
            QuoteStatus::Approved => "approved",
            QuoteStatus::Cancelled => "cancelled",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            QuoteStatus::Pending => "Pending",
            QuoteStatus::Approved => "Approved",
            QuoteStatus::Cancelled => "Cancelled",
        }
    }

    /// Statuses reachable from this one, in menu order
    pub fn transitions(&self) -> &'static [QuoteStatus] {
        match self {
            QuoteStatus::Pending => &[QuoteStatus::Cancelled, QuoteStatus::Approved],
            QuoteStatus::Approved | QuoteStatus::Cancelled => &[],
        }
    }

    pub fn is_locked(&self) -> bool {
        self.transitions().is_empty()
    }

    pub fn can_transition_to(&self, next: QuoteStatus) -> bool {
        self.transitions().contains(&next)
    }
}

/// Body of `POST /api/motor-quotes/:id/status`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteStatusChange {
    pub status: QuoteStatus,
}

/// Motor insurance quote requested by a customer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MotorQuote {
    pub customer_name: String,
    pub vehicle_make: String,
    pub vehicle_model: String,
    pub vehicle_year: i64,
    pub sum_insured: f64,
    #[serde(default)]
    pub branch_id: Option<String>,
    #[serde(default)]
    pub status: QuoteStatus,
}

impl AggregateRoot for MotorQuote {
    fn aggregate_index() -> &'static str {
        "a008"
    }

    fn collection_name() -> &'static str {
        "motor-quotes"
    }

    fn element_name() -> &'static str {
        "Motor Quote"
    }

    fn list_name() -> &'static str {
        "Motor Quotes"
    }

    fn route() -> &'static ScreenRoute {
        &MOTOR_QUOTES
    }

    fn label(&self) -> String {
        format!(
            "{} - {} {} {}",
            self.customer_name, self.vehicle_make, self.vehicle_model, self.vehicle_year
        )
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check(
            "customer_name",
            CUSTOMER_RULES.validate_string(&self.customer_name, "Customer name"),
        );
        errors.check(
            "vehicle_make",
            VEHICLE_RULES.validate_string(&self.vehicle_make, "Make"),
        );
        errors.check(
            "vehicle_model",
            VEHICLE_RULES.validate_string(&self.vehicle_model, "Model"),
        );
        errors.check(
            "vehicle_year",
            YEAR_RULES.validate_number(self.vehicle_year as f64, "Year"),
        );
        errors.check(
            "sum_insured",
            SUM_INSURED_RULES.validate_number(self.sum_insured, "Sum insured"),
        );
        errors.into_result()
    }

    fn references(&self) -> Vec<Reference> {
        self.branch_id
            .iter()
            .filter(|id| !id.trim().is_empty())
            .map(|id| Reference::new("branches", "branch_id", "Branch", id))
            .collect()
    }

    /// Status only changes through the status endpoint.
    fn preserve_on_update(&mut self, stored: &Self) {
        self.status = stored.status;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_offers_cancel_and_approve() {
        assert_eq!(
            QuoteStatus::Pending.transitions(),
            &[QuoteStatus::Cancelled, QuoteStatus::Approved]
        );
        assert!(QuoteStatus::Pending.can_transition_to(QuoteStatus::Approved));
        assert!(!QuoteStatus::Pending.is_locked());
    }

    #[test]
    fn test_final_statuses_are_locked() {
        for status in [QuoteStatus::Approved, QuoteStatus::Cancelled] {
            assert!(status.is_locked());
            assert!(!status.can_transition_to(QuoteStatus::Pending));
        }
    }

    #[test]
    fn test_update_keeps_stored_status() {
        let stored = MotorQuote {
            status: QuoteStatus::Approved,
            ..Default::default()
        };
        let mut incoming = MotorQuote::default();
        incoming.preserve_on_update(&stored);
        assert_eq!(incoming.status, QuoteStatus::Approved);
    }

    #[test]
    fn test_status_wire_format() {
        let json = serde_json::to_string(&QuoteStatusChange {
            status: QuoteStatus::Cancelled,
        })
        .unwrap();
        assert_eq!(json, r#"{"status":"cancelled"}"#);
    }
}
