use contracts::domain::a008_motor_quote::{MotorQuote, QuoteStatus};
use contracts::domain::common::Record;

use crate::domain::common::service;
use crate::shared::error::{AppError, AppResult};

/// Check a requested status change against the quote's current status
pub fn check_transition(current: QuoteStatus, next: QuoteStatus) -> AppResult<()> {
    if current.is_locked() {
        return Err(AppError::Validation(format!(
            "Quote is {} and can no longer change status",
            current.label().to_lowercase()
        )));
    }
    if !current.can_transition_to(next) {
        return Err(AppError::Validation(format!(
            "Quote cannot move from {} to {}",
            current.label().to_lowercase(),
            next.label().to_lowercase()
        )));
    }
    Ok(())
}

pub async fn change_status(id: &str, next: QuoteStatus) -> AppResult<Record<MotorQuote>> {
    let mut record = service::get::<MotorQuote>(id).await?;
    check_transition(record.data.status, next)?;

    record.data.status = next;
    service::save(&mut record).await?;
    tracing::info!("Motor quote {} is now {}", id, next.code());
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_transition() {
        assert!(check_transition(QuoteStatus::Pending, QuoteStatus::Approved).is_ok());
        assert!(check_transition(QuoteStatus::Pending, QuoteStatus::Cancelled).is_ok());
        assert!(check_transition(QuoteStatus::Pending, QuoteStatus::Pending).is_err());

        let err = check_transition(QuoteStatus::Approved, QuoteStatus::Cancelled).unwrap_err();
        assert_eq!(
            err.client_message(),
            "Quote is approved and can no longer change status"
        );
    }
}
