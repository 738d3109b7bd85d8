use contracts::domain::a009_order::{Order, OrderFilter};
use contracts::domain::common::Record;
use contracts::shared::metadata::parse_date;

use crate::domain::common::service;
use crate::shared::error::{AppError, AppResult};

/// Reject malformed or inverted date bounds before filtering
pub fn check_filter(filter: &OrderFilter) -> AppResult<()> {
    let from = filter
        .date_from
        .as_deref()
        .map(|d| parse_date(d, "Date from"))
        .transpose()
        .map_err(AppError::Validation)?;
    let to = filter
        .date_to
        .as_deref()
        .map(|d| parse_date(d, "Date to"))
        .transpose()
        .map_err(AppError::Validation)?;
    if let (Some(from), Some(to)) = (from, to) {
        if to < from {
            return Err(AppError::Validation(
                "Date to must not be before Date from".into(),
            ));
        }
    }
    Ok(())
}

/// Orders matching the filter, newest order date first
pub async fn list_filtered(filter: OrderFilter) -> AppResult<Vec<Record<Order>>> {
    let filter = filter.normalized();
    check_filter(&filter)?;

    let mut orders: Vec<Record<Order>> = service::list::<Order>()
        .await?
        .into_iter()
        .filter(|r| filter.matches(&r.data))
        .collect();
    orders.sort_by(|a, b| b.data.order_date.cmp(&a.data.order_date));
    Ok(orders)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_filter() {
        assert!(check_filter(&OrderFilter::default()).is_ok());

        let inverted = OrderFilter {
            date_from: Some("2026-05-01".into()),
            date_to: Some("2026-04-01".into()),
            ..Default::default()
        };
        assert!(check_filter(&inverted).is_err());

        let malformed = OrderFilter {
            date_from: Some("May 1".into()),
            ..Default::default()
        };
        assert_eq!(
            check_filter(&malformed).unwrap_err().client_message(),
            "Date from must be a date (YYYY-MM-DD)"
        );
    }
}
