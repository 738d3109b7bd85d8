use serde::{Deserialize, Serialize};

use crate::domain::common::{AggregateRoot, Reference};
use crate::shared::metadata::{parse_date, ValidationErrors, ValidationRules};
use crate::system::routes::{ScreenRoute, ORDERS};

pub const ORDER_NO_RULES: ValidationRules = ValidationRules::required().with_max_length(30);
pub const CLIENT_NAME_RULES: ValidationRules = ValidationRules::required().with_max_length(100);
pub const AMOUNT_RULES: ValidationRules = ValidationRules::required().with_min(0.0);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    New,
    Dispatched,
    Delivered,
    Returned,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::New,
        OrderStatus::Dispatched,
        OrderStatus::Delivered,
        OrderStatus::Returned,
        OrderStatus::Cancelled,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            OrderStatus::New => "new",
            OrderStatus::Dispatched => "dispatched",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Returned => "returned",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::New => "New",
            OrderStatus::Dispatched => "Dispatched",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Returned => "Returned",
            OrderStatus::Cancelled => "Cancelled",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.code() == code)
    }
}

/// Policy document order shipped by a courier
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_no: String,
    pub client_name: String,
    #[serde(default)]
    pub product_id: Option<String>,
    #[serde(default)]
    pub courier_id: Option<String>,
    #[serde(default)]
    pub branch_id: Option<String>,
    pub amount: f64,
    #[serde(default)]
    pub status: OrderStatus,
    /// `YYYY-MM-DD`
    pub order_date: String,
}

impl AggregateRoot for Order {
    fn aggregate_index() -> &'static str {
        "a009"
    }

    fn collection_name() -> &'static str {
        "orders"
    }

    fn element_name() -> &'static str {
        "Order"
    }

    fn list_name() -> &'static str {
        "Orders"
    }

    fn route() -> &'static ScreenRoute {
        &ORDERS
    }

    fn label(&self) -> String {
        format!("{} - {}", self.order_no, self.client_name)
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check(
            "order_no",
            ORDER_NO_RULES.validate_string(&self.order_no, "Order No"),
        );
        errors.check(
            "client_name",
            CLIENT_NAME_RULES.validate_string(&self.client_name, "Client name"),
        );
        errors.check("amount", AMOUNT_RULES.validate_number(self.amount, "Amount"));
        errors.check(
            "order_date",
            parse_date(&self.order_date, "Order date").map(|_| ()),
        );
        errors.into_result()
    }

    fn unique_keys(&self) -> Vec<(&'static str, String)> {
        vec![("order_no", self.order_no.trim().to_string())]
    }

    fn references(&self) -> Vec<Reference> {
        let optional = [
            ("products", "product_id", "Product", &self.product_id),
            ("couriers", "courier_id", "Courier", &self.courier_id),
            ("branches", "branch_id", "Branch", &self.branch_id),
        ];
        optional
            .into_iter()
            .filter_map(|(collection, field, label, id)| {
                id.as_deref()
                    .filter(|id| !id.trim().is_empty())
                    .map(|id| Reference::new(collection, field, label, id))
            })
            .collect()
    }
}

/// Filter of the order list, sent as query parameters.
/// Empty fields are omitted so an unfiltered list has an empty query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub courier_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_to: Option<String>,
}

impl OrderFilter {
    /// Number of applied criteria, shown on the filter button
    pub fn active_count(&self) -> usize {
        [
            self.status.is_some(),
            self.courier_id.is_some(),
            self.branch_id.is_some(),
            self.date_from.is_some(),
            self.date_to.is_some(),
        ]
        .into_iter()
        .filter(|set| *set)
        .count()
    }

    pub fn is_empty(&self) -> bool {
        self.active_count() == 0
    }

    /// Drop blank strings so they count as "not set"
    pub fn normalized(self) -> Self {
        fn clean(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }
        Self {
            status: self.status,
            courier_id: clean(self.courier_id),
            branch_id: clean(self.branch_id),
            date_from: clean(self.date_from),
            date_to: clean(self.date_to),
        }
    }

    /// Query-key parameters, one `name=value` per applied criterion
    pub fn params(&self) -> Vec<String> {
        let mut params = Vec::new();
        if let Some(status) = self.status {
            params.push(format!("status={}", status.code()));
        }
        let rest = [
            ("courier_id", &self.courier_id),
            ("branch_id", &self.branch_id),
            ("date_from", &self.date_from),
            ("date_to", &self.date_to),
        ];
        for (name, value) in rest {
            if let Some(value) = value {
                params.push(format!("{}={}", name, value));
            }
        }
        params
    }

    pub fn matches(&self, order: &Order) -> bool {
        if self.status.is_some_and(|s| s != order.status) {
            return false;
        }
        if self.courier_id.is_some() && self.courier_id != order.courier_id {
            return false;
        }
        if self.branch_id.is_some() && self.branch_id != order.branch_id {
            return false;
        }
        // ISO dates compare correctly as strings
        if let Some(from) = &self.date_from {
            if order.order_date.as_str() < from.as_str() {
                return false;
            }
        }
        if let Some(to) = &self.date_to {
            if order.order_date.as_str() > to.as_str() {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(status: OrderStatus, date: &str) -> Order {
        Order {
            order_no: "ORD-1".into(),
            client_name: "Ali".into(),
            courier_id: Some("tcs".into()),
            amount: 1500.0,
            status,
            order_date: date.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_filter_matches() {
        let filter = OrderFilter {
            status: Some(OrderStatus::Dispatched),
            date_from: Some("2026-01-01".into()),
            ..Default::default()
        };
        assert_eq!(filter.active_count(), 2);
        assert!(filter.matches(&order(OrderStatus::Dispatched, "2026-02-10")));
        assert!(!filter.matches(&order(OrderStatus::New, "2026-02-10")));
        assert!(!filter.matches(&order(OrderStatus::Dispatched, "2025-12-31")));
    }

    #[test]
    fn test_normalized_drops_blank_values() {
        let filter = OrderFilter {
            courier_id: Some("  ".into()),
            branch_id: Some("b-1".into()),
            ..Default::default()
        }
        .normalized();
        assert_eq!(filter.courier_id, None);
        assert_eq!(filter.params(), vec!["branch_id=b-1".to_string()]);
        assert!(OrderFilter::default().params().is_empty());
    }

    #[test]
    fn test_references_skip_empty() {
        let o = order(OrderStatus::New, "2026-01-01");
        let refs = o.references();
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].collection, "couriers");
    }
}
