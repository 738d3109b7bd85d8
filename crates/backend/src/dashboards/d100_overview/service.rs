use anyhow::Result;
use chrono::Utc;
use contracts::dashboards::d100_overview::{ModuleCount, OverviewResponse};
use contracts::domain::a001_branch::Branch;
use contracts::domain::a002_agent::Agent;
use contracts::domain::a003_client::Client;
use contracts::domain::a004_courier::Courier;
use contracts::domain::a005_product::Product;
use contracts::domain::a006_plan::Plan;
use contracts::domain::a007_coupon::Coupon;
use contracts::domain::a008_motor_quote::{MotorQuote, QuoteStatus};
use contracts::domain::a009_order::Order;
use contracts::domain::a010_call_us::{CallUsRequest, CallUsStatus};
use contracts::domain::common::AggregateRoot;
use contracts::system::rights::{Capability, PermissionTable};
use contracts::system::routes::ScreenRoute;
use std::collections::HashMap;

use super::repository;

fn module<A: AggregateRoot>() -> (&'static ScreenRoute, &'static str) {
    (A::route(), A::collection_name())
}

/// Modules that have a record collection behind them
fn modules() -> [(&'static ScreenRoute, &'static str); 10] {
    [
        module::<Branch>(),
        module::<Client>(),
        module::<Agent>(),
        module::<MotorQuote>(),
        module::<Courier>(),
        module::<Order>(),
        module::<CallUsRequest>(),
        module::<Product>(),
        module::<Plan>(),
        module::<Coupon>(),
    ]
}

/// Counts of the modules the user can view
pub fn visible_counts(counts: &HashMap<String, u64>, rights: &PermissionTable) -> Vec<ModuleCount> {
    modules()
        .into_iter()
        .filter(|(route, _)| {
            rights
                .get(route.path)
                .is_some_and(|r| r.allows(Capability::View))
        })
        .map(|(route, collection)| ModuleCount {
            route: route.path.to_string(),
            title: route.title.to_string(),
            count: counts.get(collection).copied().unwrap_or(0),
        })
        .collect()
}

pub async fn get_overview(rights: &PermissionTable) -> Result<OverviewResponse> {
    let counts = repository::count_by_collection().await?;
    let pending_quotes = repository::count_with_status(
        MotorQuote::collection_name(),
        QuoteStatus::Pending.code(),
    )
    .await?;
    let pending_call_us = repository::count_with_status(
        CallUsRequest::collection_name(),
        CallUsStatus::Pending.code(),
    )
    .await?;

    Ok(OverviewResponse {
        modules: visible_counts(&counts, rights),
        pending_quotes,
        pending_call_us,
        generated_at: Utc::now().to_rfc3339(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::system::rights::{CapabilityRecord, RightFlag};
    use contracts::system::routes;

    #[test]
    fn test_visible_counts_follow_view_right() {
        let counts = HashMap::from([("branches".to_string(), 4), ("orders".to_string(), 12)]);

        let mut rights = PermissionTable::new();
        rights.insert(
            routes::ORDERS.path,
            CapabilityRecord {
                can_view: Some(RightFlag::Granted),
                ..Default::default()
            },
        );
        rights.insert(
            routes::BRANCHES.path,
            CapabilityRecord {
                can_view: Some(RightFlag::Denied),
                ..Default::default()
            },
        );

        let visible = visible_counts(&counts, &rights);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].title, "Orders");
        assert_eq!(visible[0].count, 12);

        let all = visible_counts(&counts, &PermissionTable::admin());
        assert_eq!(all.len(), 10);
        assert!(all.iter().any(|m| m.title == "Branches" && m.count == 4));
    }
}
