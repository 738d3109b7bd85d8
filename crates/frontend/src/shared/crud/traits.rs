use std::collections::BTreeMap;

use contracts::domain::common::{AggregateRoot, Record};
use contracts::shared::api::LookupItem;

use crate::shared::form::{FormSchema, Lookup};
use crate::shared::mutation::MutationPlan;
use crate::shared::query::{Invalidation, QueryKey};
use crate::shared::table::{Column, Tabular};

/// Cache resource of the dashboard counters
pub const DASHBOARD_RESOURCE: &str = "dashboard";

/// A record module that gets the standard list and form screens
pub trait ResourceScreen: AggregateRoot {
    fn columns() -> Vec<Column>;

    fn cell(&self, key: &str) -> String;

    fn schema() -> FormSchema;

    /// Columns holding ids of other records, shown by their label
    fn reference_columns() -> Vec<(&'static str, Lookup)> {
        Vec::new()
    }

    fn item_key(id: &str) -> QueryKey {
        QueryKey::new(Self::collection_name()).with("item").with(id)
    }
}

impl<A: ResourceScreen> Tabular for Record<A> {
    fn row_id(&self) -> String {
        self.id.clone()
    }

    fn cell(&self, key: &str) -> String {
        match key {
            "created_by" => self.metadata.created_by.clone().unwrap_or_default(),
            "created_at" => self.metadata.created_at.format("%Y-%m-%d %H:%M").to_string(),
            "updated_at" => self.metadata.updated_at.format("%Y-%m-%d %H:%M").to_string(),
            _ => self.data.cell(key),
        }
    }
}

/// Listing row: the record plus labels of the records it points to
#[derive(Debug, Clone)]
pub struct ListRow<A> {
    pub record: Record<A>,
    labels: BTreeMap<&'static str, String>,
}

impl<A: ResourceScreen> ListRow<A> {
    pub fn new(record: Record<A>, lookups: &BTreeMap<String, Vec<LookupItem>>) -> Self {
        let mut labels = BTreeMap::new();
        for (key, lookup) in A::reference_columns() {
            let id = record.data.cell(key);
            let label = lookups
                .get(lookup.resource)
                .and_then(|items| items.iter().find(|item| item.id == id))
                .map(|item| item.label.clone());
            if let Some(label) = label {
                labels.insert(key, label);
            }
        }
        Self { record, labels }
    }
}

impl<A: ResourceScreen> Tabular for ListRow<A> {
    fn row_id(&self) -> String {
        self.record.row_id()
    }

    fn cell(&self, key: &str) -> String {
        match self.labels.get(key) {
            Some(label) => label.clone(),
            None => self.record.cell(key),
        }
    }
}

/// Every cached read of the module plus the dashboard counters go stale
/// after a change; `redirect_to` is the listing when the change came from a
/// form
pub fn mutation_plan<A: AggregateRoot>(redirect_to: Option<&str>) -> MutationPlan {
    let plan = MutationPlan::new()
        .invalidate(Invalidation::resource(A::collection_name()))
        .invalidate(Invalidation::resource(DASHBOARD_RESOURCE));
    match redirect_to {
        Some(path) => plan.redirect_to(path),
        None => plan,
    }
}

/// Cell text of an optional value
pub fn or_dash(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => "—".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a004_courier::Courier;
    use crate::shared::query::QueryKey;

    #[test]
    fn test_plan_invalidates_module_and_dashboard() {
        let plan = mutation_plan::<Courier>(Some("/couriers/courier-list"));
        assert!(plan.invalidate[0].matches(&QueryKey::new("couriers").with("lookup")));
        assert!(plan.invalidate[1].matches(&QueryKey::new("dashboard").with("summary")));
        assert_eq!(plan.redirect_to.as_deref(), Some("/couriers/courier-list"));
        assert!(mutation_plan::<Courier>(None).redirect_to.is_none());
    }

    #[test]
    fn test_or_dash() {
        assert_eq!(or_dash(None), "—");
        assert_eq!(or_dash(Some(" ")), "—");
        assert_eq!(or_dash(Some("Lahore")), "Lahore");
    }
}
