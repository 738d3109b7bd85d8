use contracts::domain::a006_plan::*;
use leptos::prelude::*;

use crate::shared::crud::{record_form_page, record_list_page, FormMode, ResourceScreen};
use crate::shared::form::{aggregate_rule, FieldDef, FormSchema, Lookup};
use crate::shared::table::Column;
use contracts::shared::metadata::ValidationRules;

impl ResourceScreen for Plan {
    fn columns() -> Vec<Column> {
        vec![
            Column::new("name", "Name").sortable(),
            Column::new("product_id", "Product").sortable().multi_select(),
            Column::new("premium", "Premium").sortable().numeric(),
            Column::new("duration_months", "Months").sortable().numeric(),
        ]
    }

    fn cell(&self, key: &str) -> String {
        match key {
            "name" => self.name.clone(),
            "product_id" => self.product_id.clone(),
            "premium" => format!("{:.2}", self.premium),
            "duration_months" => self.duration_months.to_string(),
            _ => String::new(),
        }
    }

    fn schema() -> FormSchema {
        FormSchema::new(vec![
            FieldDef::reference("product_id", "Product", Lookup::PRODUCTS)
                .rules(ValidationRules::required()),
            FieldDef::text("name", "Name").rules(NAME_RULES),
            FieldDef::decimal("premium", "Premium").rules(PREMIUM_RULES),
            FieldDef::integer("duration_months", "Duration (months)")
                .rules(DURATION_RULES)
                .default_value("12"),
        ])
        .cross_rule(aggregate_rule::<Plan>)
    }

    fn reference_columns() -> Vec<(&'static str, Lookup)> {
        vec![("product_id", Lookup::PRODUCTS)]
    }
}

#[component]
pub fn PlanList() -> impl IntoView {
    record_list_page::<Plan>()
}

#[component]
pub fn PlanAdd() -> impl IntoView {
    record_form_page::<Plan>(FormMode::Add)
}

#[component]
pub fn PlanEdit() -> impl IntoView {
    record_form_page::<Plan>(FormMode::Edit)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::shared::crud::ListRow;
    use crate::shared::table::Tabular;
    use contracts::domain::common::Record;
    use contracts::shared::api::LookupItem;

    #[test]
    fn test_product_column_shows_the_product_label() {
        let plan = Plan {
            product_id: "p-1".into(),
            name: "Gold".into(),
            premium: 12000.0,
            duration_months: 12,
        };
        let record = Record::new("pl-1", plan, None);
        let mut lookups = BTreeMap::new();
        lookups.insert(
            "products".to_string(),
            vec![LookupItem {
                id: "p-1".into(),
                label: "Motor Comprehensive".into(),
            }],
        );

        let row = ListRow::new(record.clone(), &lookups);
        assert_eq!(row.cell("product_id"), "Motor Comprehensive");
        assert_eq!(row.cell("premium"), "12000.00");
        assert_eq!(row.row_id(), "pl-1");

        let unresolved = ListRow::new(record, &BTreeMap::new());
        assert_eq!(unresolved.cell("product_id"), "p-1");
    }

    #[test]
    fn test_products_must_be_loaded_before_the_form() {
        assert_eq!(Plan::schema().lookups(), vec![(Lookup::PRODUCTS, true)]);
    }
}
