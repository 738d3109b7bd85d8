pub mod filter;

use contracts::domain::a009_order::*;
use contracts::shared::metadata::ValidationRules;
use leptos::prelude::*;

use self::filter::{orders_query, OrderFilterDialog, OrderFilterState};
use crate::shared::crud::{
    record_form_page, record_list_page_with, FormMode, ListOptions, ResourceScreen,
};
use crate::shared::form::{aggregate_rule, FieldDef, FormSchema, Lookup, SelectOption};
use crate::shared::table::Column;

fn status_options() -> Vec<SelectOption> {
    OrderStatus::ALL
        .iter()
        .map(|s| SelectOption::new(s.code(), s.label()))
        .collect()
}

impl ResourceScreen for Order {
    fn columns() -> Vec<Column> {
        vec![
            Column::new("order_no", "Order No").sortable(),
            Column::new("order_date", "Date").sortable(),
            Column::new("client_name", "Client").sortable(),
            Column::new("product_id", "Product").multi_select(),
            Column::new("courier_id", "Courier").multi_select(),
            Column::new("branch_id", "Branch").multi_select(),
            Column::new("amount", "Amount").sortable().numeric(),
            Column::new("status", "Status").sortable().multi_select(),
        ]
    }

    fn cell(&self, key: &str) -> String {
        match key {
            "order_no" => self.order_no.clone(),
            "order_date" => self.order_date.clone(),
            "client_name" => self.client_name.clone(),
            "product_id" => self.product_id.clone().unwrap_or_default(),
            "courier_id" => self.courier_id.clone().unwrap_or_default(),
            "branch_id" => self.branch_id.clone().unwrap_or_default(),
            "amount" => format!("{:.2}", self.amount),
            "status" => self.status.label().to_string(),
            _ => String::new(),
        }
    }

    fn schema() -> FormSchema {
        FormSchema::new(vec![
            FieldDef::text("order_no", "Order No").rules(ORDER_NO_RULES),
            FieldDef::date("order_date", "Order date").rules(ValidationRules::required()),
            FieldDef::text("client_name", "Client name").rules(CLIENT_NAME_RULES),
            FieldDef::reference("product_id", "Product", Lookup::PRODUCTS),
            FieldDef::reference("courier_id", "Courier", Lookup::COURIERS),
            FieldDef::reference("branch_id", "Branch", Lookup::BRANCHES),
            FieldDef::decimal("amount", "Amount").rules(AMOUNT_RULES),
            FieldDef::options("status", "Status", status_options()).default_value("new"),
        ])
        .cross_rule(aggregate_rule::<Order>)
    }

    fn reference_columns() -> Vec<(&'static str, Lookup)> {
        vec![
            ("product_id", Lookup::PRODUCTS),
            ("courier_id", Lookup::COURIERS),
            ("branch_id", Lookup::BRANCHES),
        ]
    }
}

#[component]
pub fn OrderList() -> impl IntoView {
    let filter = RwSignal::new(OrderFilterState::default());
    let query = Signal::derive(move || filter.with(|f| orders_query(&f.applied)));

    record_list_page_with::<Order>(ListOptions {
        query: Some(query),
        toolbar: Some(ViewFn::from(move || view! { <OrderFilterDialog state=filter /> })),
        ..Default::default()
    })
}

#[component]
pub fn OrderAdd() -> impl IntoView {
    record_form_page::<Order>(FormMode::Add)
}

#[component]
pub fn OrderEdit() -> impl IntoView {
    record_form_page::<Order>(FormMode::Edit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_reference_is_optional() {
        let lookups = Order::schema().lookups();
        assert_eq!(lookups.len(), 3);
        assert!(lookups.iter().all(|(_, required)| !required));
    }

    #[test]
    fn test_status_payload() {
        let schema = Order::schema();
        let mut values = schema.defaults();
        values.insert("status".into(), "returned".into());
        assert_eq!(schema.payload(&values)["status"], "returned");
    }
}
