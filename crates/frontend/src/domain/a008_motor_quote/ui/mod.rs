pub mod status_menu;

use contracts::domain::a008_motor_quote::*;
use contracts::domain::common::{AggregateRoot, Record};
use contracts::system::rights::Capability;
use leptos::prelude::*;
use serde_json::json;
use thaw::*;

use self::status_menu::status_menu;
use crate::shared::api_utils::item_path;
use crate::shared::crud::{
    list_query, mutation_plan, record_form_page, record_list_page_with, FormMode, ListOptions,
    ResourceScreen,
};
use crate::shared::form::{aggregate_rule, FieldDef, FormSchema, Lookup};
use crate::shared::mutation::use_mutation;
use crate::shared::query::use_query;
use crate::shared::request::Method;
use crate::shared::table::Column;
use crate::system::rights::use_rights;

impl ResourceScreen for MotorQuote {
    fn columns() -> Vec<Column> {
        vec![
            Column::new("customer_name", "Customer").sortable(),
            Column::new("vehicle", "Vehicle").sortable(),
            Column::new("vehicle_year", "Year").sortable().numeric(),
            Column::new("sum_insured", "Sum insured").sortable().numeric(),
            Column::new("branch_id", "Branch").multi_select(),
            Column::new("status", "Status").sortable().multi_select(),
            Column::new("created_at", "Requested").sortable(),
        ]
    }

    fn cell(&self, key: &str) -> String {
        match key {
            "customer_name" => self.customer_name.clone(),
            "vehicle" => format!("{} {}", self.vehicle_make, self.vehicle_model),
            "vehicle_year" => self.vehicle_year.to_string(),
            "sum_insured" => format!("{:.0}", self.sum_insured),
            "branch_id" => self.branch_id.clone().unwrap_or_default(),
            "status" => self.status.label().to_string(),
            _ => String::new(),
        }
    }

    /// Status is left out; it only changes through the status menu
    fn schema() -> FormSchema {
        FormSchema::new(vec![
            FieldDef::text("customer_name", "Customer name").rules(CUSTOMER_RULES),
            FieldDef::text("vehicle_make", "Make").rules(VEHICLE_RULES),
            FieldDef::text("vehicle_model", "Model").rules(VEHICLE_RULES),
            FieldDef::integer("vehicle_year", "Year").rules(YEAR_RULES),
            FieldDef::decimal("sum_insured", "Sum insured").rules(SUM_INSURED_RULES),
            FieldDef::reference("branch_id", "Branch", Lookup::BRANCHES),
        ])
        .cross_rule(aggregate_rule::<MotorQuote>)
    }

    fn reference_columns() -> Vec<(&'static str, Lookup)> {
        vec![("branch_id", Lookup::BRANCHES)]
    }
}

/// Endpoint of one quote's status transition
pub fn status_path(id: &str) -> String {
    format!("{}/status", item_path(&MotorQuote::api_path(), id))
}

#[component]
pub fn MotorQuoteList() -> impl IntoView {
    let rights = use_rights(MotorQuote::route().path);
    let quotes = use_query::<Vec<Record<MotorQuote>>, _>(move || {
        rights
            .get()
            .allows(Capability::View)
            .then(list_query::<MotorQuote>)
    });
    let change = use_mutation(mutation_plan::<MotorQuote>(None));

    let row_actions = Callback::new(move |id: String| {
        let status = quotes
            .data()
            .and_then(|rows| rows.into_iter().find(|r| r.id == id))
            .map(|r| r.data.status)
            .unwrap_or_default();
        let can_edit = rights.get_untracked().allows(Capability::Edit);

        status_menu(status)
            .into_iter()
            .map(|item| {
                let id = id.clone();
                let disabled = item.disabled || !can_edit;
                view! {
                    <Button
                        appearance=ButtonAppearance::Subtle
                        size=ButtonSize::Small
                        disabled=Signal::derive(move || disabled || change.is_submitting())
                        on_click=move |_| {
                            if let Some(target) = item.target {
                                change.submit(
                                    Method::Post,
                                    status_path(&id),
                                    Some(json!({ "status": target })),
                                );
                            }
                        }
                    >
                        {item.label}
                    </Button>
                }
            })
            .collect_view()
            .into_any()
    });

    record_list_page_with::<MotorQuote>(ListOptions {
        row_actions: Some(row_actions),
        ..Default::default()
    })
}

#[component]
pub fn MotorQuoteAdd() -> impl IntoView {
    record_form_page::<MotorQuote>(FormMode::Add)
}

#[component]
pub fn MotorQuoteEdit() -> impl IntoView {
    record_form_page::<MotorQuote>(FormMode::Edit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_never_sends_status() {
        let schema = MotorQuote::schema();
        assert!(schema.field("status").is_none());
        assert!(schema.payload(&schema.defaults()).get("status").is_none());
    }

    #[test]
    fn test_status_path() {
        assert_eq!(status_path("q-7"), "/api/motor-quotes/q-7/status");
        assert_eq!(MotorQuote::route().path, "/motor-quotes/quote-list");
    }

    #[test]
    fn test_vehicle_cell() {
        let quote = MotorQuote {
            vehicle_make: "Toyota".into(),
            vehicle_model: "Corolla".into(),
            status: QuoteStatus::Approved,
            ..Default::default()
        };
        assert_eq!(quote.cell("vehicle"), "Toyota Corolla");
        assert_eq!(quote.cell("status"), "Approved");
    }
}
