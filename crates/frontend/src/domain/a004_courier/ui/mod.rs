use contracts::domain::a004_courier::*;
use leptos::prelude::*;

use crate::shared::crud::{or_dash, record_form_page, record_list_page, FormMode, ResourceScreen};
use crate::shared::form::{aggregate_rule, FieldDef, FormSchema};
use crate::shared::table::Column;

impl ResourceScreen for Courier {
    fn columns() -> Vec<Column> {
        vec![
            Column::new("name", "Name").sortable(),
            Column::new("code", "Code").sortable(),
            Column::new("tracking_url", "Tracking URL"),
            Column::new("is_active", "Active").multi_select(),
        ]
    }

    fn cell(&self, key: &str) -> String {
        match key {
            "name" => self.name.clone(),
            "code" => self.code.clone(),
            "tracking_url" => or_dash(self.tracking_url.as_deref()),
            "is_active" => if self.is_active { "Yes" } else { "No" }.to_string(),
            _ => String::new(),
        }
    }

    fn schema() -> FormSchema {
        FormSchema::new(vec![
            FieldDef::text("name", "Name").rules(NAME_RULES),
            FieldDef::text("code", "Code").rules(CODE_RULES),
            FieldDef::text("tracking_url", "Tracking URL")
                .rules(TRACKING_URL_RULES)
                .hint("Use {tracking_no} where the number goes"),
            FieldDef::checkbox("is_active", "Active").default_value("true"),
        ])
        .cross_rule(aggregate_rule::<Courier>)
    }
}

#[component]
pub fn CourierList() -> impl IntoView {
    record_list_page::<Courier>()
}

#[component]
pub fn CourierAdd() -> impl IntoView {
    record_form_page::<Courier>(FormMode::Add)
}

#[component]
pub fn CourierEdit() -> impl IntoView {
    record_form_page::<Courier>(FormMode::Edit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracking_url_scheme_is_checked_after_field_rules() {
        let schema = Courier::schema();
        let mut values = schema.defaults();
        values.insert("name".into(), "TCS".into());
        values.insert("code".into(), "TCS".into());
        values.insert("tracking_url".into(), "track.tcs.pk/{tracking_no}".into());

        let errors = schema.validate(&values);
        assert_eq!(errors.first_field(), Some("tracking_url"));

        values.insert("tracking_url".into(), "https://track.tcs.pk/{tracking_no}".into());
        assert!(schema.validate(&values).is_empty());
    }

    #[test]
    fn test_new_courier_is_active() {
        let payload = Courier::schema().payload(&Courier::schema().defaults());
        assert_eq!(payload["is_active"], true);
    }
}
