use contracts::domain::a003_client::*;
use contracts::system::users::EMAIL_RULES;
use leptos::prelude::*;

use crate::shared::crud::{or_dash, record_form_page, record_list_page, FormMode, ResourceScreen};
use crate::shared::form::{aggregate_rule, FieldDef, FieldKind, FormSchema, Lookup};
use contracts::shared::metadata::ValidationRules;
use crate::shared::table::Column;

impl ResourceScreen for Client {
    fn columns() -> Vec<Column> {
        vec![
            Column::new("full_name", "Full name").sortable(),
            Column::new("cnic", "CNIC"),
            Column::new("phone", "Phone"),
            Column::new("email", "Email"),
            Column::new("branch_id", "Branch").sortable().multi_select(),
            Column::new("created_at", "Registered").sortable(),
        ]
    }

    fn cell(&self, key: &str) -> String {
        match key {
            "full_name" => self.full_name.clone(),
            "cnic" => self.cnic.clone(),
            "phone" => self.phone.clone(),
            "email" => or_dash(self.email.as_deref()),
            "branch_id" => self.branch_id.clone(),
            _ => String::new(),
        }
    }

    fn schema() -> FormSchema {
        FormSchema::new(vec![
            FieldDef::text("full_name", "Full name").rules(FULL_NAME_RULES),
            FieldDef::text("cnic", "CNIC")
                .rules(CNIC_RULES)
                .hint("13 digits, no dashes"),
            FieldDef::text("phone", "Phone").rules(PHONE_RULES),
            FieldDef::new("email", "Email", FieldKind::Email).rules(EMAIL_RULES),
            FieldDef::reference("branch_id", "Branch", Lookup::BRANCHES)
                .rules(ValidationRules::required()),
            FieldDef::new("address", "Address", FieldKind::TextArea).rules(ADDRESS_RULES),
        ])
        .cross_rule(aggregate_rule::<Client>)
    }

    fn reference_columns() -> Vec<(&'static str, Lookup)> {
        vec![("branch_id", Lookup::BRANCHES)]
    }
}

#[component]
pub fn ClientList() -> impl IntoView {
    record_list_page::<Client>()
}

#[component]
pub fn ClientAdd() -> impl IntoView {
    record_form_page::<Client>(FormMode::Add)
}

#[component]
pub fn ClientEdit() -> impl IntoView {
    record_form_page::<Client>(FormMode::Edit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cnic_message() {
        let schema = Client::schema();
        let mut values = schema.defaults();
        values.insert("cnic".into(), "35202-1234567-1".into());
        assert_eq!(
            schema.validate_field("cnic", &values),
            Err("CNIC must be 13 digits without dashes".to_string())
        );
    }

    #[test]
    fn test_blank_email_is_sent_as_null() {
        let schema = Client::schema();
        let payload = schema.payload(&schema.defaults());
        assert!(payload["email"].is_null());
        assert!(payload["address"].is_null());
    }
}
