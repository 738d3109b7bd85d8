use contracts::domain::a002_agent::*;
use leptos::prelude::*;

use crate::shared::crud::{record_form_page, record_list_page, FormMode, ResourceScreen};
use crate::shared::form::{aggregate_rule, FieldDef, FieldKind, FormSchema, FormValues, Lookup};
use crate::shared::table::Column;

/// Affiliate ID is asked only from affiliates
fn is_affiliate(values: &FormValues) -> bool {
    values.get("is_affiliate").map(String::as_str) == Some("true")
}

impl ResourceScreen for Agent {
    fn columns() -> Vec<Column> {
        vec![
            Column::new("full_name", "Full name").sortable(),
            Column::new("email", "Email").sortable(),
            Column::new("phone", "Phone"),
            Column::new("branch_id", "Branch").sortable().multi_select(),
            Column::new("commission_rate", "Commission %").sortable().numeric(),
            Column::new("is_affiliate", "Affiliate").multi_select(),
        ]
    }

    fn cell(&self, key: &str) -> String {
        match key {
            "full_name" => self.full_name.clone(),
            "email" => self.email.clone(),
            "phone" => self.phone.clone(),
            "branch_id" => self.branch_id.clone(),
            "commission_rate" => format!("{:.2}", self.commission_rate),
            "is_affiliate" => match self.affiliate_id {
                Some(id) if self.is_affiliate => format!("Yes (#{})", id),
                _ if self.is_affiliate => "Yes".to_string(),
                _ => "No".to_string(),
            },
            _ => String::new(),
        }
    }

    fn schema() -> FormSchema {
        FormSchema::new(vec![
            FieldDef::text("full_name", "Full name").rules(FULL_NAME_RULES),
            FieldDef::new("email", "Email", FieldKind::Email).rules(EMAIL_RULES),
            FieldDef::text("phone", "Phone").rules(PHONE_RULES),
            FieldDef::reference("branch_id", "Branch", Lookup::BRANCHES).rules(BRANCH_RULES),
            FieldDef::decimal("commission_rate", "Commission rate")
                .rules(COMMISSION_RULES)
                .hint("Percent, 0 to 100"),
            FieldDef::checkbox("is_affiliate", "Affiliate"),
            FieldDef::integer("affiliate_id", "Affiliate ID")
                .rules(AFFILIATE_ID_RULES)
                .visible_when(is_affiliate),
        ])
        .cross_rule(aggregate_rule::<Agent>)
    }

    fn reference_columns() -> Vec<(&'static str, Lookup)> {
        vec![("branch_id", Lookup::BRANCHES)]
    }
}

#[component]
pub fn AgentList() -> impl IntoView {
    record_list_page::<Agent>()
}

#[component]
pub fn AgentAdd() -> impl IntoView {
    record_form_page::<Agent>(FormMode::Add)
}

#[component]
pub fn AgentEdit() -> impl IntoView {
    record_form_page::<Agent>(FormMode::Edit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_branch_list_is_required_for_the_form() {
        let lookups = Agent::schema().lookups();
        assert_eq!(lookups, vec![(Lookup::BRANCHES, true)]);
    }

    #[test]
    fn test_affiliate_toggle_shows_affiliate_id() {
        let schema = Agent::schema();
        let mut values = schema.defaults();
        assert!(!schema.visible_fields(&values).any(|f| f.name == "affiliate_id"));

        values.insert("is_affiliate".into(), "true".into());
        assert!(schema.visible_fields(&values).any(|f| f.name == "affiliate_id"));
    }

    #[test]
    fn test_affiliate_cell() {
        let agent = Agent {
            is_affiliate: true,
            affiliate_id: Some(42),
            ..Default::default()
        };
        assert_eq!(agent.cell("is_affiliate"), "Yes (#42)");
        assert_eq!(Agent::default().cell("is_affiliate"), "No");
    }
}
