use contracts::domain::a001_branch::*;
use leptos::prelude::*;

use crate::shared::crud::{or_dash, record_form_page, record_list_page, FormMode, ResourceScreen};
use crate::shared::form::{aggregate_rule, FieldDef, FormSchema, Lookup};
use crate::shared::table::Column;

impl ResourceScreen for Branch {
    fn columns() -> Vec<Column> {
        vec![
            Column::new("name", "Name").sortable(),
            Column::new("igis_code", "IGIS code").sortable(),
            Column::new("takaful_code", "Takaful code"),
            Column::new("city", "City").sortable().multi_select(),
            Column::new("phone", "Phone"),
            Column::new("monthly_target", "Monthly target").sortable().numeric(),
            Column::new("max_agents", "Max agents").numeric(),
            Column::new("manager_user_id", "Manager").multi_select(),
        ]
    }

    fn cell(&self, key: &str) -> String {
        match key {
            "name" => self.name.clone(),
            "igis_code" => self.igis_code.clone(),
            "takaful_code" => self.takaful_code.clone(),
            "city" => self.city.clone(),
            "phone" => self.phone.clone(),
            "monthly_target" => format!("{:.2}", self.monthly_target),
            "max_agents" => self.max_agents.to_string(),
            "manager_user_id" => or_dash(self.manager_user_id.as_deref()),
            _ => String::new(),
        }
    }

    fn schema() -> FormSchema {
        FormSchema::new(vec![
            FieldDef::text("name", "Name").rules(NAME_RULES),
            FieldDef::text("igis_code", "IGIS code")
                .rules(BRANCH_CODE_RULES)
                .hint("8 characters"),
            FieldDef::text("takaful_code", "Takaful code")
                .rules(BRANCH_CODE_RULES)
                .hint("8 characters"),
            FieldDef::text("city", "City").rules(CITY_RULES),
            FieldDef::text("phone", "Phone").rules(PHONE_RULES),
            FieldDef::decimal("monthly_target", "Monthly target")
                .rules(MONTHLY_TARGET_RULES)
                .default_value("0"),
            FieldDef::integer("max_agents", "Max agents")
                .rules(MAX_AGENTS_RULES)
                .default_value("10"),
            FieldDef::reference("manager_user_id", "Manager", Lookup::USERS),
        ])
        .cross_rule(aggregate_rule::<Branch>)
    }

    fn reference_columns() -> Vec<(&'static str, Lookup)> {
        vec![("manager_user_id", Lookup::USERS)]
    }
}

#[component]
pub fn BranchList() -> impl IntoView {
    record_list_page::<Branch>()
}

#[component]
pub fn BranchAdd() -> impl IntoView {
    record_form_page::<Branch>(FormMode::Add)
}

#[component]
pub fn BranchEdit() -> impl IntoView {
    record_form_page::<Branch>(FormMode::Edit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::form::FormValues;

    fn input(igis: &str) -> FormValues {
        [
            ("name", "Gulberg"),
            ("igis_code", igis),
            ("takaful_code", "TKF00012"),
            ("city", "Lahore"),
            ("phone", "0421234567"),
            ("monthly_target", "250000"),
            ("max_agents", "12"),
            ("manager_user_id", ""),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    #[test]
    fn test_branch_code_length_is_checked_on_the_form() {
        let schema = Branch::schema();
        assert!(schema.validate(&input("IGS00012")).is_empty());

        let errors = schema.validate(&input("IGS1"));
        assert_eq!(errors.first_field(), Some("igis_code"));
    }

    #[test]
    fn test_manager_is_optional() {
        let payload = Branch::schema().payload(&input("IGS00012"));
        assert!(payload["manager_user_id"].is_null());
        assert_eq!(payload["max_agents"], 12);
        assert!(Branch::schema().lookups().iter().all(|(_, required)| !required));
    }
}
