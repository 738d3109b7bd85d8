use contracts::domain::a005_product::*;
use leptos::prelude::*;

use crate::shared::crud::{record_form_page, record_list_page, FormMode, ResourceScreen};
use crate::shared::form::{aggregate_rule, FieldDef, FormSchema, SelectOption};
use crate::shared::table::Column;

fn category_options() -> Vec<SelectOption> {
    ProductCategory::ALL
        .iter()
        .map(|c| SelectOption::new(c.code(), c.label()))
        .collect()
}

impl ResourceScreen for Product {
    fn columns() -> Vec<Column> {
        vec![
            Column::new("name", "Name").sortable(),
            Column::new("code", "Code").sortable(),
            Column::new("category", "Category").sortable().multi_select(),
            Column::new("is_active", "Active").multi_select(),
        ]
    }

    fn cell(&self, key: &str) -> String {
        match key {
            "name" => self.name.clone(),
            "code" => self.code.clone(),
            "category" => self.category.label().to_string(),
            "is_active" => if self.is_active { "Yes" } else { "No" }.to_string(),
            _ => String::new(),
        }
    }

    fn schema() -> FormSchema {
        FormSchema::new(vec![
            FieldDef::text("name", "Name").rules(NAME_RULES),
            FieldDef::text("code", "Code").rules(CODE_RULES),
            FieldDef::options("category", "Category", category_options())
                .default_value("motor"),
            FieldDef::checkbox("is_active", "Active").default_value("true"),
        ])
        .cross_rule(aggregate_rule::<Product>)
    }
}

#[component]
pub fn ProductList() -> impl IntoView {
    record_list_page::<Product>()
}

#[component]
pub fn ProductAdd() -> impl IntoView {
    record_form_page::<Product>(FormMode::Add)
}

#[component]
pub fn ProductEdit() -> impl IntoView {
    record_form_page::<Product>(FormMode::Edit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_options_follow_the_enum() {
        let options = category_options();
        assert_eq!(options.len(), ProductCategory::ALL.len());
        assert_eq!(options[0], SelectOption::new("motor", "Motor"));
    }

    #[test]
    fn test_payload_decodes_as_product() {
        let schema = Product::schema();
        let mut values = schema.defaults();
        values.insert("name".into(), "Travel Shield".into());
        values.insert("code".into(), "TRV-1".into());
        values.insert("category".into(), "travel".into());

        let product: Product = serde_json::from_value(schema.payload(&values)).unwrap();
        assert_eq!(product.category, ProductCategory::Travel);
        assert!(product.is_active);
    }
}
