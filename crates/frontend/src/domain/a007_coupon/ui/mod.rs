use contracts::domain::a007_coupon::*;
use contracts::shared::metadata::ValidationRules;
use leptos::prelude::*;

use crate::shared::crud::{or_dash, record_form_page, record_list_page, FormMode, ResourceScreen};
use crate::shared::form::{aggregate_rule, FieldDef, FormSchema, Lookup};
use crate::shared::table::Column;

impl ResourceScreen for Coupon {
    fn columns() -> Vec<Column> {
        vec![
            Column::new("code", "Code").sortable(),
            Column::new("discount_percent", "Discount %").sortable().numeric(),
            Column::new("valid_from", "Valid from").sortable(),
            Column::new("valid_to", "Valid to").sortable(),
            Column::new("product_id", "Product").multi_select(),
            Column::new("max_uses", "Max uses").numeric(),
        ]
    }

    fn cell(&self, key: &str) -> String {
        match key {
            "code" => self.code.clone(),
            "discount_percent" => format!("{:.1}", self.discount_percent),
            "valid_from" => self.valid_from.clone(),
            "valid_to" => self.valid_to.clone(),
            "product_id" => or_dash(self.product_id.as_deref()),
            "max_uses" => self.max_uses.to_string(),
            _ => String::new(),
        }
    }

    fn schema() -> FormSchema {
        FormSchema::new(vec![
            FieldDef::text("code", "Code").rules(CODE_RULES),
            FieldDef::decimal("discount_percent", "Discount %").rules(DISCOUNT_RULES),
            FieldDef::date("valid_from", "Valid from").rules(ValidationRules::required()),
            FieldDef::date("valid_to", "Valid to").rules(ValidationRules::required()),
            FieldDef::reference("product_id", "Product", Lookup::PRODUCTS)
                .hint("Leave empty for every product"),
            FieldDef::integer("max_uses", "Max uses")
                .rules(MAX_USES_RULES)
                .default_value("100"),
        ])
        .cross_rule(aggregate_rule::<Coupon>)
    }

    fn reference_columns() -> Vec<(&'static str, Lookup)> {
        vec![("product_id", Lookup::PRODUCTS)]
    }
}

#[component]
pub fn CouponList() -> impl IntoView {
    record_list_page::<Coupon>()
}

#[component]
pub fn CouponAdd() -> impl IntoView {
    record_form_page::<Coupon>(FormMode::Add)
}

#[component]
pub fn CouponEdit() -> impl IntoView {
    record_form_page::<Coupon>(FormMode::Edit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_order_is_checked_across_fields() {
        let schema = Coupon::schema();
        let mut values = schema.defaults();
        values.insert("code".into(), "EID2026".into());
        values.insert("discount_percent".into(), "15".into());
        values.insert("valid_from".into(), "2026-04-01".into());
        values.insert("valid_to".into(), "2026-03-01".into());

        let errors = schema.validate(&values);
        assert_eq!(errors.first_field(), Some("valid_to"));

        values.insert("valid_to".into(), "2026-04-30".into());
        assert!(schema.validate(&values).is_empty());
    }

    #[test]
    fn test_product_list_is_optional() {
        assert_eq!(Coupon::schema().lookups(), vec![(Lookup::PRODUCTS, false)]);
    }
}
