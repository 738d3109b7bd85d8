//! Declarative form schema: fields, rules, visibility and payload shaping.
//!
//! Values are kept as the raw strings of the inputs. Validation and shaping
//! only look at fields whose visibility predicate holds for the current
//! values; hidden fields never reach the payload.

use std::collections::BTreeMap;

use contracts::domain::common::AggregateRoot;
use contracts::shared::metadata::{parse_date, FieldError, ValidationErrors, ValidationRules};
use serde_json::{Map, Number, Value};

use crate::shared::query::{Query, QueryKey};

pub type FormValues = BTreeMap<String, String>;

/// Predicate over the current values deciding whether a field is shown
pub type Visibility = fn(&FormValues) -> bool;

/// Check over the shaped payload, run once every field passes its own rules
pub type CrossRule = fn(&Value) -> Vec<FieldError>;

/// A reference list read from the backend as `{id, label}` items
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lookup {
    pub resource: &'static str,
    pub path: &'static str,
}

impl Lookup {
    pub const BRANCHES: Lookup = Lookup::new("branches", "/api/branches/lookup");
    pub const PRODUCTS: Lookup = Lookup::new("products", "/api/products/lookup");
    pub const COURIERS: Lookup = Lookup::new("couriers", "/api/couriers/lookup");
    pub const USERS: Lookup = Lookup::new("users", "/api/system/users/lookup");

    pub const fn new(resource: &'static str, path: &'static str) -> Self {
        Self { resource, path }
    }

    pub fn query(&self) -> Query {
        Query::new(QueryKey::new(self.resource).with("lookup"), self.path)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum OptionSource {
    Static(Vec<SelectOption>),
    Reference(Lookup),
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Text,
    Email,
    Password,
    TextArea,
    Date,
    Number { integer: bool },
    Checkbox,
    Select(OptionSource),
}

/// Whole numbers must survive the conversion to `i64` unchanged
fn fits_i64(n: f64) -> bool {
    const BOUND: f64 = 9_223_372_036_854_775_808.0;
    n.is_finite() && (-BOUND..BOUND).contains(&n)
}

#[derive(Debug, Clone)]
pub struct FieldDef {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub rules: ValidationRules,
    pub visible: Option<Visibility>,
    pub default: Option<&'static str>,
    pub hint: Option<&'static str>,
}

impl FieldDef {
    pub fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            rules: ValidationRules::none(),
            visible: None,
            default: None,
            hint: None,
        }
    }

    pub fn text(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Text)
    }

    pub fn integer(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Number { integer: true })
    }

    pub fn decimal(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Number { integer: false })
    }

    pub fn checkbox(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Checkbox)
    }

    pub fn date(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Date)
    }

    pub fn reference(name: &'static str, label: &'static str, lookup: Lookup) -> Self {
        Self::new(name, label, FieldKind::Select(OptionSource::Reference(lookup)))
    }

    pub fn options(name: &'static str, label: &'static str, options: Vec<SelectOption>) -> Self {
        Self::new(name, label, FieldKind::Select(OptionSource::Static(options)))
    }

    pub fn rules(mut self, rules: ValidationRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn visible_when(mut self, predicate: Visibility) -> Self {
        self.visible = Some(predicate);
        self
    }

    pub fn default_value(mut self, value: &'static str) -> Self {
        self.default = Some(value);
        self
    }

    pub fn hint(mut self, hint: &'static str) -> Self {
        self.hint = Some(hint);
        self
    }

    pub fn is_visible(&self, values: &FormValues) -> bool {
        self.visible.map_or(true, |p| p(values))
    }

    pub fn lookup(&self) -> Option<Lookup> {
        match &self.kind {
            FieldKind::Select(OptionSource::Reference(lookup)) => Some(*lookup),
            _ => None,
        }
    }

    /// Check one raw input against the field's kind and rules
    pub fn validate(&self, raw: &str) -> Result<(), String> {
        let value = raw.trim();
        match &self.kind {
            FieldKind::Checkbox => Ok(()),
            FieldKind::Number { integer } => {
                if value.is_empty() {
                    return self.rules.validate_string(value, self.label);
                }
                let number = value
                    .parse::<f64>()
                    .ok()
                    .filter(|n| n.is_finite())
                    .ok_or_else(|| format!("{} must be a number", self.label))?;
                if *integer && number.fract() != 0.0 {
                    return Err(format!("{} must be a whole number", self.label));
                }
                if *integer && !fits_i64(number) {
                    return Err(format!("{} is too large", self.label));
                }
                self.rules.validate_number(number, self.label)
            }
            FieldKind::Date => {
                self.rules.validate_string(value, self.label)?;
                if !value.is_empty() {
                    parse_date(value, self.label)?;
                }
                Ok(())
            }
            FieldKind::Email => {
                self.rules.validate_string(value, self.label)?;
                if !value.is_empty() && !value.contains('@') {
                    return Err(format!("{} must be a valid email address", self.label));
                }
                Ok(())
            }
            _ => self.rules.validate_string(value, self.label),
        }
    }

    fn shape(&self, raw: &str) -> Value {
        let value = raw.trim();
        match &self.kind {
            FieldKind::Checkbox => Value::Bool(value == "true"),
            _ if value.is_empty() => Value::Null,
            FieldKind::Number { integer: true } => value
                .parse::<f64>()
                .ok()
                .filter(|n| fits_i64(*n))
                .map(|n| Value::Number(Number::from(n as i64)))
                .unwrap_or(Value::Null),
            FieldKind::Number { integer: false } => value
                .parse::<f64>()
                .ok()
                .and_then(Number::from_f64)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            _ => Value::String(value.to_string()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FormSchema {
    pub fields: Vec<FieldDef>,
    pub cross_rules: Vec<CrossRule>,
}

impl FormSchema {
    pub fn new(fields: Vec<FieldDef>) -> Self {
        Self {
            fields,
            cross_rules: Vec::new(),
        }
    }

    pub fn cross_rule(mut self, rule: CrossRule) -> Self {
        self.cross_rules.push(rule);
        self
    }

    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn visible_fields<'a>(&'a self, values: &'a FormValues) -> impl Iterator<Item = &'a FieldDef> + 'a {
        self.fields.iter().filter(move |f| f.is_visible(values))
    }

    /// Reference lists the form reads, with whether the form needs them filled
    pub fn lookups(&self) -> Vec<(Lookup, bool)> {
        let mut lookups: Vec<(Lookup, bool)> = Vec::new();
        for field in &self.fields {
            if let Some(lookup) = field.lookup() {
                let required = field.rules.is_required() && field.visible.is_none();
                match lookups.iter_mut().find(|(l, _)| *l == lookup) {
                    Some((_, r)) => *r |= required,
                    None => lookups.push((lookup, required)),
                }
            }
        }
        lookups
    }

    /// Starting values of an add form
    pub fn defaults(&self) -> FormValues {
        self.fields
            .iter()
            .map(|f| {
                let value = match (f.default, &f.kind) {
                    (Some(value), _) => value.to_string(),
                    (None, FieldKind::Checkbox) => "false".to_string(),
                    (None, _) => String::new(),
                };
                (f.name.to_string(), value)
            })
            .collect()
    }

    /// Starting values of an edit form, read from a stored record
    pub fn values_from(&self, record: &Value) -> FormValues {
        let mut values = self.defaults();
        for field in &self.fields {
            let raw = match record.get(field.name) {
                Some(Value::String(s)) => s.clone(),
                Some(Value::Bool(b)) => b.to_string(),
                Some(Value::Number(n)) => n.to_string(),
                _ => continue,
            };
            values.insert(field.name.to_string(), raw);
        }
        values
    }

    pub fn validate_field(&self, name: &str, values: &FormValues) -> Result<(), String> {
        match self.field(name) {
            Some(field) if field.is_visible(values) => {
                field.validate(values.get(name).map(String::as_str).unwrap_or_default())
            }
            _ => Ok(()),
        }
    }

    /// Field rules of every visible field in form order, then cross-field rules
    pub fn validate(&self, values: &FormValues) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        for field in self.visible_fields(values) {
            let raw = values.get(field.name).map(String::as_str).unwrap_or_default();
            errors.check(field.name, field.validate(raw));
        }
        if errors.is_empty() {
            let payload = self.payload(values);
            for rule in &self.cross_rules {
                for error in rule(&payload) {
                    errors.add(error.field, error.message);
                }
            }
        }
        errors
    }

    /// JSON body of the submit; hidden fields are left out entirely
    pub fn payload(&self, values: &FormValues) -> Value {
        let mut body = Map::new();
        for field in self.visible_fields(values) {
            let raw = values.get(field.name).map(String::as_str).unwrap_or_default();
            body.insert(field.name.to_string(), field.shape(raw));
        }
        Value::Object(body)
    }
}

/// Cross-field rule running the record's own validation on the payload
pub fn aggregate_rule<A: AggregateRoot>(payload: &Value) -> Vec<FieldError> {
    match serde_json::from_value::<A>(payload.clone()) {
        Ok(aggregate) => aggregate.validate().err().map(|e| e.errors).unwrap_or_default(),
        Err(e) => {
            log::warn!("{} payload does not decode: {}", A::element_name(), e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a002_agent::Agent;
    use contracts::domain::a007_coupon::Coupon;
    use serde_json::json;

    fn is_affiliate(values: &FormValues) -> bool {
        values.get("is_affiliate").map(String::as_str) == Some("true")
    }

    fn agent_schema() -> FormSchema {
        FormSchema::new(vec![
            FieldDef::text("full_name", "Full name").rules(ValidationRules::required()),
            FieldDef::new("email", "Email", FieldKind::Email).rules(ValidationRules::required()),
            FieldDef::text("phone", "Phone").rules(ValidationRules::required()),
            FieldDef::reference("branch_id", "Branch", Lookup::BRANCHES)
                .rules(ValidationRules::required()),
            FieldDef::decimal("commission_rate", "Commission rate")
                .rules(ValidationRules::required().with_range(0.0, 100.0)),
            FieldDef::checkbox("is_affiliate", "Affiliate"),
            FieldDef::integer("affiliate_id", "Affiliate ID")
                .rules(ValidationRules::required().with_min(1.0))
                .visible_when(is_affiliate),
        ])
        .cross_rule(aggregate_rule::<Agent>)
    }

    fn values(pairs: &[(&str, &str)]) -> FormValues {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn valid_agent() -> FormValues {
        values(&[
            ("full_name", "Sana Malik"),
            ("email", "sana@broker.pk"),
            ("phone", "03001234567"),
            ("branch_id", "b-1"),
            ("commission_rate", "12.5"),
            ("is_affiliate", "false"),
            ("affiliate_id", "42"),
        ])
    }

    #[test]
    fn test_hidden_field_is_dropped_from_payload() {
        let schema = agent_schema();
        let payload = schema.payload(&valid_agent());

        assert!(payload.get("affiliate_id").is_none());
        assert_eq!(payload["is_affiliate"], json!(false));
        assert_eq!(payload["commission_rate"], json!(12.5));
        assert!(schema.validate(&valid_agent()).is_empty());
    }

    #[test]
    fn test_visible_field_is_validated_and_shaped() {
        let schema = agent_schema();
        let mut input = valid_agent();
        input.insert("is_affiliate".into(), "true".into());
        input.insert("affiliate_id".into(), "".into());

        let errors = schema.validate(&input);
        assert_eq!(errors.first_field(), Some("affiliate_id"));
        assert_eq!(errors.first_message(), Some("Affiliate ID is required"));

        input.insert("affiliate_id".into(), "42".into());
        assert!(schema.validate(&input).is_empty());
        assert_eq!(schema.payload(&input)["affiliate_id"], json!(42));
    }

    #[test]
    fn test_field_errors_follow_form_order() {
        let schema = agent_schema();
        let mut input = valid_agent();
        input.insert("full_name".into(), " ".into());
        input.insert("commission_rate".into(), "abc".into());

        let errors = schema.validate(&input);
        assert_eq!(errors.errors.len(), 2);
        assert_eq!(errors.first_field(), Some("full_name"));
        assert_eq!(errors.get("commission_rate"), Some("Commission rate must be a number"));
    }

    #[test]
    fn test_empty_optional_becomes_null() {
        let schema = FormSchema::new(vec![
            FieldDef::text("code", "Code").rules(ValidationRules::required()),
            FieldDef::reference("product_id", "Product", Lookup::PRODUCTS),
        ]);
        let payload = schema.payload(&values(&[("code", "EID25"), ("product_id", "")]));
        assert_eq!(payload, json!({"code": "EID25", "product_id": null}));
    }

    #[test]
    fn test_whole_number_outside_i64_is_rejected() {
        let field = FieldDef::integer("max_uses", "Max uses");
        assert_eq!(field.validate("1e20"), Err("Max uses is too large".to_string()));
        assert_eq!(field.validate("inf"), Err("Max uses must be a number".to_string()));
        assert_eq!(field.validate("1e3"), Ok(()));

        let schema = FormSchema::new(vec![field]);
        assert_eq!(
            schema.payload(&values(&[("max_uses", "1e20")])),
            json!({"max_uses": null})
        );
        assert_eq!(
            schema.payload(&values(&[("max_uses", "250")])),
            json!({"max_uses": 250})
        );
    }

    #[test]
    fn test_cross_field_rule_runs_after_field_rules() {
        let schema = FormSchema::new(vec![
            FieldDef::text("code", "Code").rules(ValidationRules::required()),
            FieldDef::integer("discount_percent", "Discount").rules(ValidationRules::required()),
            FieldDef::date("valid_from", "Valid from").rules(ValidationRules::required()),
            FieldDef::date("valid_to", "Valid to").rules(ValidationRules::required()),
            FieldDef::integer("max_uses", "Max uses").rules(ValidationRules::required()),
        ])
        .cross_rule(aggregate_rule::<Coupon>);

        let mut input = values(&[
            ("code", "EID25"),
            ("discount_percent", "25"),
            ("valid_from", "2025-06-10"),
            ("valid_to", "2025-06-01"),
            ("max_uses", "100"),
        ]);
        let errors = schema.validate(&input);
        assert_eq!(errors.first_field(), Some("valid_to"));

        input.insert("valid_to".into(), "June".into());
        assert_eq!(
            schema.validate(&input).first_message(),
            Some("Valid to must be a date (YYYY-MM-DD)")
        );
    }

    #[test]
    fn test_values_from_record() {
        let schema = agent_schema();
        let record = json!({
            "id": "a-1",
            "full_name": "Sana Malik",
            "commission_rate": 10,
            "is_affiliate": true,
            "affiliate_id": null
        });
        let values = schema.values_from(&record);
        assert_eq!(values["full_name"], "Sana Malik");
        assert_eq!(values["commission_rate"], "10");
        assert_eq!(values["is_affiliate"], "true");
        assert_eq!(values["affiliate_id"], "");
        assert_eq!(schema.lookups(), vec![(Lookup::BRANCHES, true)]);
    }
}
