pub mod schema;
pub mod view;

pub use schema::{
    aggregate_rule, FieldDef, FieldKind, FormSchema, FormValues, Lookup, OptionSource,
    SelectOption,
};
pub use view::SchemaForm;
