//! Common types and traits for all aggregates

pub mod aggregate_root;
pub mod entity_metadata;
pub mod record;

// Re-exports
pub use aggregate_root::{AggregateRoot, Reference};
pub use entity_metadata::EntityMetadata;
pub use record::Record;
