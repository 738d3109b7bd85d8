use serde::{de::DeserializeOwned, Serialize};

use crate::shared::metadata::ValidationErrors;
use crate::system::routes::ScreenRoute;

/// A foreign key held by an aggregate: the referenced record must exist
/// in `collection` before the aggregate can be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub collection: &'static str,
    pub id: String,
    pub field: &'static str,
    pub label: &'static str,
}

impl Reference {
    pub fn new(
        collection: &'static str,
        field: &'static str,
        label: &'static str,
        id: impl Into<String>,
    ) -> Self {
        Self {
            collection,
            id: id.into(),
            field,
            label,
        }
    }
}

/// Trait implemented by every back-office record type.
///
/// The implementing struct is the DTO: the attribute bag the form submits
/// and the backend validates. Stored records wrap it in [`super::Record`].
pub trait AggregateRoot:
    Clone + Default + Serialize + DeserializeOwned + Send + Sync + 'static
{
    // ============================================================================
    // Class metadata
    // ============================================================================

    /// Index of the aggregate in the system (e.g. "a001")
    fn aggregate_index() -> &'static str;

    /// Collection name, used both as the REST segment and the storage key
    /// (e.g. "branches" -> `/api/branches`)
    fn collection_name() -> &'static str;

    /// UI name of a single element (e.g. "Branch")
    fn element_name() -> &'static str;

    /// UI name of the list (e.g. "Branches")
    fn list_name() -> &'static str;

    /// Guarded module route whose capabilities cover this aggregate
    fn route() -> &'static ScreenRoute;

    // ============================================================================
    // Instance behaviour
    // ============================================================================

    /// Human readable label used in lookups and toasts
    fn label(&self) -> String;

    /// Field level and cross-field validation
    fn validate(&self) -> Result<(), ValidationErrors>;

    /// Values that must be unique across the collection, as (field, value)
    fn unique_keys(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    /// Records this aggregate points to
    fn references(&self) -> Vec<Reference> {
        Vec::new()
    }

    /// Hook for an update: copy over fields the generic update must not change
    fn preserve_on_update(&mut self, _stored: &Self) {}

    // ============================================================================
    // Default implementations
    // ============================================================================

    /// Full system name of the aggregate (e.g. "a001_branches")
    fn full_name() -> String {
        format!("{}_{}", Self::aggregate_index(), Self::collection_name())
    }

    /// REST path of the collection (e.g. "/api/branches")
    fn api_path() -> String {
        format!("/api/{}", Self::collection_name())
    }
}
