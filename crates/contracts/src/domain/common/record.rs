use serde::{Deserialize, Serialize};

use super::{AggregateRoot, EntityMetadata};

/// Stored record: the aggregate's fields flattened together with `id` and
/// the lifecycle metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound = "A: AggregateRoot")]
pub struct Record<A> {
    pub id: String,
    #[serde(flatten)]
    pub data: A,
    #[serde(flatten)]
    pub metadata: EntityMetadata,
}

impl<A: AggregateRoot> Record<A> {
    pub fn new(id: impl Into<String>, data: A, created_by: Option<String>) -> Self {
        Self {
            id: id.into(),
            data,
            metadata: EntityMetadata::new(created_by),
        }
    }

    pub fn label(&self) -> String {
        self.data.label()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a004_courier::Courier;

    #[test]
    fn test_record_wire_shape_is_flat() {
        let courier = Courier {
            name: "TCS".into(),
            code: "TCS".into(),
            tracking_url: None,
            is_active: true,
        };
        let record = Record::new("c-1", courier, Some("admin".into()));
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["id"], "c-1");
        assert_eq!(json["name"], "TCS");
        assert_eq!(json["created_by"], "admin");
        assert!(json.get("data").is_none());
        assert!(json.get("metadata").is_none());

        let back: Record<Courier> = serde_json::from_value(json).unwrap();
        assert_eq!(back.data.code, "TCS");
        assert_eq!(back.metadata.created_by.as_deref(), Some("admin"));
    }
}
