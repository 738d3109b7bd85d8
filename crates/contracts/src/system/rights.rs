//! Capability records and the per-user permission table.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::routes::SCREEN_ROUTES;

/// Stored value of a single capability: `"1"` or `"0"`.
/// An absent flag is represented by `None` at the record level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RightFlag {
    #[serde(rename = "1")]
    Granted,
    #[serde(rename = "0")]
    Denied,
}

impl RightFlag {
    pub fn as_str(&self) -> &'static str {
        match self {
            RightFlag::Granted => "1",
            RightFlag::Denied => "0",
        }
    }

    /// Parse a stored column value. Anything other than "1" or "0" is absent.
    pub fn from_db(value: &str) -> Option<Self> {
        match value.trim() {
            "1" => Some(RightFlag::Granted),
            "0" => Some(RightFlag::Denied),
            _ => None,
        }
    }

    pub fn from_bool(granted: bool) -> Self {
        if granted {
            RightFlag::Granted
        } else {
            RightFlag::Denied
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    View,
    Create,
    Edit,
    Delete,
}

impl Capability {
    pub const ALL: [Capability; 4] = [
        Capability::View,
        Capability::Create,
        Capability::Edit,
        Capability::Delete,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Capability::View => "View",
            Capability::Create => "Create",
            Capability::Edit => "Edit",
            Capability::Delete => "Delete",
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            Capability::View => "can_view",
            Capability::Create => "can_create",
            Capability::Edit => "can_edit",
            Capability::Delete => "can_delete",
        }
    }
}

/// The four capability flags of one route for one user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_view: Option<RightFlag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_create: Option<RightFlag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_edit: Option<RightFlag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_delete: Option<RightFlag>,
}

impl CapabilityRecord {
    pub fn all_granted() -> Self {
        Self {
            can_view: Some(RightFlag::Granted),
            can_create: Some(RightFlag::Granted),
            can_edit: Some(RightFlag::Granted),
            can_delete: Some(RightFlag::Granted),
        }
    }

    pub fn flag(&self, capability: Capability) -> Option<RightFlag> {
        match capability {
            Capability::View => self.can_view,
            Capability::Create => self.can_create,
            Capability::Edit => self.can_edit,
            Capability::Delete => self.can_delete,
        }
    }

    pub fn set(&mut self, capability: Capability, flag: Option<RightFlag>) {
        match capability {
            Capability::View => self.can_view = flag,
            Capability::Create => self.can_create = flag,
            Capability::Edit => self.can_edit = flag,
            Capability::Delete => self.can_delete = flag,
        }
    }

    /// Only an explicit "1" grants; "0" and absent both deny.
    pub fn allows(&self, capability: Capability) -> bool {
        self.flag(capability) == Some(RightFlag::Granted)
    }

    pub fn allows_all(&self, required: &[Capability]) -> bool {
        required.iter().all(|c| self.allows(*c))
    }

    pub fn is_empty(&self) -> bool {
        Capability::ALL.iter().all(|c| self.flag(*c).is_none())
    }
}

/// Route path -> capability record for the signed-in user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionTable(pub BTreeMap<String, CapabilityRecord>);

impl PermissionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every catalogued route fully granted.
    pub fn admin() -> Self {
        Self(
            SCREEN_ROUTES
                .iter()
                .map(|r| (r.path.to_string(), CapabilityRecord::all_granted()))
                .collect(),
        )
    }

    pub fn get(&self, route: &str) -> Option<&CapabilityRecord> {
        self.0.get(route)
    }

    pub fn insert(&mut self, route: impl Into<String>, record: CapabilityRecord) {
        self.0.insert(route.into(), record);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One stored row of a user's rights, as edited on the permission matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRightRow {
    pub route: String,
    #[serde(flatten)]
    pub rights: CapabilityRecord,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRightsDto {
    pub user_id: String,
    pub rows: Vec<UserRightRow>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_serialize_as_strings() {
        let record = CapabilityRecord {
            can_view: Some(RightFlag::Granted),
            can_edit: Some(RightFlag::Denied),
            ..Default::default()
        };
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"can_view":"1","can_edit":"0"}"#);

        let back: CapabilityRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_only_granted_allows() {
        let record = CapabilityRecord {
            can_view: Some(RightFlag::Granted),
            can_edit: Some(RightFlag::Denied),
            ..Default::default()
        };
        assert!(record.allows(Capability::View));
        assert!(!record.allows(Capability::Edit));
        assert!(!record.allows(Capability::Create));
        assert!(!record.allows_all(&[Capability::View, Capability::Create]));
    }

    #[test]
    fn test_admin_table_covers_catalog() {
        let table = PermissionTable::admin();
        assert_eq!(table.len(), SCREEN_ROUTES.len());
        assert!(table
            .get("/orders/order-list")
            .is_some_and(|r| r.allows(Capability::Delete)));
    }

    #[test]
    fn test_from_db() {
        assert_eq!(RightFlag::from_db("1"), Some(RightFlag::Granted));
        assert_eq!(RightFlag::from_db("0"), Some(RightFlag::Denied));
        assert_eq!(RightFlag::from_db(""), None);
    }
}
