use contracts::system::rights::{Capability, CapabilityRecord};

use crate::shared::query::QueryStatus;
use crate::shared::request::GENERIC_ERROR;

/// Exactly one of these is rendered by a guarded screen
#[derive(Debug, Clone, PartialEq)]
pub enum ScreenState {
    PermissionDenied,
    Loading,
    Error(String),
    Empty,
    Ready,
}

/// A query the screen waits on
#[derive(Debug, Clone, PartialEq)]
pub struct Dependency {
    pub status: QueryStatus,
    /// A reference list the form cannot work without
    pub required_list: bool,
}

impl Dependency {
    pub fn data(status: QueryStatus) -> Self {
        Self {
            status,
            required_list: false,
        }
    }

    pub fn required_list(status: QueryStatus) -> Self {
        Self {
            status,
            required_list: true,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ScreenInputs<'a> {
    pub required: &'a [Capability],
    pub rights: &'a CapabilityRecord,
    pub dependencies: &'a [Dependency],
    pub requires_id: bool,
    pub id_present: bool,
}

/// Decide the render state. Precedence: denied, loading, error, empty, ready.
pub fn reduce(inputs: &ScreenInputs<'_>) -> ScreenState {
    if !inputs.rights.allows_all(inputs.required) {
        return ScreenState::PermissionDenied;
    }

    if inputs.dependencies.iter().any(|d| d.status.is_loading()) {
        return ScreenState::Loading;
    }

    let mut failed = inputs
        .dependencies
        .iter()
        .filter_map(|d| match &d.status {
            QueryStatus::Failed(message) => Some(message.clone()),
            _ => None,
        })
        .peekable();
    if failed.peek().is_some() {
        let message = failed
            .flatten()
            .find(|m| !m.trim().is_empty())
            .unwrap_or_else(|| GENERIC_ERROR.to_string());
        return ScreenState::Error(message);
    }

    let missing_list = inputs
        .dependencies
        .iter()
        .any(|d| d.required_list && d.status.loaded_len() == Some(0));
    if missing_list || (inputs.requires_id && !inputs.id_present) {
        return ScreenState::Empty;
    }

    ScreenState::Ready
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::system::rights::RightFlag;
    use serde_json::json;

    fn rights(edit: Option<RightFlag>) -> CapabilityRecord {
        CapabilityRecord {
            can_view: Some(RightFlag::Granted),
            can_edit: edit,
            ..Default::default()
        }
    }

    fn inputs<'a>(
        required: &'a [Capability],
        rights: &'a CapabilityRecord,
        dependencies: &'a [Dependency],
    ) -> ScreenInputs<'a> {
        ScreenInputs {
            required,
            rights,
            dependencies,
            requires_id: false,
            id_present: false,
        }
    }

    #[test]
    fn test_denied_beats_loading() {
        let record = rights(Some(RightFlag::Denied));
        let deps = [Dependency::data(QueryStatus::Loading)];
        assert_eq!(
            reduce(&inputs(&[Capability::Edit], &record, &deps)),
            ScreenState::PermissionDenied
        );

        // an absent flag is a denial too
        let record = rights(None);
        assert_eq!(
            reduce(&inputs(&[Capability::Edit], &record, &deps)),
            ScreenState::PermissionDenied
        );
    }

    #[test]
    fn test_loading_beats_error() {
        let record = rights(Some(RightFlag::Granted));
        let deps = [
            Dependency::data(QueryStatus::Failed(Some("boom".into()))),
            Dependency::required_list(QueryStatus::Pending),
        ];
        assert_eq!(
            reduce(&inputs(&[Capability::Edit], &record, &deps)),
            ScreenState::Loading
        );
    }

    #[test]
    fn test_first_non_empty_error_message_wins() {
        let record = rights(Some(RightFlag::Granted));
        let deps = [
            Dependency::data(QueryStatus::Failed(None)),
            Dependency::data(QueryStatus::Failed(Some("Branch not found".into()))),
            Dependency::data(QueryStatus::Failed(Some("later".into()))),
        ];
        assert_eq!(
            reduce(&inputs(&[], &record, &deps)),
            ScreenState::Error("Branch not found".into())
        );

        let deps = [Dependency::data(QueryStatus::Failed(None))];
        assert_eq!(
            reduce(&inputs(&[], &record, &deps)),
            ScreenState::Error(GENERIC_ERROR.into())
        );
    }

    #[test]
    fn test_empty_required_list_and_missing_id() {
        let record = rights(Some(RightFlag::Granted));
        let deps = [
            Dependency::required_list(QueryStatus::Loaded(json!([]))),
            Dependency::data(QueryStatus::Loaded(json!({"id": "a"}))),
        ];
        assert_eq!(reduce(&inputs(&[], &record, &deps)), ScreenState::Empty);

        // an empty optional list is fine
        let deps = [Dependency::data(QueryStatus::Loaded(json!([])))];
        assert_eq!(reduce(&inputs(&[], &record, &deps)), ScreenState::Ready);

        let mut edit = inputs(&[Capability::Edit], &record, &[]);
        edit.requires_id = true;
        assert_eq!(reduce(&edit), ScreenState::Empty);
        edit.id_present = true;
        assert_eq!(reduce(&edit), ScreenState::Ready);
    }

    #[test]
    fn test_disabled_queries_do_not_block() {
        let record = rights(Some(RightFlag::Granted));
        let deps = [
            Dependency::data(QueryStatus::Disabled),
            Dependency::required_list(QueryStatus::Loaded(json!([{"id": "b"}]))),
        ];
        assert_eq!(
            reduce(&inputs(&[Capability::View], &record, &deps)),
            ScreenState::Ready
        );
    }
}
