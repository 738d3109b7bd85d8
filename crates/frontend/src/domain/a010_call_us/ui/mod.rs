use contracts::domain::a010_call_us::*;
use contracts::domain::common::{AggregateRoot, Record};
use contracts::system::rights::Capability;
use leptos::prelude::*;
use serde_json::json;
use thaw::*;

use crate::shared::crud::{
    list_query, mutation_plan, or_dash, record_form_page, record_list_page_with, FormMode,
    ListOptions, ResourceScreen,
};
use crate::shared::form::{aggregate_rule, FieldDef, FieldKind, FormSchema};
use crate::shared::mutation::use_mutation;
use crate::shared::query::{use_query, Query};
use crate::shared::request::Method;
use crate::shared::table::Column;
use crate::system::rights::use_rights;

/// Listing of one status tab; `None` is the tab with every request
pub fn call_us_query(status: Option<CallUsStatus>) -> Query {
    let mut query = list_query::<CallUsRequest>();
    if let Some(status) = status {
        query.key = query.key.with(status.code());
        query.path = format!("{}?status={}", query.path, status.code());
    }
    query
}

/// Statuses a request can be moved to from `current`
pub fn next_statuses(current: CallUsStatus) -> Vec<CallUsStatus> {
    CallUsStatus::ALL
        .into_iter()
        .filter(|s| *s != current)
        .collect()
}

impl ResourceScreen for CallUsRequest {
    fn columns() -> Vec<Column> {
        vec![
            Column::new("name", "Name").sortable(),
            Column::new("phone", "Phone"),
            Column::new("topic", "Topic").sortable().multi_select(),
            Column::new("note", "Note"),
            Column::new("status", "Status").multi_select(),
            Column::new("created_at", "Received").sortable(),
        ]
    }

    fn cell(&self, key: &str) -> String {
        match key {
            "name" => self.name.clone(),
            "phone" => self.phone.clone(),
            "topic" => self.topic.clone(),
            "note" => or_dash(self.note.as_deref()),
            "status" => self.status.label().to_string(),
            _ => String::new(),
        }
    }

    fn schema() -> FormSchema {
        FormSchema::new(vec![
            FieldDef::text("name", "Name").rules(NAME_RULES),
            FieldDef::text("phone", "Phone").rules(PHONE_RULES),
            FieldDef::text("topic", "Topic").rules(TOPIC_RULES),
            FieldDef::new("note", "Note", FieldKind::TextArea).rules(NOTE_RULES),
        ])
        .cross_rule(aggregate_rule::<CallUsRequest>)
    }
}

#[component]
fn StatusTabs(selected: RwSignal<Option<CallUsStatus>>) -> impl IntoView {
    let tabs: Vec<(Option<CallUsStatus>, &'static str)> = std::iter::once((None, "All"))
        .chain(CallUsStatus::ALL.into_iter().map(|s| (Some(s), s.label())))
        .collect();

    view! {
        <ButtonGroup>
            {tabs
                .into_iter()
                .map(|(status, label)| {
                    view! {
                        <Button
                            size=ButtonSize::Small
                            appearance=Signal::derive(move || {
                                if selected.get() == status {
                                    ButtonAppearance::Primary
                                } else {
                                    ButtonAppearance::Secondary
                                }
                            })
                            on_click=move |_| selected.set(status)
                        >
                            {label}
                        </Button>
                    }
                })
                .collect_view()}
        </ButtonGroup>
    }
}

#[component]
pub fn CallUsList() -> impl IntoView {
    let rights = use_rights(CallUsRequest::route().path);
    let selected = RwSignal::new(Some(CallUsStatus::Pending));
    let query = Signal::derive(move || call_us_query(selected.get()));
    let requests = use_query::<Vec<Record<CallUsRequest>>, _>(move || {
        rights.get().allows(Capability::View).then(|| query.get())
    });
    // every status tab shares the "call-us" prefix
    let change = use_mutation(mutation_plan::<CallUsRequest>(None));

    let row_actions = Callback::new(move |id: String| {
        let current = requests
            .data()
            .and_then(|rows| rows.into_iter().find(|r| r.id == id))
            .map(|r| r.data.status)
            .unwrap_or_default();
        let can_edit = rights.get_untracked().allows(Capability::Edit);

        next_statuses(current)
            .into_iter()
            .map(|next| {
                let id = id.clone();
                view! {
                    <Button
                        appearance=ButtonAppearance::Subtle
                        size=ButtonSize::Small
                        disabled=Signal::derive(move || !can_edit || change.is_submitting())
                        on_click=move |_| {
                            change.submit(
                                Method::Post,
                                format!("{}/{}/status", CallUsRequest::api_path(), id),
                                Some(json!({ "status": next })),
                            )
                        }
                    >
                        {next.label()}
                    </Button>
                }
            })
            .collect_view()
            .into_any()
    });

    record_list_page_with::<CallUsRequest>(ListOptions {
        query: Some(query),
        row_actions: Some(row_actions),
        toolbar: Some(ViewFn::from(move || view! { <StatusTabs selected=selected /> })),
    })
}

#[component]
pub fn CallUsAdd() -> impl IntoView {
    record_form_page::<CallUsRequest>(FormMode::Add)
}

#[component]
pub fn CallUsEdit() -> impl IntoView {
    record_form_page::<CallUsRequest>(FormMode::Edit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_queries() {
        let all = call_us_query(None);
        assert_eq!(all.key.to_string(), "call-us/list");
        assert_eq!(all.path, "/api/call-us");

        let pending = call_us_query(Some(CallUsStatus::Pending));
        assert_eq!(pending.key.to_string(), "call-us/list/pending");
        assert_eq!(pending.path, "/api/call-us?status=pending");
    }

    #[test]
    fn test_status_change_invalidates_every_tab() {
        let plan = mutation_plan::<CallUsRequest>(None);
        for status in [None, Some(CallUsStatus::Contacted), Some(CallUsStatus::Closed)] {
            let key = call_us_query(status).key;
            assert!(plan.invalidate.iter().any(|i| i.matches(&key)));
        }
    }

    #[test]
    fn test_any_status_can_move_to_any_other() {
        assert_eq!(
            next_statuses(CallUsStatus::Closed),
            vec![CallUsStatus::Pending, CallUsStatus::Contacted]
        );
    }
}
