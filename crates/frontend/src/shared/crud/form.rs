use std::collections::BTreeMap;

use contracts::shared::api::LookupItem;
use contracts::system::rights::Capability;
use leptos::prelude::*;
use leptos_router::hooks::use_params_map;
use serde_json::Value;

use super::traits::{mutation_plan, ResourceScreen};
use crate::shared::api_utils::item_path;
use crate::shared::form::{FormSchema, Lookup, SchemaForm};
use crate::shared::mutation::use_mutation;
use crate::shared::navigation::use_navigator;
use crate::shared::query::{use_query, Query, QueryHandle};
use crate::shared::request::Method;
use crate::shared::screen::{reduce, Dependency, GuardedScreen, ScreenInputs};
use crate::system::rights::use_rights;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Add,
    Edit,
}

impl FormMode {
    pub fn required(&self) -> &'static [Capability] {
        match self {
            FormMode::Add => &[Capability::Create],
            FormMode::Edit => &[Capability::Edit],
        }
    }
}

/// Reference lists of a form, subscribed only while `enabled` holds
#[derive(Clone, Copy)]
pub struct LookupSet {
    handles: StoredValue<Vec<(Lookup, bool, QueryHandle<Vec<LookupItem>>)>>,
}

impl LookupSet {
    pub fn new(lookups: Vec<(Lookup, bool)>, enabled: Signal<bool>) -> Self {
        let handles = lookups
            .into_iter()
            .map(|(lookup, required)| {
                let handle = use_query::<Vec<LookupItem>, _>(move || {
                    enabled.get().then(|| lookup.query())
                });
                (lookup, required, handle)
            })
            .collect();
        Self {
            handles: StoredValue::new(handles),
        }
    }

    pub fn dependencies(&self) -> Vec<Dependency> {
        self.handles.with_value(|handles| {
            handles
                .iter()
                .map(|(_, required, handle)| match required {
                    true => Dependency::required_list(handle.status()),
                    false => Dependency::data(handle.status()),
                })
                .collect()
        })
    }

    /// Loaded items keyed by resource, as the form widgets read them
    pub fn loaded(&self) -> Signal<BTreeMap<String, Vec<LookupItem>>> {
        let handles = self.handles;
        Signal::derive(move || {
            handles.with_value(|handles| {
                handles
                    .iter()
                    .filter_map(|(lookup, _, handle)| {
                        handle.data().map(|items| (lookup.resource.to_string(), items))
                    })
                    .collect()
            })
        })
    }
}

/// Single-record query of an edit screen. Without the edit right there is
/// no query, so a denied screen never fetches the record.
pub fn entity_query<A: ResourceScreen>(allowed: bool, id: Option<&str>) -> Option<Query> {
    if !allowed {
        return None;
    }
    id.map(|id| Query::new(A::item_key(id), item_path(&A::api_path(), id)))
}

/// Add and edit screen of a record module. The edit id comes from the
/// `:id` route segment.
pub fn record_form_page<A: ResourceScreen>(mode: FormMode) -> impl IntoView {
    let route = A::route();
    let rights = use_rights(route.path);
    let params = use_params_map();
    let id = Memo::new(move |_| match mode {
        FormMode::Add => None,
        FormMode::Edit => params.read().get("id").filter(|id| !id.trim().is_empty()),
    });
    let allowed = Signal::derive(move || rights.get().allows_all(mode.required()));

    let schema = StoredValue::new(A::schema());
    let lookups = LookupSet::new(schema.with_value(FormSchema::lookups), allowed);
    let entity =
        use_query::<Value, _>(move || entity_query::<A>(allowed.get(), id.get().as_deref()));

    let state = Signal::derive(move || {
        let mut dependencies = lookups.dependencies();
        if mode == FormMode::Edit {
            dependencies.push(Dependency::data(entity.status()));
        }
        reduce(&ScreenInputs {
            required: mode.required(),
            rights: &rights.get(),
            dependencies: &dependencies,
            requires_id: mode == FormMode::Edit,
            id_present: id.get().is_some(),
        })
    });

    let save = use_mutation(mutation_plan::<A>(Some(route.path)));
    let navigate = use_navigator();
    let on_submit = Callback::new(move |payload: Value| match id.get_untracked() {
        Some(id) => save.submit(Method::Put, item_path(&A::api_path(), &id), Some(payload)),
        None => save.submit(Method::Post, A::api_path(), Some(payload)),
    });
    let on_cancel = Callback::new(move |_: ()| navigate.run(route.path.to_string()));

    let title = match mode {
        FormMode::Add => format!("New {}", A::element_name()),
        FormMode::Edit => format!("Edit {}", A::element_name()),
    };
    let submit_label = match mode {
        FormMode::Add => "Create",
        FormMode::Edit => "Save",
    };

    view! {
        <div class="screen">
            <div class="screen__header">
                <h2>{title}</h2>
            </div>
            <GuardedScreen
                state=state
                leave_to=route.path
                not_found=format!("{} not found", A::element_name())
            >
                {move || {
                    let initial = match mode {
                        FormMode::Add => schema.with_value(FormSchema::defaults),
                        FormMode::Edit => entity
                            .data_untracked()
                            .map(|record| schema.with_value(|s| s.values_from(&record)))
                            .unwrap_or_default(),
                    };
                    view! {
                        <SchemaForm
                            schema=schema.get_value()
                            initial=initial
                            lookups=lookups.loaded()
                            submitting=Signal::derive(move || save.is_submitting())
                            submit_label=submit_label
                            on_submit=on_submit
                            on_cancel=on_cancel
                        />
                    }
                }}
            </GuardedScreen>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a002_agent::Agent;

    #[test]
    fn test_mode_capabilities() {
        assert_eq!(FormMode::Add.required(), &[Capability::Create]);
        assert_eq!(FormMode::Edit.required(), &[Capability::Edit]);
    }

    #[test]
    fn test_denied_edit_issues_no_record_fetch() {
        assert_eq!(entity_query::<Agent>(false, Some("a-1")), None);
        assert_eq!(entity_query::<Agent>(true, None), None);

        let query = entity_query::<Agent>(true, Some("a-1")).unwrap();
        assert_eq!(query.key.to_string(), "agents/item/a-1");
        assert_eq!(query.path, "/api/agents/a-1");
    }
}
