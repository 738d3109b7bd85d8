use contracts::domain::common::{AggregateRoot, Record};
use contracts::system::rights::Capability;
use leptos::prelude::*;
use thaw::*;

use super::form::LookupSet;
use super::traits::{mutation_plan, ListRow, ResourceScreen};
use crate::shared::api_utils::item_path;
use crate::shared::mutation::use_mutation;
use crate::shared::navigation::{add_path, edit_path, use_navigator};
use crate::shared::query::{use_query, Query, QueryKey};
use crate::shared::request::Method;
use crate::shared::screen::{reduce, Dependency, GuardedScreen, ScreenInputs, HOME_PATH};
use crate::shared::table::DataTable;
use crate::system::rights::use_rights;

/// Cached listing of a record module
pub fn list_query<A: AggregateRoot>() -> Query {
    Query::new(
        QueryKey::new(A::collection_name()).with("list"),
        A::api_path(),
    )
}

/// Module specific additions to the standard listing
#[derive(Default)]
pub struct ListOptions {
    /// Replaces the plain listing query, e.g. with a filtered one
    pub query: Option<Signal<Query>>,
    pub row_actions: Option<Callback<String, AnyView>>,
    /// Rendered next to the add button
    pub toolbar: Option<ViewFn>,
}

/// Standard listing: table, add button, open on click and delete behind a
/// confirmation
pub fn record_list_page<A: ResourceScreen>() -> impl IntoView {
    record_list_page_with::<A>(ListOptions::default())
}

pub fn record_list_page_with<A: ResourceScreen>(options: ListOptions) -> impl IntoView {
    let ListOptions {
        query,
        row_actions,
        toolbar,
    } = options;
    let route = A::route();
    let rights = use_rights(route.path);
    let list = use_query::<Vec<Record<A>>, _>(move || {
        if !rights.get().allows(Capability::View) {
            return None;
        }
        Some(match query {
            Some(query) => query.get(),
            None => list_query::<A>(),
        })
    });

    let state = Signal::derive(move || {
        let dependencies = [Dependency::data(list.status())];
        reduce(&ScreenInputs {
            required: &[Capability::View],
            rights: &rights.get(),
            dependencies: &dependencies,
            requires_id: false,
            id_present: false,
        })
    });

    let labels = LookupSet::new(
        A::reference_columns()
            .into_iter()
            .map(|(_, lookup)| (lookup, false))
            .collect(),
        Signal::derive(move || rights.get().allows(Capability::View)),
    )
    .loaded();
    let rows = Signal::derive(move || {
        let lookups = labels.get();
        list.data()
            .unwrap_or_default()
            .into_iter()
            .map(|record| ListRow::new(record, &lookups))
            .collect::<Vec<_>>()
    });
    let navigate = use_navigator();
    let remove = use_mutation(mutation_plan::<A>(None));
    let pending_delete = RwSignal::new(None::<String>);

    let on_add = move |_: leptos::ev::MouseEvent| navigate.run(add_path(route.path));
    let on_confirm = Callback::new(move |id: String| {
        remove.submit(Method::Delete, item_path(&A::api_path(), &id), None);
    });

    view! {
        <div class="screen">
            <div class="screen__header">
                <h2>{A::list_name()}</h2>
                <div class="screen__spacer"></div>
                <Show when=move || rights.get().allows(Capability::View)>
                    {toolbar.clone().map(|toolbar| toolbar.run())}
                </Show>
                <Show when=move || rights.get().allows(Capability::Create)>
                    <Button appearance=ButtonAppearance::Primary on_click=on_add>
                        {format!("Add {}", A::element_name())}
                    </Button>
                </Show>
            </div>
            <GuardedScreen state=state leave_to=HOME_PATH>
                {move || {
                    let record = rights.get();
                    let on_open = record
                        .allows(Capability::Edit)
                        .then(|| Callback::new(move |id: String| navigate.run(edit_path(route.path, &id))));
                    let on_delete = record
                        .allows(Capability::Delete)
                        .then(|| Callback::new(move |id: String| pending_delete.set(Some(id))));
                    view! {
                        <DataTable
                            rows=rows
                            columns=A::columns()
                            on_open=on_open
                            on_delete=on_delete
                            row_actions=row_actions
                            empty_text=format!("No {} yet", A::list_name().to_lowercase())
                        />
                    }
                }}
            </GuardedScreen>
            <ConfirmDelete pending=pending_delete on_confirm=on_confirm />
        </div>
    }
}

/// Confirmation asked before a delete request is sent
#[component]
pub fn ConfirmDelete(
    /// Id waiting for confirmation; `None` keeps the dialog closed
    pending: RwSignal<Option<String>>,
    on_confirm: Callback<String>,
) -> impl IntoView {
    let open = RwSignal::new(false);
    Effect::new(move |_| open.set(pending.with(|p| p.is_some())));
    Effect::new(move |_| {
        if !open.get() {
            pending.set(None);
        }
    });

    let confirm = move |_| {
        if let Some(id) = pending.get_untracked() {
            on_confirm.run(id);
        }
        pending.set(None);
    };

    view! {
        <Dialog open=open>
            <DialogSurface>
                <DialogBody>
                    <DialogTitle>"Delete record"</DialogTitle>
                    <DialogContent>"This record will be removed. Continue?"</DialogContent>
                    <DialogActions>
                        <Button appearance=ButtonAppearance::Secondary on_click=move |_| pending.set(None)>
                            "Cancel"
                        </Button>
                        <Button appearance=ButtonAppearance::Primary on_click=confirm>
                            "Delete"
                        </Button>
                    </DialogActions>
                </DialogBody>
            </DialogSurface>
        </Dialog>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_branch::Branch;

    #[test]
    fn test_list_query_is_keyed_under_the_collection() {
        let query = list_query::<Branch>();
        assert_eq!(query.key.to_string(), "branches/list");
        assert_eq!(query.path, "/api/branches");
    }
}
