use contracts::system::rights::Capability;
use contracts::system::routes::USERS;
use contracts::system::users::User;
use leptos::prelude::*;
use thaw::*;

use crate::shared::api_utils::item_path;
use crate::shared::crud::{or_dash, ConfirmDelete};
use crate::shared::mutation::{use_mutation, MutationPlan};
use crate::shared::navigation::{add_path, edit_path, use_navigator};
use crate::shared::query::{use_query, Invalidation};
use crate::shared::request::Method;
use crate::shared::screen::{reduce, Dependency, GuardedScreen, ScreenInputs, HOME_PATH};
use crate::shared::table::{Column, DataTable, Tabular};
use crate::system::rights::use_rights;
use crate::system::users::api::{users_query, RESOURCE, USERS_API};

/// Rights editor of one user
pub fn rights_editor_path(id: &str) -> String {
    item_path("/users/user-rights", id)
}

fn yes_no(value: bool) -> String {
    if value { "Yes" } else { "No" }.to_string()
}

impl Tabular for User {
    fn row_id(&self) -> String {
        self.id.clone()
    }

    fn cell(&self, key: &str) -> String {
        match key {
            "username" => self.username.clone(),
            "full_name" => or_dash(self.full_name.as_deref()),
            "email" => or_dash(self.email.as_deref()),
            "is_active" => yes_no(self.is_active),
            "is_admin" => yes_no(self.is_admin),
            "last_login_at" => or_dash(self.last_login_at.as_deref().map(|s| s.get(..16).unwrap_or(s))),
            "created_at" => self.created_at.get(..10).unwrap_or(&self.created_at).to_string(),
            _ => String::new(),
        }
    }
}

fn columns() -> Vec<Column> {
    vec![
        Column::new("username", "Username").sortable(),
        Column::new("full_name", "Full name").sortable(),
        Column::new("email", "Email"),
        Column::new("is_active", "Active").multi_select(),
        Column::new("is_admin", "Admin").multi_select(),
        Column::new("last_login_at", "Last login").sortable(),
        Column::new("created_at", "Created").sortable(),
    ]
}

#[component]
pub fn UserList() -> impl IntoView {
    let rights = use_rights(USERS.path);
    let users = use_query::<Vec<User>, _>(move || {
        rights.get().allows(Capability::View).then(users_query)
    });

    let state = Signal::derive(move || {
        reduce(&ScreenInputs {
            required: &[Capability::View],
            rights: &rights.get(),
            dependencies: &[Dependency::data(users.status())],
            requires_id: false,
            id_present: false,
        })
    });

    let rows = Signal::derive(move || users.data().unwrap_or_default());
    let navigate = use_navigator();
    let remove = use_mutation(MutationPlan::new().invalidate(Invalidation::resource(RESOURCE)));
    let pending_delete = RwSignal::new(None::<String>);
    let on_confirm = Callback::new(move |id: String| {
        remove.submit(Method::Delete, item_path(USERS_API, &id), None);
    });

    let row_actions = Callback::new(move |id: String| {
        view! {
            <Button
                appearance=ButtonAppearance::Subtle
                size=ButtonSize::Small
                on_click=move |_| navigate.run(rights_editor_path(&id))
            >
                "Rights"
            </Button>
        }
        .into_any()
    });

    view! {
        <div class="screen">
            <div class="screen__header">
                <h2>{USERS.title}</h2>
                <Show when=move || rights.get().allows(Capability::Create)>
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| navigate.run(add_path(USERS.path))
                    >
                        "Add user"
                    </Button>
                </Show>
            </div>
            <GuardedScreen state=state leave_to=HOME_PATH>
                {move || {
                    let record = rights.get();
                    let can_edit = record.allows(Capability::Edit);
                    let on_open = can_edit
                        .then(|| Callback::new(move |id: String| navigate.run(edit_path(USERS.path, &id))));
                    let on_delete = record
                        .allows(Capability::Delete)
                        .then(|| Callback::new(move |id: String| pending_delete.set(Some(id))));
                    view! {
                        <DataTable
                            rows=rows
                            columns=columns()
                            on_open=on_open
                            on_delete=on_delete
                            row_actions=can_edit.then_some(row_actions)
                            empty_text="No users yet"
                        />
                    }
                }}
            </GuardedScreen>
            <ConfirmDelete pending=pending_delete on_confirm=on_confirm />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: "u-1".into(),
            username: "ops".into(),
            email: None,
            full_name: Some("Ops Desk".into()),
            is_active: true,
            is_admin: false,
            created_at: "2026-01-05T10:00:00Z".into(),
            updated_at: "2026-01-05T10:00:00Z".into(),
            last_login_at: Some("2026-02-01T08:15:30Z".into()),
            created_by: None,
        }
    }

    #[test]
    fn test_user_cells() {
        let user = user();
        assert_eq!(user.cell("full_name"), "Ops Desk");
        assert_eq!(user.cell("email"), "—");
        assert_eq!(user.cell("is_admin"), "No");
        assert_eq!(user.cell("created_at"), "2026-01-05");
        assert_eq!(user.cell("last_login_at"), "2026-02-01T08:15");
    }

    #[test]
    fn test_rights_editor_path() {
        assert_eq!(rights_editor_path("u-1"), "/users/user-rights/u-1");
    }
}
