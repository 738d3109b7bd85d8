use std::collections::BTreeMap;

use contracts::shared::api::LookupItem;
use contracts::shared::metadata::{FieldError, ValidationRules};
use contracts::system::rights::Capability;
use contracts::system::routes::USERS;
use contracts::system::users::{
    CreateUserDto, UpdateUserDto, User, EMAIL_RULES, PASSWORD_RULES, USERNAME_RULES,
};
use leptos::prelude::*;
use leptos_router::hooks::use_params_map;
use serde_json::Value;

use crate::shared::api_utils::item_path;
use crate::shared::form::{FieldDef, FieldKind, FormSchema, SchemaForm};
use crate::shared::mutation::{use_mutation, MutationPlan};
use crate::shared::navigation::use_navigator;
use crate::shared::query::{use_query, Invalidation};
use crate::shared::request::Method;
use crate::shared::screen::{reduce, Dependency, GuardedScreen, ScreenInputs};
use crate::system::rights::use_rights;
use crate::system::users::api::{user_query, RESOURCE, USERS_API};

const FULL_NAME_RULES: ValidationRules = ValidationRules::none().with_max_length(100);

fn create_rule(payload: &Value) -> Vec<FieldError> {
    serde_json::from_value::<CreateUserDto>(payload.clone())
        .map(|dto| dto.validate().err().map(|e| e.errors).unwrap_or_default())
        .unwrap_or_default()
}

fn update_rule(payload: &Value) -> Vec<FieldError> {
    serde_json::from_value::<UpdateUserDto>(payload.clone())
        .map(|dto| dto.validate().err().map(|e| e.errors).unwrap_or_default())
        .unwrap_or_default()
}

pub fn create_schema() -> FormSchema {
    FormSchema::new(vec![
        FieldDef::text("username", "Username").rules(USERNAME_RULES),
        FieldDef::new("password", "Password", FieldKind::Password)
            .rules(PASSWORD_RULES)
            .hint("At least 6 characters"),
        FieldDef::text("full_name", "Full name").rules(FULL_NAME_RULES),
        FieldDef::new("email", "Email", FieldKind::Email).rules(EMAIL_RULES),
        FieldDef::checkbox("is_admin", "Administrator"),
    ])
    .cross_rule(create_rule)
}

pub fn update_schema() -> FormSchema {
    FormSchema::new(vec![
        FieldDef::text("full_name", "Full name").rules(FULL_NAME_RULES),
        FieldDef::new("email", "Email", FieldKind::Email).rules(EMAIL_RULES),
        FieldDef::checkbox("is_active", "Active").default_value("true"),
        FieldDef::checkbox("is_admin", "Administrator"),
    ])
    .cross_rule(update_rule)
}

fn no_lookups() -> Signal<BTreeMap<String, Vec<LookupItem>>> {
    Signal::derive(BTreeMap::new)
}

fn save_plan() -> MutationPlan {
    MutationPlan::new()
        .invalidate(Invalidation::resource(RESOURCE))
        .redirect_to(USERS.path)
}

#[component]
pub fn UserAdd() -> impl IntoView {
    let rights = use_rights(USERS.path);
    let state = Signal::derive(move || {
        reduce(&ScreenInputs {
            required: &[Capability::Create],
            rights: &rights.get(),
            dependencies: &[],
            requires_id: false,
            id_present: false,
        })
    });
    let save = use_mutation(save_plan());
    let navigate = use_navigator();
    let on_submit = Callback::new(move |payload: Value| {
        save.submit(Method::Post, USERS_API.to_string(), Some(payload))
    });
    let on_cancel = Callback::new(move |_: ()| navigate.run(USERS.path.to_string()));

    view! {
        <div class="screen">
            <div class="screen__header">
                <h2>"New user"</h2>
            </div>
            <GuardedScreen state=state leave_to=USERS.path>
                {move || {
                    let schema = create_schema();
                    let initial = schema.defaults();
                    view! {
                        <SchemaForm
                            lookups=no_lookups()
                            schema=schema
                            initial=initial
                            submitting=Signal::derive(move || save.is_submitting())
                            submit_label="Create"
                            on_submit=on_submit
                            on_cancel=on_cancel
                        />
                    }
                }}
            </GuardedScreen>
        </div>
    }
}

#[component]
pub fn UserEdit() -> impl IntoView {
    let rights = use_rights(USERS.path);
    let params = use_params_map();
    let id = Memo::new(move |_| params.read().get("id").filter(|id| !id.trim().is_empty()));
    let user = use_query::<User, _>(move || {
        if !rights.get().allows(Capability::Edit) {
            return None;
        }
        id.get().map(|id| user_query(&id))
    });

    let state = Signal::derive(move || {
        reduce(&ScreenInputs {
            required: &[Capability::Edit],
            rights: &rights.get(),
            dependencies: &[Dependency::data(user.status())],
            requires_id: true,
            id_present: id.get().is_some(),
        })
    });

    let save = use_mutation(save_plan());
    let navigate = use_navigator();
    let on_submit = Callback::new(move |payload: Value| {
        if let Some(id) = id.get_untracked() {
            save.submit(Method::Put, item_path(USERS_API, &id), Some(payload));
        }
    });
    let on_cancel = Callback::new(move |_: ()| navigate.run(USERS.path.to_string()));

    view! {
        <div class="screen">
            <div class="screen__header">
                <h2>
                    "Edit user "
                    {move || user.data().map(|u| u.username).unwrap_or_default()}
                </h2>
            </div>
            <GuardedScreen state=state leave_to=USERS.path not_found="User not found">
                {move || {
                    let schema = update_schema();
                    let initial = user
                        .data()
                        .and_then(|u| serde_json::to_value(u).ok())
                        .map(|value| schema.values_from(&value))
                        .unwrap_or_else(|| schema.defaults());
                    view! {
                        <SchemaForm
                            lookups=no_lookups()
                            schema=schema
                            initial=initial
                            submitting=Signal::derive(move || save.is_submitting())
                            submit_label="Save"
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

    #[test]
    fn test_short_password_is_rejected() {
        let schema = create_schema();
        let mut values = schema.defaults();
        values.insert("username".into(), "ops".into());
        values.insert("password".into(), "12345".into());

        let errors = schema.validate(&values);
        assert_eq!(errors.first_field(), Some("password"));
    }

    #[test]
    fn test_update_payload_decodes() {
        let schema = update_schema();
        let mut values = schema.defaults();
        values.insert("full_name".into(), "Ops Desk".into());

        let dto: UpdateUserDto = serde_json::from_value(schema.payload(&values)).unwrap();
        assert!(dto.is_active);
        assert!(!dto.is_admin);
        assert_eq!(dto.full_name.as_deref(), Some("Ops Desk"));
        assert!(dto.email.is_none());
    }
}
