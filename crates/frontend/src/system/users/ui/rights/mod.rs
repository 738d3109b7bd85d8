use std::collections::BTreeMap;

use contracts::system::rights::{Capability, CapabilityRecord, RightFlag, UserRightsDto};
use contracts::system::routes::{SCREEN_ROUTES, USERS};
use contracts::system::users::User;
use leptos::prelude::*;
use leptos_router::hooks::use_params_map;
use thaw::*;

use crate::shared::mutation::{use_mutation, MutationPlan};
use crate::shared::navigation::use_navigator;
use crate::shared::query::{use_query, Invalidation};
use crate::shared::request::Method;
use crate::shared::screen::{reduce, Dependency, GuardedScreen, ScreenInputs};
use crate::system::auth::context::{current_user, reload_rights, use_auth};
use crate::system::rights::use_rights;
use crate::system::users::api::{
    matrix_from, rights_path, rights_payload, rights_query, user_query, RESOURCE,
};

/// Select value of a stored flag: "1", "0" or "" when absent
fn flag_value(flag: Option<RightFlag>) -> &'static str {
    flag.map(|f| f.as_str()).unwrap_or("")
}

#[component]
fn FlagSelect(
    route: &'static str,
    capability: Capability,
    matrix: RwSignal<BTreeMap<String, CapabilityRecord>>,
) -> impl IntoView {
    let current = move || {
        matrix.with(|m| flag_value(m.get(route).and_then(|r| r.flag(capability))))
    };
    let on_change = move |ev: leptos::ev::Event| {
        let flag = RightFlag::from_db(&event_target_value(&ev));
        matrix.update(|m| m.entry(route.to_string()).or_default().set(capability, flag));
    };
    view! {
        <select
            class="rights-matrix__flag"
            prop:value=current
            on:change=on_change
        >
            <option value="" selected=move || current().is_empty()>"Not set"</option>
            <option value="1" selected=move || current() == "1">"Granted"</option>
            <option value="0" selected=move || current() == "0">"Denied"</option>
        </select>
    }
}

/// Permission matrix of one user: every catalogued route against the
/// four capabilities. Only "Granted" opens a screen.
#[component]
pub fn UserRightsEditor() -> impl IntoView {
    let rights = use_rights(USERS.path);
    let (_, set_auth_state) = use_auth();
    let params = use_params_map();
    let id = Memo::new(move |_| params.read().get("id").filter(|id| !id.trim().is_empty()));
    let allowed = Signal::derive(move || rights.get().allows(Capability::Edit));

    let user = use_query::<User, _>(move || {
        if !allowed.get() {
            return None;
        }
        id.get().map(|id| user_query(&id))
    });
    let stored = use_query::<UserRightsDto, _>(move || {
        if !allowed.get() {
            return None;
        }
        id.get().map(|id| rights_query(&id))
    });

    let matrix = RwSignal::new(BTreeMap::<String, CapabilityRecord>::new());
    Effect::new(move |_| {
        if let Some(dto) = stored.data() {
            matrix.set(matrix_from(&dto));
        }
    });

    let state = Signal::derive(move || {
        reduce(&ScreenInputs {
            required: &[Capability::Edit],
            rights: &rights.get(),
            dependencies: &[
                Dependency::data(user.status()),
                Dependency::data(stored.status()),
            ],
            requires_id: true,
            id_present: id.get().is_some(),
        })
    });

    let save = use_mutation(
        MutationPlan::new()
            .invalidate(Invalidation::resource(RESOURCE))
            .redirect_to(USERS.path),
    );
    let navigate = use_navigator();
    let on_save = move |_: leptos::ev::MouseEvent| {
        let Some(user_id) = id.get_untracked() else {
            return;
        };
        let body = matrix.with_untracked(|m| rights_payload(&user_id, m));
        let body = match serde_json::to_value(&body) {
            Ok(body) => body,
            Err(e) => {
                log::error!("rights do not encode: {}", e);
                return;
            }
        };
        let is_self = current_user().is_some_and(|u| u.id == user_id);
        save.submit_then(Method::Put, rights_path(&user_id), Some(body), move |ok| {
            if ok && is_self {
                reload_rights(set_auth_state);
            }
        });
    };

    view! {
        <div class="screen">
            <div class="screen__header">
                <h2>
                    "Permissions of "
                    {move || user.data().map(|u| u.username).unwrap_or_default()}
                </h2>
            </div>
            <GuardedScreen state=state leave_to=USERS.path not_found="User not found">
                <Show when=move || user.data().is_some_and(|u| u.is_admin)>
                    <MessageBar intent=MessageBarIntent::Info>
                        "Administrators can open every screen regardless of this table."
                    </MessageBar>
                </Show>
                <table class="rights-matrix">
                    <thead>
                        <tr>
                            <th>"Screen"</th>
                            {Capability::ALL
                                .iter()
                                .map(|c| view! { <th>{c.label()}</th> })
                                .collect_view()}
                        </tr>
                    </thead>
                    <tbody>
                        {SCREEN_ROUTES
                            .iter()
                            .map(|route| {
                                view! {
                                    <tr>
                                        <td>
                                            <div>{route.title}</div>
                                            <div class="rights-matrix__path">{route.path}</div>
                                        </td>
                                        {Capability::ALL
                                            .into_iter()
                                            .map(|capability| view! {
                                                <td>
                                                    <FlagSelect
                                                        route=route.path
                                                        capability=capability
                                                        matrix=matrix
                                                    />
                                                </td>
                                            })
                                            .collect_view()}
                                    </tr>
                                }
                            })
                            .collect_view()}
                    </tbody>
                </table>
                <Space>
                    <Button
                        appearance=ButtonAppearance::Primary
                        disabled=Signal::derive(move || save.is_submitting())
                        on_click=on_save
                    >
                        "Save permissions"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| navigate.run(USERS.path.to_string())
                    >
                        "Cancel"
                    </Button>
                </Space>
            </GuardedScreen>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_values_are_tri_state() {
        assert_eq!(flag_value(Some(RightFlag::Granted)), "1");
        assert_eq!(flag_value(Some(RightFlag::Denied)), "0");
        assert_eq!(flag_value(None), "");
        assert_eq!(RightFlag::from_db(""), None);
    }
}
