use contracts::system::auth::UserInfo;
use contracts::system::rights::PermissionTable;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{api, storage};
use crate::shared::query::QueryClient;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub access_token: Option<String>,
    pub user_info: Option<UserInfo>,
    pub rights: PermissionTable,
    /// A stored session is being checked
    pub restoring: bool,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.user_info.as_ref().is_some_and(|u| u.is_admin)
    }
}

async fn restore_session() -> Option<AuthState> {
    storage::get_access_token()?;

    let user = match api::get_current_user().await {
        Ok(user) => user,
        Err(_) => {
            let refresh_token = storage::get_refresh_token()?;
            let response = api::refresh_token(refresh_token).await.ok()?;
            storage::save_access_token(&response.access_token);
            api::get_current_user().await.ok()?
        }
    };

    let rights = match api::get_rights().await {
        Ok(rights) => rights,
        Err(e) => {
            log::warn!("could not load permissions: {}", e);
            PermissionTable::new()
        }
    };
    storage::save_user(&user);

    Some(AuthState {
        access_token: storage::get_access_token(),
        user_info: Some(user),
        rights,
        restoring: false,
    })
}

#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let (auth_state, set_auth_state) = signal(AuthState {
        restoring: storage::get_access_token().is_some(),
        ..Default::default()
    });

    if auth_state.get_untracked().restoring {
        spawn_local(async move {
            match restore_session().await {
                Some(state) => {
                    log::info!("session restored");
                    set_auth_state.set(state);
                }
                None => {
                    storage::clear_tokens();
                    set_auth_state.set(AuthState::default());
                }
            }
        });
    }

    provide_context(auth_state);
    provide_context(set_auth_state);

    children()
}

pub fn use_auth() -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
    let auth_state =
        use_context::<ReadSignal<AuthState>>().expect("AuthProvider not found in component tree");
    let set_auth_state =
        use_context::<WriteSignal<AuthState>>().expect("AuthProvider not found in component tree");

    (auth_state, set_auth_state)
}

/// Identity of the signed-in user, read synchronously from client storage
pub fn current_user() -> Option<UserInfo> {
    storage::get_user()
}

/// Store a fresh login and publish it
pub fn complete_login(
    set_auth_state: WriteSignal<AuthState>,
    response: contracts::system::auth::LoginResponse,
) {
    storage::save_access_token(&response.access_token);
    storage::save_refresh_token(&response.refresh_token);
    storage::save_user(&response.user);

    set_auth_state.set(AuthState {
        access_token: Some(response.access_token),
        user_info: Some(response.user),
        rights: response.rights,
        restoring: false,
    });
}

/// Revoke the session, then drop tokens, cached queries and the rights table
pub fn do_logout(set_auth_state: WriteSignal<AuthState>, client: QueryClient) {
    let refresh_token = storage::get_refresh_token();

    storage::clear_tokens();
    client.clear();
    set_auth_state.set(AuthState::default());

    if let Some(refresh_token) = refresh_token {
        spawn_local(async move {
            if let Err(e) = api::logout(refresh_token).await {
                log::warn!("logout request failed: {}", e);
            }
        });
    }
}

/// Re-read the permission table of the signed-in user
pub fn reload_rights(set_auth_state: WriteSignal<AuthState>) {
    spawn_local(async move {
        match api::get_rights().await {
            Ok(rights) => set_auth_state.update(|s| s.rights = rights),
            Err(e) => log::warn!("could not reload permissions: {}", e),
        }
    });
}
