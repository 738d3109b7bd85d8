//! Top bar: sidebar toggle, application title, signed-in user and logout.

use leptos::prelude::*;
use thaw::*;

use crate::layout::LayoutContext;
use crate::shared::query::use_query_client;
use crate::system::auth::context::{do_logout, use_auth};

#[component]
pub fn TopHeader() -> impl IntoView {
    let layout = expect_context::<LayoutContext>();
    let (auth_state, set_auth_state) = use_auth();
    let client = use_query_client();

    let user_name = move || {
        auth_state.with(|s| {
            s.user_info
                .as_ref()
                .map(|u| u.display_name().to_string())
                .unwrap_or_default()
        })
    };

    view! {
        <header class="top-header">
            <div class="top-header__brand">
                <button
                    class="top-header__icon-btn"
                    title=move || {
                        if layout.sidebar_open.get() { "Hide navigation" } else { "Show navigation" }
                    }
                    on:click=move |_| layout.toggle_sidebar()
                >
                    "☰"
                </button>
                <span class="top-header__title">"Brokerage Back Office"</span>
            </div>
            <div class="top-header__actions">
                <span class="top-header__user">{user_name}</span>
                <Show when=move || auth_state.with(|s| s.is_admin())>
                    <span class="top-header__badge">"admin"</span>
                </Show>
                <Button
                    appearance=ButtonAppearance::Subtle
                    on_click=move |_| do_logout(set_auth_state, client)
                >
                    "Log out"
                </Button>
            </div>
        </header>
    }
}
