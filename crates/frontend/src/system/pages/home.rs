use leptos::prelude::*;
use leptos_router::components::A;

use crate::system::auth::context::use_auth;
use crate::system::rights::viewable_routes;

/// Landing page after login and the target of denied list screens
#[component]
pub fn HomePage() -> impl IntoView {
    let (auth_state, _) = use_auth();
    let greeting = move || {
        auth_state.with(|s| match &s.user_info {
            Some(user) => format!("Welcome, {}", user.display_name()),
            None => "Welcome".to_string(),
        })
    };
    let routes = Memo::new(move |_| auth_state.with(|s| viewable_routes(&s.rights)));

    view! {
        <div class="screen">
            <div class="screen__header">
                <h2>{greeting}</h2>
            </div>
            <Show
                when=move || routes.with(|r| !r.is_empty())
                fallback=|| view! {
                    <p class="screen__hint">
                        "No screens are assigned to your account yet. Ask an administrator for access."
                    </p>
                }
            >
                <div class="home-links">
                    {move || {
                        routes
                            .get()
                            .into_iter()
                            .map(|route| view! {
                                <A href=route.path attr:class="home-links__item">
                                    <span class="home-links__title">{route.title}</span>
                                    <span class="home-links__section">{route.section}</span>
                                </A>
                            })
                            .collect_view()
                    }}
                </div>
            </Show>
        </div>
    }
}
