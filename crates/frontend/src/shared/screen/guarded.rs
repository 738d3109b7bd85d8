use leptos::prelude::*;

use super::panels::{DeniedPanel, ErrorPanel, LoadingPanel, NotFoundPanel};
use super::ScreenState;

/// Renders the panel of the reduced state, or the screen body when ready
#[component]
pub fn GuardedScreen(
    #[prop(into)] state: Signal<ScreenState>,
    /// Target of the delayed navigation on denial and not-found
    #[prop(into)]
    leave_to: String,
    #[prop(optional, into)] not_found: Option<String>,
    children: ChildrenFn,
) -> impl IntoView {
    let leave_to = StoredValue::new(leave_to);
    let not_found =
        StoredValue::new(not_found.unwrap_or_else(|| "Nothing to show here.".to_string()));
    let children = StoredValue::new(children);

    move || match state.get() {
        ScreenState::PermissionDenied => {
            view! { <DeniedPanel leave_to=leave_to.get_value() /> }.into_any()
        }
        ScreenState::Loading => view! { <LoadingPanel /> }.into_any(),
        ScreenState::Error(message) => view! { <ErrorPanel message=message /> }.into_any(),
        ScreenState::Empty => view! {
            <NotFoundPanel message=not_found.get_value() leave_to=leave_to.get_value() />
        }
        .into_any(),
        ScreenState::Ready => children.with_value(|children| children()).into_any(),
    }
}
