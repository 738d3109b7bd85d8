use std::time::Duration;

use leptos::prelude::*;
use thaw::*;

use super::REDIRECT_DELAY_MS;
use crate::shared::navigation::use_navigator;

/// Navigates to `to` after the redirect delay; unmounting cancels it
#[component]
pub fn DelayedRedirect(#[prop(into)] to: String) -> impl IntoView {
    let navigate = use_navigator();
    let handle = set_timeout_with_handle(
        move || navigate.run(to),
        Duration::from_millis(REDIRECT_DELAY_MS),
    )
    .ok();
    on_cleanup(move || {
        if let Some(handle) = handle {
            handle.clear();
        }
    });
}

#[component]
pub fn DeniedPanel(#[prop(into)] leave_to: String) -> impl IntoView {
    view! {
        <div class="screen-panel screen-panel--denied">
            <MessageBar intent=MessageBarIntent::Error>
                "You do not have permission to open this screen. Redirecting..."
            </MessageBar>
            <DelayedRedirect to=leave_to />
        </div>
    }
}

#[component]
pub fn NotFoundPanel(#[prop(into)] message: String, #[prop(into)] leave_to: String) -> impl IntoView {
    view! {
        <div class="screen-panel screen-panel--empty">
            <MessageBar intent=MessageBarIntent::Warning>
                {message} " Redirecting..."
            </MessageBar>
            <DelayedRedirect to=leave_to />
        </div>
    }
}

#[component]
pub fn ErrorPanel(#[prop(into)] message: String) -> impl IntoView {
    view! {
        <div class="screen-panel screen-panel--error">
            <MessageBar intent=MessageBarIntent::Error>{message}</MessageBar>
        </div>
    }
}

#[component]
pub fn LoadingPanel() -> impl IntoView {
    view! {
        <div class="screen-panel screen-panel--loading">
            <Flex justify=FlexJustify::Center align=FlexAlign::Center gap=FlexGap::Small>
                <Spinner />
                "Loading..."
            </Flex>
        </div>
    }
}
