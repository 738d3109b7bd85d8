//! Success and error toasts.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;
use uuid::Uuid;

/// How long a toast stays on screen
pub const TOAST_LIFETIME_MS: u32 = 4000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: Uuid,
    pub kind: ToastKind,
    pub message: String,
}

#[derive(Clone, Copy)]
pub struct Notifications {
    toasts: RwSignal<Vec<Toast>>,
}

impl Notifications {
    pub fn new() -> Self {
        Self {
            toasts: RwSignal::new(Vec::new()),
        }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(ToastKind::Success, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(ToastKind::Error, message.into());
    }

    fn push(&self, kind: ToastKind, message: String) {
        let toast = Toast {
            id: Uuid::new_v4(),
            kind,
            message,
        };
        let id = toast.id;
        self.toasts.update(|t| t.push(toast));

        let toasts = self.toasts;
        spawn_local(async move {
            TimeoutFuture::new(TOAST_LIFETIME_MS).await;
            toasts.update(|t| t.retain(|x| x.id != id));
        });
    }

    pub fn dismiss(&self, id: Uuid) {
        self.toasts.update(|t| t.retain(|x| x.id != id));
    }
}

impl Default for Notifications {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_notifications() -> Notifications {
    expect_context::<Notifications>()
}

#[component]
pub fn Toasts() -> impl IntoView {
    let notifications = use_notifications();

    view! {
        <div class="toasts">
            <For
                each=move || notifications.toasts.get()
                key=|toast| toast.id
                children=move |toast: Toast| {
                    let id = toast.id;
                    let intent = match toast.kind {
                        ToastKind::Success => MessageBarIntent::Success,
                        ToastKind::Error => MessageBarIntent::Error,
                    };
                    view! {
                        <div class="toast" on:click=move |_| notifications.dismiss(id)>
                            <MessageBar intent=intent>{toast.message}</MessageBar>
                        </div>
                    }
                }
            />
        </div>
    }
}
