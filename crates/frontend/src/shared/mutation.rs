//! Mutation dispatcher: `idle -> submitting -> idle`.
//!
//! On success the server message is toasted, the configured cache keys are
//! invalidated and only then the listing route is opened. On failure the
//! error is toasted and the screen stays as it was. Nothing is applied
//! before the server confirms.

use contracts::shared::api::ApiResponse;
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde_json::Value;

use crate::shared::navigation::use_navigator;
use crate::shared::notify::{use_notifications, Notifications, ToastKind};
use crate::shared::query::{use_query_client, Invalidation, QueryClient};
use crate::shared::request::{self, ApiError, Method};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MutationState {
    #[default]
    Idle,
    Submitting,
}

impl MutationState {
    /// Enter `Submitting`; `false` when a submit is already running
    pub fn try_begin(&mut self) -> bool {
        match self {
            MutationState::Idle => {
                *self = MutationState::Submitting;
                true
            }
            MutationState::Submitting => false,
        }
    }

    pub fn finish(&mut self) {
        *self = MutationState::Idle;
    }
}

/// What a successful mutation does to the rest of the app
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MutationPlan {
    pub invalidate: Vec<Invalidation>,
    pub redirect_to: Option<String>,
}

impl MutationPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn invalidate(mut self, invalidation: Invalidation) -> Self {
        self.invalidate.push(invalidation);
        self
    }

    pub fn redirect_to(mut self, path: impl Into<String>) -> Self {
        self.redirect_to = Some(path.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MutationStep {
    Toast(ToastKind, String),
    Invalidate(Invalidation),
    Navigate(String),
}

/// Ordered side effects of a finished request
pub fn settle<T>(plan: &MutationPlan, outcome: &Result<ApiResponse<T>, ApiError>) -> Vec<MutationStep> {
    match outcome {
        Ok(response) => {
            let mut steps = vec![MutationStep::Toast(
                ToastKind::Success,
                response.message.clone(),
            )];
            steps.extend(plan.invalidate.iter().cloned().map(MutationStep::Invalidate));
            steps.extend(plan.redirect_to.iter().cloned().map(MutationStep::Navigate));
            steps
        }
        Err(e) => vec![MutationStep::Toast(ToastKind::Error, e.user_message())],
    }
}

#[derive(Clone, Copy)]
pub struct Mutation {
    state: RwSignal<MutationState>,
    plan: StoredValue<MutationPlan>,
    client: QueryClient,
    notifications: Notifications,
    navigate: Callback<String>,
}

pub fn use_mutation(plan: MutationPlan) -> Mutation {
    Mutation {
        state: RwSignal::new(MutationState::Idle),
        plan: StoredValue::new(plan),
        client: use_query_client(),
        notifications: use_notifications(),
        navigate: use_navigator(),
    }
}

impl Mutation {
    pub fn is_submitting(&self) -> bool {
        self.state.get() == MutationState::Submitting
    }

    pub fn submit(&self, method: Method, path: String, body: Option<Value>) {
        self.submit_then(method, path, body, |_| {});
    }

    /// Like `submit`, with a callback told whether the request succeeded
    pub fn submit_then(
        &self,
        method: Method,
        path: String,
        body: Option<Value>,
        then: impl FnOnce(bool) + 'static,
    ) {
        let started = self.state.try_update(|s| s.try_begin()).unwrap_or(false);
        if !started {
            log::debug!("ignoring submit to {} while another is running", path);
            return;
        }

        let this = *self;
        spawn_local(async move {
            let outcome = request::request::<Value, Value>(method, &path, body.as_ref()).await;
            if let Err(e) = &outcome {
                log::error!("{:?} {} failed: {}", method, path, e);
            }
            this.state.update(|s| s.finish());
            for step in settle(&this.plan.get_value(), &outcome) {
                this.apply(step);
            }
            then(outcome.is_ok());
        });
    }

    fn apply(&self, step: MutationStep) {
        match step {
            MutationStep::Toast(ToastKind::Success, message) => self.notifications.success(message),
            MutationStep::Toast(ToastKind::Error, message) => self.notifications.error(message),
            MutationStep::Invalidate(invalidation) => self.client.invalidate(&invalidation),
            MutationStep::Navigate(path) => self.navigate.run(path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::query::QueryKey;
    use crate::shared::request::GENERIC_ERROR;

    #[test]
    fn test_second_submit_is_ignored() {
        let mut state = MutationState::Idle;
        assert!(state.try_begin());
        assert!(!state.try_begin());
        state.finish();
        assert!(state.try_begin());
    }

    #[test]
    fn test_invalidation_precedes_navigation() {
        let plan = MutationPlan::new()
            .invalidate(Invalidation::resource("branches"))
            .invalidate(Invalidation::Exact(QueryKey::new("dashboard")))
            .redirect_to("/branches-clients/branch-list");
        let outcome: Result<ApiResponse<()>, ApiError> =
            Ok(ApiResponse::new("Branch created successfully", ()));

        assert_eq!(
            settle(&plan, &outcome),
            vec![
                MutationStep::Toast(ToastKind::Success, "Branch created successfully".into()),
                MutationStep::Invalidate(Invalidation::resource("branches")),
                MutationStep::Invalidate(Invalidation::Exact(QueryKey::new("dashboard"))),
                MutationStep::Navigate("/branches-clients/branch-list".into()),
            ]
        );
    }

    #[test]
    fn test_failure_only_toasts() {
        let plan = MutationPlan::new()
            .invalidate(Invalidation::resource("agents"))
            .redirect_to("/agents/agent-list");

        let outcome: Result<ApiResponse<()>, ApiError> = Err(ApiError::Http {
            status: 409,
            message: Some("Email 'a@b.pk' is already in use".into()),
        });
        assert_eq!(
            settle(&plan, &outcome),
            vec![MutationStep::Toast(
                ToastKind::Error,
                "Email 'a@b.pk' is already in use".into()
            )]
        );

        let outcome: Result<ApiResponse<()>, ApiError> = Err(ApiError::Network("down".into()));
        assert_eq!(
            settle(&plan, &outcome),
            vec![MutationStep::Toast(ToastKind::Error, GENERIC_ERROR.into())]
        );
    }
}
