use contracts::dashboards::d100_overview::OverviewResponse;
use contracts::system::rights::Capability;
use contracts::system::routes::{CALL_US, DASHBOARD, MOTOR_QUOTES};
use leptos::prelude::*;
use thaw::*;

use crate::shared::crud::DASHBOARD_RESOURCE;
use crate::shared::navigation::use_navigator;
use crate::shared::query::{use_query, Query, QueryKey};
use crate::shared::screen::{reduce, Dependency, GuardedScreen, ScreenInputs, HOME_PATH};
use crate::system::rights::use_rights;

pub fn summary_query() -> Query {
    Query::new(
        QueryKey::new(DASHBOARD_RESOURCE).with("summary"),
        "/api/dashboard/summary",
    )
}

/// `generated_at` shown as local-independent `YYYY-MM-DD HH:MM`
fn format_generated(raw: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

#[component]
fn CountCard(
    #[prop(into)] title: String,
    count: u64,
    #[prop(into)] route: String,
    #[prop(optional)] highlight: bool,
) -> impl IntoView {
    let navigate = use_navigator();
    let class = if highlight {
        "dashboard-card dashboard-card--highlight"
    } else {
        "dashboard-card"
    };
    view! {
        <div class=class on:click=move |_| navigate.run(route.clone())>
            <div class="dashboard-card__count">{count}</div>
            <div class="dashboard-card__title">{title}</div>
        </div>
    }
}

/// Record counts of the modules the user can view
#[component]
pub fn OverviewDashboard() -> impl IntoView {
    let rights = use_rights(DASHBOARD.path);
    let summary = use_query::<OverviewResponse, _>(move || {
        rights.get().allows(Capability::View).then(summary_query)
    });

    let state = Signal::derive(move || {
        reduce(&ScreenInputs {
            required: &[Capability::View],
            rights: &rights.get(),
            dependencies: &[Dependency::data(summary.status())],
            requires_id: false,
            id_present: false,
        })
    });

    view! {
        <div class="screen">
            <div class="screen__header">
                <h2>{DASHBOARD.title}</h2>
            </div>
            <GuardedScreen state=state leave_to=HOME_PATH>
                {move || {
                    let data = summary.data().unwrap_or_default();
                    let generated = format_generated(&data.generated_at);
                    view! {
                        <Flex gap=FlexGap::Large>
                            <CountCard
                                title="Quotes awaiting a decision"
                                count=data.pending_quotes
                                route=MOTOR_QUOTES.path
                                highlight={data.pending_quotes > 0}
                            />
                            <CountCard
                                title="Call-us requests to contact"
                                count=data.pending_call_us
                                route=CALL_US.path
                                highlight={data.pending_call_us > 0}
                            />
                        </Flex>
                        <div class="dashboard-grid">
                            {data
                                .modules
                                .into_iter()
                                .map(|m| view! { <CountCard title=m.title count=m.count route=m.route /> })
                                .collect_view()}
                        </div>
                        <p class="screen__hint">"Updated " {generated}</p>
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
    fn test_summary_is_invalidated_with_the_dashboard_resource() {
        use crate::shared::query::Invalidation;
        let key = summary_query().key;
        assert!(Invalidation::resource(DASHBOARD_RESOURCE).matches(&key));
    }

    #[test]
    fn test_format_generated() {
        assert_eq!(format_generated("2026-03-01T09:30:00+00:00"), "2026-03-01 09:30");
        assert_eq!(format_generated("soon"), "soon");
    }
}
