//! Filter dialog of the order list.

use contracts::domain::a009_order::{Order, OrderFilter, OrderStatus};
use contracts::shared::api::LookupItem;
use leptos::prelude::*;
use thaw::*;

use crate::shared::crud::{list_query, LookupSet};
use crate::shared::form::Lookup;
use crate::shared::query::Query;

/// Draft and applied criteria; the list only ever reads `applied`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderFilterState {
    pub open: bool,
    pub draft: OrderFilter,
    pub applied: OrderFilter,
    pub error: Option<String>,
}

impl OrderFilterState {
    /// Open the dialog with the applied criteria as the draft
    pub fn show(&mut self) {
        self.draft = self.applied.clone();
        self.error = None;
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
        self.error = None;
    }

    pub fn apply(&mut self) {
        let draft = self.draft.clone().normalized();
        if let (Some(from), Some(to)) = (&draft.date_from, &draft.date_to) {
            if from > to {
                self.error = Some("Date from must not be after date to".to_string());
                return;
            }
        }
        self.applied = draft.clone();
        self.draft = draft;
        self.close();
    }

    /// Clear every criterion and go back to the unfiltered list
    pub fn reset(&mut self) {
        self.draft = OrderFilter::default();
        self.applied = OrderFilter::default();
        self.close();
    }

    pub fn applied_count(&self) -> usize {
        self.applied.active_count()
    }
}

/// Listing query for `filter`. The unfiltered query is the plain listing,
/// so it is cached under the same key.
pub fn orders_query(filter: &OrderFilter) -> Query {
    if filter.is_empty() {
        return list_query::<Order>();
    }
    let mut query = list_query::<Order>();
    for param in filter.params() {
        query.key = query.key.with(param);
    }
    match serde_qs::to_string(filter) {
        Ok(qs) => query.path = format!("{}?{}", query.path, qs),
        Err(e) => log::error!("order filter does not encode: {}", e),
    }
    query
}

fn lookup_options(items: Option<Vec<LookupItem>>) -> Vec<(String, String)> {
    items
        .unwrap_or_default()
        .into_iter()
        .map(|item| (item.id, item.label))
        .collect()
}

fn blank_to_none(value: String) -> Option<String> {
    Some(value).filter(|v| !v.is_empty())
}

#[component]
fn FilterSelect(
    label: &'static str,
    #[prop(into)] options: Signal<Vec<(String, String)>>,
    #[prop(into)] value: Signal<String>,
    on_change: Callback<String>,
) -> impl IntoView {
    view! {
        <label class="filter-field">
            <span class="filter-field__label">{label}</span>
            <select
                class="form__input"
                prop:value=move || value.get()
                on:change=move |ev| on_change.run(event_target_value(&ev))
            >
                <option value="">"Any"</option>
                {move || {
                    let selected = value.get();
                    options
                        .get()
                        .into_iter()
                        .map(|(id, label)| {
                            let is_selected = id == selected;
                            view! { <option value=id selected=is_selected>{label}</option> }
                        })
                        .collect_view()
                }}
            </select>
        </label>
    }
}

#[component]
fn FilterDate(
    label: &'static str,
    #[prop(into)] value: Signal<String>,
    on_change: Callback<String>,
) -> impl IntoView {
    view! {
        <label class="filter-field">
            <span class="filter-field__label">{label}</span>
            <input
                type="date"
                class="form__input"
                prop:value=move || value.get()
                on:change=move |ev| on_change.run(event_target_value(&ev))
            />
        </label>
    }
}

/// Filter button with the applied count, and the dialog it opens
#[component]
pub fn OrderFilterDialog(state: RwSignal<OrderFilterState>) -> impl IntoView {
    let open = RwSignal::new(false);
    Effect::new(move |_| open.set(state.with(|s| s.open)));
    Effect::new(move |_| {
        if !open.get() && state.with_untracked(|s| s.open) {
            state.update(|s| s.close());
        }
    });

    let lookups = LookupSet::new(
        vec![(Lookup::COURIERS, false), (Lookup::BRANCHES, false)],
        Signal::derive(move || state.with(|s| s.open)),
    )
    .loaded();
    let couriers = Signal::derive(move || lookup_options(lookups.with(|l| l.get("couriers").cloned())));
    let branches = Signal::derive(move || lookup_options(lookups.with(|l| l.get("branches").cloned())));
    let statuses = Signal::derive(|| {
        OrderStatus::ALL
            .iter()
            .map(|s| (s.code().to_string(), s.label().to_string()))
            .collect::<Vec<_>>()
    });

    let draft = move |read: fn(&OrderFilter) -> Option<String>| {
        Signal::derive(move || state.with(|s| read(&s.draft).unwrap_or_default()))
    };

    view! {
        <Button appearance=ButtonAppearance::Secondary on_click=move |_| state.update(|s| s.show())>
            {move || match state.with(|s| s.applied_count()) {
                0 => "Filter".to_string(),
                n => format!("Filter ({})", n),
            }}
        </Button>
        <Dialog open=open>
            <DialogSurface>
                <DialogBody>
                    <DialogTitle>"Filter orders"</DialogTitle>
                    <DialogContent>
                        <div class="filter-grid">
                            <FilterSelect
                                label="Status"
                                options=statuses
                                value=draft(|f| f.status.map(|s| s.code().to_string()))
                                on_change=Callback::new(move |v: String| {
                                    state.update(|s| s.draft.status = OrderStatus::from_code(&v))
                                })
                            />
                            <FilterSelect
                                label="Courier"
                                options=couriers
                                value=draft(|f| f.courier_id.clone())
                                on_change=Callback::new(move |v: String| {
                                    state.update(|s| s.draft.courier_id = blank_to_none(v))
                                })
                            />
                            <FilterSelect
                                label="Branch"
                                options=branches
                                value=draft(|f| f.branch_id.clone())
                                on_change=Callback::new(move |v: String| {
                                    state.update(|s| s.draft.branch_id = blank_to_none(v))
                                })
                            />
                            <FilterDate
                                label="Date from"
                                value=draft(|f| f.date_from.clone())
                                on_change=Callback::new(move |v: String| {
                                    state.update(|s| s.draft.date_from = blank_to_none(v))
                                })
                            />
                            <FilterDate
                                label="Date to"
                                value=draft(|f| f.date_to.clone())
                                on_change=Callback::new(move |v: String| {
                                    state.update(|s| s.draft.date_to = blank_to_none(v))
                                })
                            />
                        </div>
                        {move || state.with(|s| s.error.clone()).map(|error| view! {
                            <MessageBar intent=MessageBarIntent::Error>{error}</MessageBar>
                        })}
                    </DialogContent>
                    <DialogActions>
                        <Button appearance=ButtonAppearance::Secondary on_click=move |_| state.update(|s| s.reset())>
                            "Reset"
                        </Button>
                        <Button appearance=ButtonAppearance::Primary on_click=move |_| state.update(|s| s.apply())>
                            "Apply"
                        </Button>
                    </DialogActions>
                </DialogBody>
            </DialogSurface>
        </Dialog>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dispatched_via_tcs() -> OrderFilterState {
        let mut state = OrderFilterState::default();
        state.show();
        state.draft.status = Some(OrderStatus::Dispatched);
        state.draft.courier_id = Some("c-1".into());
        state.draft.date_from = Some("2026-01-01".into());
        state.apply();
        state
    }

    #[test]
    fn test_apply_counts_criteria_and_closes() {
        let state = dispatched_via_tcs();
        assert!(!state.open);
        assert_eq!(state.applied_count(), 3);

        let query = orders_query(&state.applied);
        assert_eq!(
            query.key.to_string(),
            "orders/list/status=dispatched/courier_id=c-1/date_from=2026-01-01"
        );
        assert!(query.path.starts_with("/api/orders?"));
        assert!(query.path.contains("status=dispatched"));
        assert!(query.path.contains("courier_id=c-1"));
    }

    #[test]
    fn test_reset_returns_to_the_unfiltered_list() {
        let mut state = dispatched_via_tcs();
        state.show();
        state.reset();

        assert!(!state.open);
        assert_eq!(state.applied_count(), 0);
        assert_eq!(state.draft, OrderFilter::default());
        assert_eq!(orders_query(&state.applied), list_query::<Order>());
    }

    #[test]
    fn test_closing_keeps_applied_criteria() {
        let mut state = dispatched_via_tcs();
        state.show();
        state.draft.status = None;
        state.close();
        assert_eq!(state.applied_count(), 3);

        state.show();
        assert_eq!(state.draft.status, Some(OrderStatus::Dispatched));
    }

    #[test]
    fn test_inverted_period_is_not_applied() {
        let mut state = OrderFilterState::default();
        state.show();
        state.draft.date_from = Some("2026-02-01".into());
        state.draft.date_to = Some("2026-01-01".into());
        state.apply();

        assert!(state.open);
        assert!(state.error.is_some());
        assert_eq!(state.applied_count(), 0);
    }

    #[test]
    fn test_blank_criteria_are_not_counted() {
        let mut state = OrderFilterState::default();
        state.show();
        state.draft.branch_id = Some("  ".into());
        state.apply();
        assert_eq!(state.applied_count(), 0);
    }
}
