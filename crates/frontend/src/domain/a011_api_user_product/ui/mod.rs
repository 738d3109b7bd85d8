use std::collections::BTreeSet;

use contracts::domain::a011_api_user_product::ApiUserProducts;
use contracts::shared::api::LookupItem;
use contracts::system::rights::Capability;
use contracts::system::routes::API_USER_PRODUCTS;
use leptos::prelude::*;
use thaw::*;

use crate::shared::api_utils::item_path;
use crate::shared::crud::LookupSet;
use crate::shared::form::Lookup;
use crate::shared::mutation::{use_mutation, MutationPlan};
use crate::shared::query::{use_query, Invalidation, Query, QueryKey, QueryStatus};
use crate::shared::request::Method;
use crate::shared::screen::{reduce, GuardedScreen, ScreenInputs, HOME_PATH};
use crate::system::rights::use_rights;

const RESOURCE: &str = "api-user-products";

pub fn assignment_query(api_user_id: &str) -> Query {
    Query::new(
        QueryKey::new(RESOURCE).with(api_user_id),
        format!("{}/products", item_path("/api/api-users", api_user_id)),
    )
}

/// Body of the save: the whole assignment set of the user
pub fn assignment_payload(api_user_id: &str, selected: &BTreeSet<String>) -> ApiUserProducts {
    ApiUserProducts {
        api_user_id: api_user_id.to_string(),
        product_ids: selected.iter().cloned().collect(),
    }
    .normalized()
}

fn toggle(selected: &mut BTreeSet<String>, product_id: &str) {
    if !selected.remove(product_id) {
        selected.insert(product_id.to_string());
    }
}

#[component]
pub fn ApiUserProductsPage() -> impl IntoView {
    let rights = use_rights(API_USER_PRODUCTS.path);
    let allowed = Signal::derive(move || rights.get().allows(Capability::View));
    let lookups = LookupSet::new(
        vec![(Lookup::USERS, true), (Lookup::PRODUCTS, true)],
        allowed,
    );
    let loaded = lookups.loaded();

    let state = Signal::derive(move || {
        reduce(&ScreenInputs {
            required: &[Capability::View],
            rights: &rights.get(),
            dependencies: &lookups.dependencies(),
            requires_id: false,
            id_present: false,
        })
    });

    let user = RwSignal::new(None::<String>);
    let assignment = use_query::<ApiUserProducts, _>(move || {
        if !allowed.get() {
            return None;
        }
        user.get().map(|id| assignment_query(&id))
    });
    let selected = RwSignal::new(BTreeSet::<String>::new());
    Effect::new(move |_| {
        let stored = assignment.data().map(|a| a.product_ids).unwrap_or_default();
        selected.set(stored.into_iter().collect());
    });

    let save = use_mutation(MutationPlan::new().invalidate(Invalidation::resource(RESOURCE)));
    let on_save = move |_: leptos::ev::MouseEvent| {
        let Some(api_user_id) = user.get_untracked() else {
            return;
        };
        let body = selected.with_untracked(|s| assignment_payload(&api_user_id, s));
        match serde_json::to_value(&body) {
            Ok(body) => save.submit(
                Method::Post,
                assignment_query(&api_user_id).path,
                Some(body),
            ),
            Err(e) => log::error!("assignment does not encode: {}", e),
        }
    };

    let items = move |resource: &'static str| -> Vec<LookupItem> {
        loaded.with(|l| l.get(resource).cloned().unwrap_or_default())
    };

    view! {
        <div class="screen">
            <div class="screen__header">
                <h2>{API_USER_PRODUCTS.title}</h2>
            </div>
            <GuardedScreen state=state leave_to=HOME_PATH>
                <label class="filter-field">
                    <span class="filter-field__label">"API user"</span>
                    <select
                        class="form__input"
                        on:change=move |ev| {
                            let value = event_target_value(&ev);
                            user.set(Some(value).filter(|v| !v.is_empty()));
                        }
                    >
                        <option value="">"Select a user"</option>
                        {items("users")
                            .into_iter()
                            .map(|item| {
                                let is_selected = user.get_untracked().as_deref() == Some(item.id.as_str());
                                view! { <option value=item.id selected=is_selected>{item.label}</option> }
                            })
                            .collect_view()}
                    </select>
                </label>
                {move || match (user.get(), assignment.status()) {
                    (None, _) => view! {
                        <p class="screen__hint">"Pick a user to see the products they may sell."</p>
                    }
                    .into_any(),
                    (Some(_), QueryStatus::Failed(message)) => view! {
                        <MessageBar intent=MessageBarIntent::Error>
                            {message.unwrap_or_else(|| "Could not load assignments".to_string())}
                        </MessageBar>
                    }
                    .into_any(),
                    (Some(_), status) if status.is_loading() => view! { <Spinner /> }.into_any(),
                    (Some(_), _) => view! {
                        <div class="checkbox-list">
                            {items("products")
                                .into_iter()
                                .map(|product| {
                                    let id = product.id.clone();
                                    let checked_id = product.id.clone();
                                    view! {
                                        <label class="checkbox-list__item">
                                            <input
                                                type="checkbox"
                                                prop:checked=move || selected.with(|s| s.contains(&checked_id))
                                                on:change=move |_| selected.update(|s| toggle(s, &id))
                                            />
                                            {product.label}
                                        </label>
                                    }
                                })
                                .collect_view()}
                        </div>
                        <Show when=move || rights.get().allows(Capability::Edit)>
                            <Button
                                appearance=ButtonAppearance::Primary
                                disabled=Signal::derive(move || save.is_submitting())
                                on_click=on_save
                            >
                                "Save assignments"
                            </Button>
                        </Show>
                    }
                    .into_any(),
                }}
            </GuardedScreen>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assignment_query() {
        let query = assignment_query("u 1");
        assert_eq!(query.key.to_string(), "api-user-products/u 1");
        assert_eq!(query.path, "/api/api-users/u%201/products");
    }

    #[test]
    fn test_payload_is_the_whole_sorted_set() {
        let mut selected = BTreeSet::new();
        toggle(&mut selected, "p-2");
        toggle(&mut selected, "p-1");
        toggle(&mut selected, "p-3");
        toggle(&mut selected, "p-3");

        let body = assignment_payload("u-1", &selected);
        assert_eq!(body.api_user_id, "u-1");
        assert_eq!(body.product_ids, vec!["p-1", "p-2"]);
        assert_eq!(body, assignment_payload("u-1", &selected));
    }
}
