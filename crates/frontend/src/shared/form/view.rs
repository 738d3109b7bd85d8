use std::collections::BTreeMap;

use contracts::shared::api::LookupItem;
use leptos::prelude::*;
use serde_json::Value;
use thaw::*;
use wasm_bindgen::JsCast;

use super::schema::{FieldDef, FieldKind, FormSchema, FormValues, OptionSource, SelectOption};

fn field_id(name: &str) -> String {
    format!("field-{}", name)
}

fn focus_field(name: &str) {
    let element = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(&field_id(name)))
        .and_then(|e| e.dyn_into::<web_sys::HtmlElement>().ok());
    if let Some(element) = element {
        let _ = element.focus();
    }
}

/// Form rendered from a schema. Validates on blur and on submit; the
/// callback only ever sees a payload that passed validation.
#[component]
pub fn SchemaForm(
    schema: FormSchema,
    initial: FormValues,
    /// Loaded reference lists by resource name
    #[prop(into)]
    lookups: Signal<BTreeMap<String, Vec<LookupItem>>>,
    #[prop(into)] submitting: Signal<bool>,
    #[prop(into)] submit_label: String,
    on_submit: Callback<Value>,
    #[prop(optional)] on_cancel: Option<Callback<()>>,
) -> impl IntoView {
    let values = RwSignal::new(initial);
    let errors = RwSignal::new(contracts::shared::metadata::ValidationErrors::new());
    let schema = StoredValue::new(schema);

    let validate_one = move |name: &'static str| {
        let result = schema.with_value(|s| values.with_untracked(|v| s.validate_field(name, v)));
        errors.update(|e| {
            e.errors.retain(|x| x.field != name);
            e.check(name, result);
        });
    };

    let handle_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        let (found, payload) = schema.with_value(|s| {
            values.with_untracked(|v| (s.validate(v), s.payload(v)))
        });
        if let Some(first) = found.first_field() {
            log::debug!("form has {} invalid fields", found.errors.len());
            focus_field(first);
            errors.set(found);
            return;
        }
        errors.set(found);
        on_submit.run(payload);
    };

    let fields = schema.with_value(|s| s.fields.clone());

    view! {
        <form class="schema-form" on:submit=handle_submit novalidate=true>
            {fields
                .into_iter()
                .map(|field| {
                    let name = field.name;
                    let on_blur = move || validate_one(name);
                    match field.visible {
                        Some(predicate) => view! {
                            <Show when=move || values.with(|v| predicate(v))>
                                {
                                    let field = field.clone();
                                    view! {
                                        <FieldRow field=field values=values errors=errors lookups=lookups on_blur=on_blur />
                                    }
                                }
                            </Show>
                        }
                        .into_any(),
                        None => view! {
                            <FieldRow field=field values=values errors=errors lookups=lookups on_blur=on_blur />
                        }
                        .into_any(),
                    }
                })
                .collect_view()}
            <div class="form-actions">
                {on_cancel.map(|cancel| view! {
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| cancel.run(())
                        disabled=submitting
                    >
                        "Cancel"
                    </Button>
                })}
                <button type="submit" class="btn-primary" disabled=move || submitting.get()>
                    {move || if submitting.get() { "Saving...".to_string() } else { submit_label.clone() }}
                </button>
            </div>
        </form>
    }
}

#[component]
fn FieldRow<B>(
    field: FieldDef,
    values: RwSignal<FormValues>,
    errors: RwSignal<contracts::shared::metadata::ValidationErrors>,
    lookups: Signal<BTreeMap<String, Vec<LookupItem>>>,
    on_blur: B,
) -> impl IntoView
where
    B: Fn() + Copy + Send + Sync + 'static,
{
    let name = field.name;
    let id = field_id(name);
    let value = move || values.with(|v| v.get(name).cloned().unwrap_or_default());
    let set = move |raw: String| values.update(|v| {
        v.insert(name.to_string(), raw);
    });
    let error = move || errors.with(|e| e.get(name).map(str::to_string));
    let label = if field.rules.is_required() {
        format!("{} *", field.label)
    } else {
        field.label.to_string()
    };

    let input = match field.kind.clone() {
        FieldKind::Checkbox => view! {
            <input
                type="checkbox"
                id=id.clone()
                prop:checked=move || value() == "true"
                on:change=move |ev| set(event_target_checked(&ev).to_string())
            />
        }
        .into_any(),
        FieldKind::TextArea => view! {
            <textarea
                id=id.clone()
                rows="3"
                prop:value=value
                on:input=move |ev| set(event_target_value(&ev))
                on:blur=move |_| on_blur()
            />
        }
        .into_any(),
        FieldKind::Select(source) => {
            let options = move || -> Vec<SelectOption> {
                match &source {
                    OptionSource::Static(options) => options.clone(),
                    OptionSource::Reference(lookup) => lookups.with(|l| {
                        l.get(lookup.resource)
                            .map(|items| {
                                items
                                    .iter()
                                    .map(|i| SelectOption::new(i.id.clone(), i.label.clone()))
                                    .collect()
                            })
                            .unwrap_or_default()
                    }),
                }
            };
            view! {
                <select
                    id=id.clone()
                    prop:value=value
                    on:change=move |ev| set(event_target_value(&ev))
                    on:blur=move |_| on_blur()
                >
                    <option value="">"-- Select --"</option>
                    {move || {
                        let current = value();
                        options()
                            .into_iter()
                            .map(|o| {
                                let selected = o.value == current;
                                view! { <option value=o.value selected=selected>{o.label}</option> }
                            })
                            .collect_view()
                    }}
                </select>
            }
            .into_any()
        }
        kind => {
            let (input_type, step) = match kind {
                FieldKind::Email => ("email", None),
                FieldKind::Password => ("password", None),
                FieldKind::Date => ("date", None),
                FieldKind::Number { integer: true } => ("number", Some("1")),
                FieldKind::Number { integer: false } => ("number", Some("any")),
                _ => ("text", None),
            };
            view! {
                <input
                    type=input_type
                    step=step
                    id=id.clone()
                    prop:value=value
                    on:input=move |ev| set(event_target_value(&ev))
                    on:blur=move |_| on_blur()
                />
            }
            .into_any()
        }
    };

    view! {
        <div class=move || if error().is_some() { "form-group has-error" } else { "form-group" }>
            <label for=id>{label}</label>
            {input}
            {field.hint.map(|hint| view! { <small class="form-hint">{hint}</small> })}
            {move || error().map(|message| view! { <div class="field-error">{message}</div> })}
        </div>
    }
}
