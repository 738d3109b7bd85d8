use leptos::prelude::*;
use thaw::*;

use super::model::{apply, filter_options, Column, TableState, Tabular};

/// Multi-select filter over one column; options are the loaded values
#[component]
fn ColumnFilter<R: Tabular>(
    column: Column,
    rows: Signal<Vec<R>>,
    state: RwSignal<TableState>,
) -> impl IntoView {
    let key = column.key;
    let options = Memo::new(move |_| rows.with(|r| filter_options(r, key)));
    let selected_count = move || state.with(|s| s.filters.get(key).map_or(0, |v| v.len()));

    view! {
        <details class="column-filter">
            <summary>
                {column.label}
                {move || match selected_count() {
                    0 => String::new(),
                    n => format!(" ({})", n),
                }}
            </summary>
            <div class="column-filter__options">
                <small class="column-filter__hint">"Options reflect loaded rows"</small>
                <For
                    each=move || options.get()
                    key=|value| value.clone()
                    children=move |value: String| {
                        let for_toggle = value.clone();
                        let for_check = value.clone();
                        view! {
                            <label class="column-filter__option">
                                <input
                                    type="checkbox"
                                    prop:checked=move || state.with(|s| s.is_selected(key, &for_check))
                                    on:change=move |_| state.update(|s| s.toggle_filter_value(key, &for_toggle))
                                />
                                {value}
                            </label>
                        }
                    }
                />
            </div>
        </details>
    }
}

#[component]
pub fn DataTable<R: Tabular>(
    #[prop(into)] rows: Signal<Vec<R>>,
    columns: Vec<Column>,
    /// Opens the row's edit screen
    #[prop(optional_no_strip)]
    on_open: Option<Callback<String>>,
    #[prop(optional_no_strip)] on_delete: Option<Callback<String>>,
    /// Extra controls rendered in the actions cell of each row
    #[prop(optional_no_strip)]
    row_actions: Option<Callback<String, AnyView>>,
    #[prop(optional, into)] empty_text: Option<String>,
) -> impl IntoView {
    let state = RwSignal::new(TableState::default());
    let columns = StoredValue::new(columns);
    let empty_text = empty_text.unwrap_or_else(|| "No records found".to_string());
    let has_actions = on_open.is_some() || on_delete.is_some() || row_actions.is_some();
    let span = columns.with_value(|c| c.len()) + usize::from(has_actions);

    let visible = Signal::derive(move || rows.with(|r| state.with(|s| apply(r, s))));
    let filter_columns: Vec<Column> =
        columns.with_value(|c| c.iter().copied().filter(|c| c.multi_select).collect());

    view! {
        <div class="data-table">
            {(!filter_columns.is_empty()).then(|| view! {
                <div class="data-table__filters">
                    {filter_columns
                        .into_iter()
                        .map(|column| view! { <ColumnFilter column=column rows=rows state=state /> })
                        .collect_view()}
                    <Show when=move || state.with(|s| s.active_filters() > 0)>
                        <Button
                            appearance=ButtonAppearance::Transparent
                            on_click=move |_| state.update(|s| s.clear_filters())
                        >
                            "Clear filters"
                        </Button>
                    </Show>
                </div>
            })}
            <Table>
                <TableHeader>
                    <TableRow>
                        {columns
                            .get_value()
                            .into_iter()
                            .map(|column| {
                                let key = column.key;
                                let style = if column.numeric { "text-align: right;" } else { "" };
                                if column.sortable {
                                    view! {
                                        <TableHeaderCell attr:style=style>
                                            <div
                                                class="table__sortable-header"
                                                style="cursor: pointer;"
                                                on:click=move |_| state.update(|s| s.toggle_sort(key))
                                            >
                                                {column.label}
                                                <span class="table__sort-indicator">
                                                    {move || state.with(|s| s.sort_indicator(key))}
                                                </span>
                                            </div>
                                        </TableHeaderCell>
                                    }
                                    .into_any()
                                } else {
                                    view! { <TableHeaderCell attr:style=style>{column.label}</TableHeaderCell> }
                                        .into_any()
                                }
                            })
                            .collect_view()}
                        {has_actions.then(|| view! {
                            <TableHeaderCell attr:style="width: 220px;">"Actions"</TableHeaderCell>
                        })}
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {move || {
                        let rows = visible.get();
                        if rows.is_empty() {
                            let text = empty_text.clone();
                            return view! {
                                <TableRow>
                                    <TableCell attr:colspan=span.to_string() attr:style="padding: 24px; text-align: center;">
                                        {text}
                                    </TableCell>
                                </TableRow>
                            }
                            .into_any();
                        }
                        rows.into_iter()
                            .map(|row| {
                                let id = row.row_id();
                                let cells = columns.with_value(|cols| {
                                    cols.iter()
                                        .map(|column| {
                                            let style = if column.numeric { "text-align: right;" } else { "" };
                                            let text = row.cell(column.key);
                                            view! { <TableCell attr:style=style>{text}</TableCell> }
                                        })
                                        .collect_view()
                                });
                                let open_id = id.clone();
                                let delete_id = id.clone();
                                view! {
                                    <TableRow>
                                        {cells}
                                        {has_actions.then(|| view! {
                                            <TableCell>
                                                <Space>
                                                    {row_actions.map(|actions| actions.run(id.clone()))}
                                                    {on_open.map(|open| {
                                                        let id = open_id.clone();
                                                        view! {
                                                            <Button
                                                                appearance=ButtonAppearance::Secondary
                                                                size=ButtonSize::Small
                                                                on_click=move |_| open.run(id.clone())
                                                            >
                                                                "Edit"
                                                            </Button>
                                                        }
                                                    })}
                                                    {on_delete.map(|delete| {
                                                        let id = delete_id.clone();
                                                        view! {
                                                            <Button
                                                                appearance=ButtonAppearance::Transparent
                                                                size=ButtonSize::Small
                                                                on_click=move |_| delete.run(id.clone())
                                                            >
                                                                "Delete"
                                                            </Button>
                                                        }
                                                    })}
                                                </Space>
                                            </TableCell>
                                        })}
                                    </TableRow>
                                }
                            })
                            .collect_view()
                            .into_any()
                    }}
                </TableBody>
            </Table>
        </div>
    }
}
