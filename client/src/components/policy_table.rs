//! Policy table with header actions, text filter, pagination and
//! preferences.
//!
//! SYSTEM CONTEXT
//! ==============
//! All data and derived views come from [`PolicyListState`]; this component
//! only renders them and forwards user input back into the signal. Header
//! actions are handed to the page through `on_action`, which owns navigation
//! and the delete flow.

use leptos::prelude::*;

use crate::components::empty_state::EmptyStateView;
use crate::state::policy_list::{
    ColumnId, EmptyState, PAGE_SIZE_OPTIONS, PolicyListState, RowAction, SortState, TablePreferences, page_label,
    sort_label,
};
use crate::util::routes::AppRoute;

#[component]
pub fn PolicyTable(
    list: RwSignal<PolicyListState>,
    on_action: Callback<RowAction>,
    on_create: Callback<()>,
) -> impl IntoView {
    let show_preferences = RwSignal::new(false);
    let has_selection = move || list.with(|s| s.selected().is_some());

    let on_empty_action = Callback::new(move |kind: EmptyState| match kind {
        EmptyState::NoPolicies => on_create.run(()),
        EmptyState::NoMatches => list.update(PolicyListState::clear_filter),
    });

    let menu_open = RwSignal::new(false);
    let action_items = move || {
        RowAction::ALL
            .into_iter()
            .map(|action| {
                view! {
                    <li role="none">
                        <button
                            class="policy-table__menu-item"
                            role="menuitem"
                            disabled=move || !action.is_enabled(has_selection())
                            on:click=move |_| {
                                menu_open.set(false);
                                on_action.run(action);
                            }
                        >
                            {action.label()}
                        </button>
                    </li>
                }
            })
            .collect::<Vec<_>>()
    };

    let header_cells = move || {
        let (visible, sort) = list.with(|s| (s.preferences.visible_columns.clone(), s.sort));
        visible
            .into_iter()
            .map(|column| {
                let indicator = sort_indicator(sort, column);
                view! {
                    <th
                        class="policy-table__th policy-table__th--sortable"
                        aria-sort=aria_sort(sort, column)
                        aria-label=sort_label(column, sort)
                        on:click=move |_| list.update(|s| s.toggle_sort(column))
                    >
                        {column.header()}
                        <span class="policy-table__sort">{indicator}</span>
                    </th>
                }
            })
            .collect::<Vec<_>>()
    };

    let rows = move || {
        let state = list.get();
        let columns = state.preferences.visible_columns.clone();
        let selected = state.selected_id.clone();
        state
            .visible()
            .into_iter()
            .map(|policy| {
                let id = policy.id.clone();
                let checked = selected.as_deref() == Some(policy.id.as_str());
                let edit_href = AppRoute::Edit(policy.key()).href();
                let cells = columns
                    .iter()
                    .map(|column| {
                        let text = column.cell(policy);
                        if *column == ColumnId::Name {
                            view! {
                                <td class="policy-table__td">
                                    <a href=edit_href.clone()>{text}</a>
                                </td>
                            }
                            .into_any()
                        } else {
                            view! { <td class="policy-table__td">{text}</td> }.into_any()
                        }
                    })
                    .collect::<Vec<_>>();
                let row_class = if checked { "policy-table__row policy-table__row--selected" } else { "policy-table__row" };
                view! {
                    <tr class=row_class>
                        <td class="policy-table__td policy-table__td--select">
                            <input
                                type="radio"
                                name="policy-selection"
                                aria-label=format!("Select {}", policy.policy_name)
                                prop:checked=checked
                                on:change=move |_| list.update(|s| s.select(&id))
                            />
                        </td>
                        {cells}
                    </tr>
                }
            })
            .collect::<Vec<_>>()
    };

    let pages = move || {
        let (current, count) = list.with(|s| (s.current_page, s.page_count()));
        (1..=count)
            .map(|page| {
                let class = if page == current { "btn pagination__page pagination__page--current" } else { "btn pagination__page" };
                view! {
                    <button
                        class=class
                        aria-label=page_label(page)
                        on:click=move |_| list.update(|s| s.set_page(page))
                    >
                        {page}
                    </button>
                }
            })
            .collect::<Vec<_>>()
    };

    view! {
        <section class="policy-table">
            <header class="policy-table__header">
                <h1 class="policy-table__title">
                    "Policies " <span class="policy-table__counter">{move || list.with(PolicyListState::counter_text)}</span>
                </h1>
                <div class="policy-table__actions">
                    <button class="btn btn--primary" on:click=move |_| on_create.run(())>
                        "Create Policy"
                    </button>
                    <div class="policy-table__dropdown">
                        <button
                            class="btn policy-table__action"
                            aria-haspopup="menu"
                            disabled=move || !has_selection()
                            on:click=move |_| menu_open.update(|open| *open = !*open)
                        >
                            "Action ▾"
                        </button>
                        <Show when=move || menu_open.get() && has_selection()>
                            <ul class="policy-table__menu" role="menu">
                                {action_items()}
                            </ul>
                        </Show>
                    </div>
                </div>
            </header>

            <div class="policy-table__tools">
                <input
                    class="policy-table__filter"
                    type="search"
                    placeholder="Find policies"
                    aria-label="Filter policies"
                    prop:value=move || list.with(|s| s.filter_text.clone())
                    on:input=move |ev| {
                        let text = event_target_value(&ev);
                        list.update(|s| s.set_filter(&text));
                    }
                />
                <span class="policy-table__matches">{move || list.with(PolicyListState::match_count_text)}</span>
                <span class="toolbar__spacer"></span>
                <nav class="pagination" aria-label="Pagination">
                    <button
                        class="btn pagination__prev"
                        aria-label="Previous page"
                        disabled=move || list.with(|s| s.current_page <= 1)
                        on:click=move |_| list.update(|s| s.set_page(s.current_page.saturating_sub(1)))
                    >
                        "‹"
                    </button>
                    {pages}
                    <button
                        class="btn pagination__next"
                        aria-label="Next page"
                        disabled=move || list.with(|s| s.current_page >= s.page_count())
                        on:click=move |_| list.update(|s| s.set_page(s.current_page + 1))
                    >
                        "›"
                    </button>
                </nav>
                <button
                    class="btn policy-table__preferences"
                    title="Preferences"
                    on:click=move |_| show_preferences.set(true)
                >
                    "⚙"
                </button>
            </div>

            <Show
                when=move || !list.with(|s| s.loading)
                fallback=move || view! { <p class="policy-table__loading">"Loading policies"</p> }
            >
                {move || match list.with(PolicyListState::empty_state) {
                    Some(kind) => view! { <EmptyStateView kind=kind on_action=Callback::new(move |()| on_empty_action.run(kind)) /> }.into_any(),
                    None => {
                        view! {
                            <table class="policy-table__table">
                                <thead>
                                    <tr>
                                        <th class="policy-table__th policy-table__th--select"></th>
                                        {header_cells}
                                    </tr>
                                </thead>
                                <tbody>{rows}</tbody>
                            </table>
                        }
                            .into_any()
                    }
                }}
            </Show>

            <Show when=move || show_preferences.get()>
                <PreferencesDialog list=list on_close=Callback::new(move |()| show_preferences.set(false)) />
            </Show>
        </section>
    }
}

fn sort_indicator(sort: Option<SortState>, column: ColumnId) -> &'static str {
    match sort {
        Some(SortState { column: active, descending }) if active == column => {
            if descending { "▼" } else { "▲" }
        }
        _ => "",
    }
}

fn aria_sort(sort: Option<SortState>, column: ColumnId) -> &'static str {
    match sort {
        Some(SortState { column: active, descending }) if active == column => {
            if descending { "descending" } else { "ascending" }
        }
        _ => "none",
    }
}

/// Page size and visible columns, applied on Confirm.
#[component]
fn PreferencesDialog(list: RwSignal<PolicyListState>, on_close: Callback<()>) -> impl IntoView {
    let draft = RwSignal::new(list.with_untracked(|s| s.preferences.clone()));

    let confirm = move |_| {
        let preferences = draft.get_untracked();
        list.update(|s| s.set_preferences(preferences));
        on_close.run(());
    };

    let size_options = PAGE_SIZE_OPTIONS
        .into_iter()
        .map(|size| {
            view! {
                <label class="dialog__option">
                    <input
                        type="radio"
                        name="page-size"
                        prop:checked=move || draft.with(|d| d.page_size == size)
                        on:change=move |_| draft.update(|d| d.page_size = size)
                    />
                    {format!("{size} policies")}
                </label>
            }
        })
        .collect::<Vec<_>>();

    let column_options = ColumnId::ALL
        .into_iter()
        .map(|column| {
            view! {
                <label class="dialog__option">
                    <input
                        type="checkbox"
                        disabled=column.is_locked()
                        prop:checked=move || draft.with(|d| d.is_visible(column))
                        on:change=move |ev| {
                            let on = event_target_checked(&ev);
                            draft.update(|d| toggle_column(d, column, on));
                        }
                    />
                    {column.header()}
                </label>
            }
        })
        .collect::<Vec<_>>();

    view! {
        <div class="dialog-backdrop" on:click=move |_| on_close.run(())>
            <div class="dialog" role="dialog" aria-modal="true" on:click=move |ev| ev.stop_propagation()>
                <h2>"Preferences"</h2>
                <fieldset class="dialog__group">
                    <legend>"Page size"</legend>
                    {size_options}
                </fieldset>
                <fieldset class="dialog__group">
                    <legend>"Select visible columns"</legend>
                    {column_options}
                </fieldset>
                <div class="dialog__actions">
                    <button class="btn" on:click=move |_| on_close.run(())>
                        "Cancel"
                    </button>
                    <button class="btn btn--primary" on:click=confirm>
                        "Confirm"
                    </button>
                </div>
            </div>
        </div>
    }
}

fn toggle_column(preferences: &mut TablePreferences, column: ColumnId, visible: bool) {
    preferences.visible_columns.retain(|c| *c != column);
    if visible {
        preferences.visible_columns.push(column);
    }
}
