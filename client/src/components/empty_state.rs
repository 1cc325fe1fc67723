//! Placeholder shown in place of table rows.

use leptos::prelude::*;

use crate::state::policy_list::EmptyState;

#[component]
pub fn EmptyStateView(kind: EmptyState, on_action: Callback<()>) -> impl IntoView {
    view! {
        <div class="empty-state">
            <b class="empty-state__title">{kind.title()}</b>
            <p class="empty-state__subtitle">{kind.subtitle()}</p>
            <button class="btn" on:click=move |_| on_action.run(())>
                {kind.action_label()}
            </button>
        </div>
    }
}
