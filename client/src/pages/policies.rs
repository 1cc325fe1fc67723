//! Policy list page.
//!
//! SYSTEM CONTEXT
//! ==============
//! The landing route. It loads every policy once on mount, then again after
//! each successful delete. Filtering, sorting and paging happen locally.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::delete_policy_modal::DeletePolicyModal;
use crate::components::policy_table::PolicyTable;
use crate::state::notifications::NotificationQueue;
use crate::state::policy_list::{PolicyListState, RowAction, RowActionEffect};
use crate::util::routes::AppRoute;

#[component]
pub fn PoliciesPage() -> impl IntoView {
    let notifications = expect_context::<RwSignal<NotificationQueue>>();
    let list = RwSignal::new(PolicyListState::default());
    let navigate = use_navigate();
    let pending_route = RwSignal::new(None::<AppRoute>);

    Effect::new(move || refresh(list, notifications));

    Effect::new(move || {
        if let Some(route) = pending_route.get() {
            pending_route.set(None);
            navigate(&route.href(), NavigateOptions::default());
        }
    });

    let on_create = Callback::new(move |()| pending_route.set(Some(AppRoute::Create)));

    let on_action = Callback::new(move |action: RowAction| {
        let effect = list.try_update(|s| s.apply_action(action)).unwrap_or(RowActionEffect::Ignored);
        match effect {
            RowActionEffect::Navigate(route) => pending_route.set(Some(route)),
            RowActionEffect::ConfirmDelete => {}
            RowActionEffect::Ignored => {
                #[cfg(feature = "hydrate")]
                log::debug!("row action {} had no effect", action.label());
            }
        }
    });

    let on_delete_cancel = Callback::new(move |()| list.update(PolicyListState::dismiss_delete));
    let on_delete_confirm = Callback::new(move |()| {
        let Some(prompt) = list.try_update(PolicyListState::confirm_delete).flatten() else {
            return;
        };
        #[cfg(feature = "hydrate")]
        {
            leptos::task::spawn_local(async move {
                let outcome =
                    crate::state::policy_list::delete_and_refresh(&crate::net::api::HttpPolicyApi, &prompt).await;
                if let crate::state::policy_list::DeleteOutcome::Failed(err) = &outcome {
                    log::warn!("policy delete failed: {err}");
                }
                let stamp = crate::util::clock::now_iso();
                let notices = list.try_update(|s| s.finish_delete(outcome, &stamp)).unwrap_or_default();
                notifications.update(|q| notices.into_iter().for_each(|n| q.push(n)));
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = prompt;
    });

    view! {
        <div class="policies-page">
            <PolicyTable list=list on_action=on_action on_create=on_create />
            {move || {
                list.with(|s| s.delete_prompt.clone())
                    .map(|prompt| {
                        view! {
                            <DeletePolicyModal
                                prompt=prompt
                                on_cancel=on_delete_cancel
                                on_confirm=on_delete_confirm
                            />
                        }
                    })
            }}
        </div>
    }
}

/// Reload the full policy list into `list`.
fn refresh(list: RwSignal<PolicyListState>, notifications: RwSignal<NotificationQueue>) {
    list.update(PolicyListState::begin_refresh);
    #[cfg(feature = "hydrate")]
    {
        use policies::PolicyApi as _;

        leptos::task::spawn_local(async move {
            let result = crate::net::api::HttpPolicyApi.list().await;
            if let Err(err) = &result {
                log::warn!("policy list failed: {err}");
            }
            let stamp = crate::util::clock::now_iso();
            if let Some(notice) = list.try_update(|s| s.finish_refresh(result, &stamp)).flatten() {
                notifications.update(|q| q.push(notice));
            }
        });
    }
    #[cfg(not(feature = "hydrate"))]
    let _ = notifications;
}
