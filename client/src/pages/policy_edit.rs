//! Edit and read-only view routes for an existing policy.
//!
//! SYSTEM CONTEXT
//! ==============
//! Both routes address the policy by the `id` path segment and the
//! `policy_name` query parameter, fetch it once on mount and prefill the
//! form with the result.

use leptos::prelude::*;
use leptos_router::hooks::{use_params_map, use_query_map};
use policies::PolicyKey;

use crate::pages::policy_form::PolicyFormScreen;
use crate::state::notifications::NotificationQueue;
use crate::state::policy_form::PolicyFormState;
use crate::util::routes::FormMode;

#[component]
pub fn PolicyEditPage() -> impl IntoView {
    view! { <ExistingPolicy mode=FormMode::Edit /> }
}

#[component]
pub fn PolicyViewPage() -> impl IntoView {
    view! { <ExistingPolicy mode=FormMode::View /> }
}

#[component]
fn ExistingPolicy(mode: FormMode) -> impl IntoView {
    let notifications = expect_context::<RwSignal<NotificationQueue>>();
    let params = use_params_map();
    let query = use_query_map();

    let id = params.with_untracked(|p| p.get("id")).unwrap_or_default();
    let name = query.with_untracked(|q| q.get("policy_name")).unwrap_or_default();
    let key = PolicyKey::new(&id, &name);
    let form = RwSignal::new(PolicyFormState::for_existing(mode, key.clone()));

    Effect::new(move || load(form, notifications, key.clone()));

    view! { <PolicyFormScreen form=form /> }
}

fn load(form: RwSignal<PolicyFormState>, notifications: RwSignal<NotificationQueue>, key: PolicyKey) {
    #[cfg(feature = "hydrate")]
    {
        use policies::PolicyApi as _;

        leptos::task::spawn_local(async move {
            let result = crate::net::api::HttpPolicyApi.get(&key).await;
            if let Err(err) = &result {
                log::warn!("policy load failed: {err}");
            }
            let stamp = crate::util::clock::now_iso();
            if let Some(notice) = form.try_update(|f| f.finish_load(result, &stamp)).flatten() {
                notifications.update(|q| q.push(notice));
            }
        });
    }
    #[cfg(not(feature = "hydrate"))]
    let _ = (form, notifications, key);
}
