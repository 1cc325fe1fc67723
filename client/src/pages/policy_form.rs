//! Form screen shared by the create, edit and view routes.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages build a [`PolicyFormState`] for their route and hand it here. The
//! screen renders the fields, sends the submit and returns to the list when
//! the backend accepts it.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::policy_form_fields::PolicyFormFields;
use crate::state::notifications::NotificationQueue;
use crate::state::policy_form::{PolicyFormState, SubmitStart};
use crate::util::routes::AppRoute;

#[component]
pub fn PolicyFormScreen(form: RwSignal<PolicyFormState>) -> impl IntoView {
    let notifications = expect_context::<RwSignal<NotificationQueue>>();
    let navigate = use_navigate();
    let pending_route = RwSignal::new(None::<AppRoute>);

    Effect::new(move || {
        if let Some(route) = pending_route.get() {
            pending_route.set(None);
            navigate(&route.href(), NavigateOptions::default());
        }
    });

    let on_submit = move |_| submit(form, notifications, pending_route);
    let submit_label = move || form.with(PolicyFormState::submit_label);

    view! {
        <section class="policy-form">
            <h2 class="policy-form__title">"IAM-X Policy"</h2>
            <PolicyFormFields form=form />
            <div class="dialog__actions policy-form__actions">
                <button class="btn btn--link" on:click=move |_| pending_route.set(Some(AppRoute::List))>
                    "Cancel"
                </button>
                {move || {
                    submit_label()
                        .map(|label| {
                            view! {
                                <button
                                    class="btn btn--primary"
                                    disabled=move || form.with(|f| f.submitting || f.is_locked())
                                    on:click=on_submit
                                >
                                    {label}
                                </button>
                            }
                        })
                }}
            </div>
        </section>
    }
}

fn submit(
    form: RwSignal<PolicyFormState>,
    notifications: RwSignal<NotificationQueue>,
    pending_route: RwSignal<Option<AppRoute>>,
) {
    let stamp = crate::util::clock::now_iso();
    let Some(start) = form.try_update(|f| f.begin_submit(&stamp)) else {
        return;
    };
    match start {
        SubmitStart::Send(request) => {
            #[cfg(feature = "hydrate")]
            {
                use crate::state::policy_form::SubmitOutcome;

                leptos::task::spawn_local(async move {
                    let result =
                        crate::state::policy_form::send_submit(&crate::net::api::HttpPolicyApi, &request).await;
                    let stamp = crate::util::clock::now_iso();
                    match form.try_update(|f| f.finish_submit(result, &stamp)) {
                        Some(SubmitOutcome::Saved(route)) => pending_route.set(Some(route)),
                        Some(SubmitOutcome::Notify(notice)) => {
                            log::warn!("policy save rejected: {}", notice.content);
                            notifications.update(|q| q.push(notice));
                        }
                        Some(SubmitOutcome::Logged(err)) => log::warn!("policy save failed: {err}"),
                        None => {}
                    }
                });
            }
            #[cfg(not(feature = "hydrate"))]
            let _ = (request, pending_route);
        }
        SubmitStart::Blocked(notice) => notifications.update(|q| q.push(notice)),
        SubmitStart::Ignored => {}
    }
}
