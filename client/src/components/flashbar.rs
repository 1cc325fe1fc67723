//! Stack of dismissible notifications above the page content.

use leptos::prelude::*;

use crate::state::notifications::NotificationQueue;

/// Renders the shared [`NotificationQueue`], newest first.
#[component]
pub fn Flashbar() -> impl IntoView {
    let notifications = expect_context::<RwSignal<NotificationQueue>>();

    view! {
        <div class="flashbar" role="status" aria-live="polite">
            {move || {
                notifications
                    .get()
                    .iter()
                    .cloned()
                    .map(|item| {
                        let class = format!("flashbar__item flashbar__item--{}", item.kind.class_suffix());
                        let id = item.id;
                        let dismiss = item.dismissible.then(|| {
                            view! {
                                <button
                                    class="btn flashbar__dismiss"
                                    title="Dismiss"
                                    aria-label="Dismiss notification"
                                    on:click=move |_| {
                                        notifications.update(|q| {
                                            q.dismiss(&id);
                                        });
                                    }
                                >
                                    "×"
                                </button>
                            }
                        });
                        view! {
                            <div class=class>
                                <div class="flashbar__body">
                                    <strong class="flashbar__header">{item.header}</strong>
                                    <span class="flashbar__content">{item.content}</span>
                                </div>
                                {dismiss}
                            </div>
                        }
                    })
                    .collect::<Vec<_>>()
            }}
        </div>
    }
}
