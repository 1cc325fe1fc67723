//! Confirmation dialog for deleting the selected policy.

use leptos::prelude::*;

use crate::state::policy_list::DeletePrompt;

/// Modal with Cancel and Delete; dismissing it never deletes.
#[component]
pub fn DeletePolicyModal(prompt: DeletePrompt, on_cancel: Callback<()>, on_confirm: Callback<()>) -> impl IntoView {
    view! {
        <div class="dialog-backdrop" on:click=move |_| on_cancel.run(())>
            <div
                class="dialog"
                role="dialog"
                aria-modal="true"
                on:click=move |ev| ev.stop_propagation()
                on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                    if ev.key() == "Escape" {
                        on_cancel.run(());
                    }
                }
            >
                <h2>{prompt.title()}</h2>
                <p class="dialog__danger">{prompt.body()}</p>
                <div class="dialog__actions">
                    <button class="btn" on:click=move |_| on_cancel.run(())>
                        "Cancel"
                    </button>
                    <button class="btn btn--danger" on:click=move |_| on_confirm.run(())>
                        "Delete"
                    </button>
                </div>
            </div>
        </div>
    }
}
