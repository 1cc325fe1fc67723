//! Name, description and document inputs shared by the form routes.
//!
//! The document editor is a monospace textarea with a live syntax status
//! line. Every input is disabled in view mode and until an existing policy
//! has loaded.

use leptos::prelude::*;

use crate::state::policy_form::{DocumentStatus, PolicyFormState};

#[component]
pub fn PolicyFormFields(form: RwSignal<PolicyFormState>) -> impl IntoView {
    let read_only = move || form.with(PolicyFormState::is_locked);
    let status = Memo::new(move |_| form.with(|f| f.draft.document_status()));
    let status_class = move || match status.get() {
        DocumentStatus::Invalid(_) => "policy-form__status policy-form__status--error",
        DocumentStatus::Empty | DocumentStatus::Valid => "policy-form__status",
    };

    view! {
        <div class="policy-form__fields">
            <label class="policy-form__label">
                "Policy Name"
                <input
                    class="policy-form__input"
                    type="text"
                    placeholder="Enter policy name"
                    autofocus=true
                    disabled=read_only
                    prop:value=move || form.with(|f| f.draft.name.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        form.update(|f| f.draft.name = value);
                    }
                />
            </label>
            <label class="policy-form__label">
                <span>"Policy Description " <i>"- optional"</i></span>
                <textarea
                    class="policy-form__textarea"
                    placeholder="Policy description"
                    disabled=read_only
                    prop:value=move || form.with(|f| f.draft.description.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        form.update(|f| f.draft.description = value);
                    }
                ></textarea>
            </label>
            <label class="policy-form__label policy-form__label--stretch">
                "Policy Document"
                <span class="policy-form__hint">{move || form.with(|f| f.mode.document_hint())}</span>
                <textarea
                    class="policy-form__editor"
                    spellcheck="false"
                    rows="20"
                    disabled=read_only
                    prop:value=move || form.with(|f| f.draft.document.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        form.update(|f| f.draft.document = value);
                    }
                ></textarea>
                <span class=status_class>{move || status.get().label()}</span>
            </label>
        </div>
    }
}
