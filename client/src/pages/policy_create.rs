//! Create-policy route.

use leptos::prelude::*;

use crate::pages::policy_form::PolicyFormScreen;
use crate::state::policy_form::PolicyFormState;

#[component]
pub fn PolicyCreatePage() -> impl IntoView {
    let form = RwSignal::new(PolicyFormState::for_create());
    view! { <PolicyFormScreen form=form /> }
}
