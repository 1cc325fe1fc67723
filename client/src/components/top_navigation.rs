//! Fixed top bar with the console title and the user menu.
//!
//! SYSTEM CONTEXT
//! ==============
//! Sign-out asks the host for a redirect target; without one the page reloads
//! so the authenticating proxy in front of the host takes over.

use leptos::prelude::*;

use crate::state::auth::AuthState;

/// Console title shown in the top navigation.
pub const CONSOLE_TITLE: &str = "S3 Object Lambda Workshop";

#[component]
pub fn TopNavigation() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let menu_open = RwSignal::new(false);

    let on_sign_out = move |_| {
        menu_open.set(false);
        #[cfg(feature = "hydrate")]
        {
            use crate::net::api::{HostedSession, SessionContext as _};

            leptos::task::spawn_local(async move {
                let target = HostedSession.sign_out().await;
                auth.update(|a| a.user = None);
                let Some(w) = web_sys::window() else {
                    return;
                };
                let _ = match target {
                    crate::net::api::SignOutTarget::Redirect(url) => w.location().set_href(&url),
                    crate::net::api::SignOutTarget::Reload => w.location().reload(),
                };
            });
        }
    };

    view! {
        <header class="top-nav">
            <a class="top-nav__title" href="/">{CONSOLE_TITLE}</a>
            <span class="top-nav__spacer"></span>
            <div class="top-nav__user">
                <button
                    class="btn top-nav__user-button"
                    aria-haspopup="menu"
                    aria-expanded=move || menu_open.get().to_string()
                    on:click=move |_| menu_open.update(|open| *open = !*open)
                >
                    {move || auth.with(AuthState::username)}
                    " ▾"
                </button>
                <Show when=move || menu_open.get()>
                    <ul class="top-nav__menu" role="menu">
                        {move || {
                            auth.with(AuthState::email)
                                .map(|email| view! { <li class="top-nav__menu-email" role="none">{email}</li> })
                        }}
                        <li role="none">
                            <button class="top-nav__menu-item" role="menuitem" on:click=on_sign_out>
                                "Sign out"
                            </button>
                        </li>
                    </ul>
                </Show>
            </div>
        </header>
    }
}
