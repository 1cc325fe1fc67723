//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::flashbar::Flashbar;
use crate::components::side_navigation::SideNavigation;
use crate::components::top_navigation::{CONSOLE_TITLE, TopNavigation};
use crate::pages::{
    policies::PoliciesPage,
    policy_create::PolicyCreatePage,
    policy_edit::{PolicyEditPage, PolicyViewPage},
};
use crate::state::{auth::AuthState, notifications::NotificationQueue};

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the session and notification contexts and sets up client-side
/// routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = RwSignal::new(AuthState { user: None, loading: true });
    let notifications = RwSignal::new(NotificationQueue::default());

    provide_context(auth);
    provide_context(notifications);

    Effect::new(move || {
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            use crate::net::api::{HostedSession, SessionContext as _};

            let user = HostedSession.current_user().await;
            auth.set(AuthState { user, loading: false });
        });
    });

    view! {
        <Stylesheet id="leptos" href="/pkg/iamx-console.css"/>
        <Title text=CONSOLE_TITLE/>

        <Router>
            <TopNavigation/>
            <div class="app-layout">
                <SideNavigation/>
                <main class="app-layout__content">
                    <Flashbar/>
                    <Routes fallback=|| "Page not found.".into_view()>
                        <Route path=StaticSegment("") view=PoliciesPage/>
                        <Route path=StaticSegment("create") view=PolicyCreatePage/>
                        <Route path=(StaticSegment("edit"), ParamSegment("id")) view=PolicyEditPage/>
                        <Route path=(StaticSegment("view"), ParamSegment("id")) view=PolicyViewPage/>
                    </Routes>
                </main>
            </div>
        </Router>
    }
}
