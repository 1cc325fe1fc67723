//! Side navigation with the policy section and external links.

use leptos::prelude::*;
use leptos_router::hooks::use_location;

use crate::util::routes::{SIDE_NAV_HEADER, SIDE_NAV_ITEMS, is_active};

#[component]
pub fn SideNavigation() -> impl IntoView {
    let pathname = use_location().pathname;

    let items = SIDE_NAV_ITEMS
        .iter()
        .map(|item| match *item {
            Some(link) => {
                let class = move || {
                    if is_active(&link, &pathname.get()) {
                        "side-nav__link side-nav__link--active"
                    } else {
                        "side-nav__link"
                    }
                };
                let target = link.external.then_some("_blank");
                let rel = link.external.then_some("noopener noreferrer");
                view! {
                    <li class="side-nav__item">
                        <a class=class href=link.href target=target rel=rel>
                            {link.text}
                            {link.external.then_some(" ↗")}
                        </a>
                    </li>
                }
                .into_any()
            }
            None => view! { <li class="side-nav__divider" role="separator"></li> }.into_any(),
        })
        .collect::<Vec<_>>();

    view! {
        <nav class="side-nav" aria-label="Console navigation">
            <a class="side-nav__header" href=SIDE_NAV_HEADER.href>
                {SIDE_NAV_HEADER.text}
            </a>
            <ul class="side-nav__list">{items}</ul>
        </nav>
    }
}
