use dioxus::prelude::*;

use ui::{use_auth, Navbar};

use crate::Route;

/// Layout wrapping every protected view: the route guard plus the shared
/// navigation bar.
///
/// Pure function of the session context. While the initial session check is
/// unresolved it renders a placeholder (unknown is not unauthenticated);
/// once resolved it either renders the protected outlet or redirects to the
/// sign-in view.
#[component]
pub fn Shell() -> Element {
    let auth = use_auth();
    let nav = use_navigator();
    let route = use_route::<Route>();

    let state = auth();
    if state.loading {
        return rsx! {
            div { class: "guard-placeholder", "Loading..." }
        };
    }
    if state.user.is_none() {
        nav.replace(Route::Login {});
        return rsx! {};
    }

    let active = match route {
        Route::Documents {} => "documents",
        Route::Memos {} => "memos",
        Route::Account {} => "account",
        _ => "links",
    };

    rsx! {
        div {
            class: "portal-layout",
            Navbar { active: active }
            main {
                class: "portal-main",
                Outlet::<Route> {}
            }
        }
    }
}
