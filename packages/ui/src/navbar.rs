use dioxus::prelude::*;

use crate::auth::{use_auth, LogoutButton};

/// Top navigation bar: section links, the signed-in user's email, sign out.
///
/// The active section is highlighted by comparing against `active`, which the
/// shell layout derives from the current route.
#[component]
pub fn Navbar(active: String) -> Element {
    let auth = use_auth();

    let sections = [
        ("links", "/links", "Links"),
        ("documents", "/documents", "Documents"),
        ("memos", "/memos", "Memos"),
        ("account", "/account", "Account"),
    ];

    rsx! {
        header {
            class: "navbar",
            span { class: "navbar-brand", "Alcove" }
            nav {
                class: "navbar-sections",
                for (key, href, label) in sections {
                    a {
                        key: "{key}",
                        class: if active == key { "navbar-link active" } else { "navbar-link" },
                        href: "{href}",
                        "{label}"
                    }
                }
            }
            div {
                class: "navbar-user",
                if let Some(user) = auth().user {
                    span { class: "navbar-email", "{user.email}" }
                }
                LogoutButton { class: "secondary" }
            }
        }
    }
}
