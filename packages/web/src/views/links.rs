//! Links view: the saved-link collection with add/edit and delete dialogs.

use api::LinkInfo;
use dioxus::prelude::*;
use ui::{use_collection, validate, DialogState, Freshness, ModalOverlay};

#[component]
pub fn Links() -> Element {
    let links = use_collection(api::list_links);

    // Compose form fields and their inline errors.
    let mut title = use_signal(String::new);
    let mut url = use_signal(String::new);
    let mut title_error = use_signal(|| Option::<String>::None);
    let mut url_error = use_signal(|| Option::<String>::None);

    let mut open_new = move |_| {
        title.set(String::new());
        url.set(String::new());
        title_error.set(None);
        url_error.set(None);
        links.open_new();
    };

    let mut open_edit = move |link: LinkInfo| {
        title.set(link.title.clone());
        url.set(link.url.clone());
        title_error.set(None);
        url_error.set(None);
        links.open_edit(link);
    };

    let handle_submit = move |_| {
        let t = match validate::required_text(&title(), "Title") {
            Ok(t) => {
                title_error.set(None);
                t
            }
            Err(msg) => {
                title_error.set(Some(msg));
                return;
            }
        };
        let u = match validate::absolute_url(&url()) {
            Ok(u) => {
                url_error.set(None);
                u
            }
            Err(msg) => {
                url_error.set(Some(msg));
                return;
            }
        };

        let editing_id = links.dialog.peek().item().map(|l: &LinkInfo| l.id.clone());
        links.submit("Link saved", async move {
            match editing_id {
                Some(id) => api::update_link(id, t, u).await,
                None => api::create_link(t, u).await.map(|_| ()),
            }
        });
    };

    let handle_delete = move |_| {
        let Some(id) = links.dialog.peek().item().map(|l: &LinkInfo| l.id.clone()) else {
            return;
        };
        links.commit_delete("Link deleted", async move { api::delete_link(id).await });
    };

    let dialog = links.dialog;
    let busy = dialog().busy();

    rsx! {
        section {
            class: "collection-page",

            div {
                class: "collection-header",
                h1 { "Links" }
                button {
                    class: "primary",
                    onclick: move |evt| open_new(evt),
                    "Add link"
                }
            }

            if (links.freshness)() == Freshness::Loading {
                p { class: "collection-empty", "Loading..." }
            } else {
                if links.rows.read().is_empty() {
                    p { class: "collection-empty", "No links yet. Save your first one." }
                }
                ul {
                    class: "collection-list",
                    for link in (links.rows)() {
                        li {
                            key: "{link.id}",
                            class: "collection-item",
                            div {
                                class: "item-body",
                                a {
                                    class: "item-title",
                                    href: "{link.url}",
                                    target: "_blank",
                                    "{link.title}"
                                }
                                if let Some(host) = link.host() {
                                    span { class: "item-meta", "{host}" }
                                }
                            }
                            div {
                                class: "item-actions",
                                button {
                                    class: "secondary",
                                    onclick: {
                                        let link = link.clone();
                                        move |_| open_edit(link.clone())
                                    },
                                    "Edit"
                                }
                                button {
                                    class: "danger",
                                    onclick: {
                                        let link = link.clone();
                                        move |_| links.request_delete(link.clone())
                                    },
                                    "Delete"
                                }
                            }
                        }
                    }
                }
            }
        }

        if dialog().composing() {
            ModalOverlay {
                on_close: move |_| links.close(),
                div {
                    class: "dialog",
                    h2 {
                        if dialog().item().is_some() { "Edit link" } else { "New link" }
                    }

                    if let Some(err) = dialog().error() {
                        div { class: "form-error", "{err}" }
                    }

                    div {
                        class: "form-field",
                        label { "Title" }
                        input {
                            r#type: "text",
                            placeholder: "Rust documentation",
                            value: title(),
                            oninput: move |evt| title.set(evt.value()),
                        }
                        if let Some(err) = title_error() {
                            p { class: "field-error", "{err}" }
                        }
                    }

                    div {
                        class: "form-field",
                        label { "URL" }
                        input {
                            r#type: "url",
                            placeholder: "https://doc.rust-lang.org",
                            value: url(),
                            oninput: move |evt| url.set(evt.value()),
                        }
                        if let Some(err) = url_error() {
                            p { class: "field-error", "{err}" }
                        }
                    }

                    div {
                        class: "form-actions",
                        button {
                            class: "primary",
                            disabled: busy,
                            onclick: handle_submit,
                            if busy { "Saving..." } else { "Save" }
                        }
                        button {
                            class: "secondary",
                            onclick: move |_| links.close(),
                            "Cancel"
                        }
                    }
                }
            }
        }

        if let DialogState::ConfirmingDelete(link) | DialogState::Deleting(link) = dialog() {
            ModalOverlay {
                on_close: move |_| links.close(),
                div {
                    class: "dialog",
                    h2 { "Delete link" }
                    p { "Delete \"{link.title}\"? This cannot be undone." }
                    div {
                        class: "form-actions",
                        button {
                            class: "danger",
                            disabled: busy,
                            onclick: handle_delete,
                            if busy { "Deleting..." } else { "Delete" }
                        }
                        button {
                            class: "secondary",
                            onclick: move |_| links.close(),
                            "Cancel"
                        }
                    }
                }
            }
        }
    }
}
