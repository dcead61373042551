//! Memos view: titled free-text notes, most recently updated first.

use api::MemoInfo;
use dioxus::prelude::*;
use ui::{use_collection, validate, DialogState, Freshness, ModalOverlay};

#[component]
pub fn Memos() -> Element {
    let memos = use_collection(api::list_memos);

    let mut title = use_signal(String::new);
    let mut content = use_signal(String::new);
    let mut title_error = use_signal(|| Option::<String>::None);

    let mut open_new = move |_| {
        title.set(String::new());
        content.set(String::new());
        title_error.set(None);
        memos.open_new();
    };

    let mut open_edit = move |memo: MemoInfo| {
        title.set(memo.title.clone());
        content.set(memo.content.clone().unwrap_or_default());
        title_error.set(None);
        memos.open_edit(memo);
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
        let body = content();
        let body = (!body.trim().is_empty()).then_some(body);

        let editing_id = memos.dialog.peek().item().map(|m: &MemoInfo| m.id.clone());
        memos.submit("Memo saved", async move {
            match editing_id {
                Some(id) => api::update_memo(id, t, body).await,
                None => api::create_memo(t, body).await.map(|_| ()),
            }
        });
    };

    let handle_delete = move |_| {
        let Some(id) = memos.dialog.peek().item().map(|m: &MemoInfo| m.id.clone()) else {
            return;
        };
        memos.commit_delete("Memo deleted", async move { api::delete_memo(id).await });
    };

    let dialog = memos.dialog;
    let busy = dialog().busy();

    rsx! {
        section {
            class: "collection-page",

            div {
                class: "collection-header",
                h1 { "Memos" }
                button {
                    class: "primary",
                    onclick: move |evt| open_new(evt),
                    "New memo"
                }
            }

            if (memos.freshness)() == Freshness::Loading {
                p { class: "collection-empty", "Loading..." }
            } else {
                if memos.rows.read().is_empty() {
                    p { class: "collection-empty", "No memos yet." }
                }
                ul {
                    class: "collection-list",
                    for memo in (memos.rows)() {
                        li {
                            key: "{memo.id}",
                            class: "collection-item",
                            div {
                                class: "item-body",
                                span { class: "item-title", "{memo.title}" }
                                span { class: "item-meta", "{memo.preview()}" }
                            }
                            div {
                                class: "item-actions",
                                button {
                                    class: "secondary",
                                    onclick: {
                                        let memo = memo.clone();
                                        move |_| open_edit(memo.clone())
                                    },
                                    "Edit"
                                }
                                button {
                                    class: "danger",
                                    onclick: {
                                        let memo = memo.clone();
                                        move |_| memos.request_delete(memo.clone())
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
                on_close: move |_| memos.close(),
                div {
                    class: "dialog",
                    h2 {
                        if dialog().item().is_some() { "Edit memo" } else { "New memo" }
                    }

                    if let Some(err) = dialog().error() {
                        div { class: "form-error", "{err}" }
                    }

                    div {
                        class: "form-field",
                        label { "Title" }
                        input {
                            r#type: "text",
                            placeholder: "Meeting notes",
                            value: title(),
                            oninput: move |evt| title.set(evt.value()),
                        }
                        if let Some(err) = title_error() {
                            p { class: "field-error", "{err}" }
                        }
                    }

                    div {
                        class: "form-field",
                        label { "Content" }
                        textarea {
                            rows: 8,
                            placeholder: "Write anything...",
                            value: content(),
                            oninput: move |evt| content.set(evt.value()),
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
                            onclick: move |_| memos.close(),
                            "Cancel"
                        }
                    }
                }
            }
        }

        if let DialogState::ConfirmingDelete(memo) | DialogState::Deleting(memo) = dialog() {
            ModalOverlay {
                on_close: move |_| memos.close(),
                div {
                    class: "dialog",
                    h2 { "Delete memo" }
                    p { "Delete \"{memo.title}\"? This cannot be undone." }
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
                            onclick: move |_| memos.close(),
                            "Cancel"
                        }
                    }
                }
            }
        }
    }
}
