//! Documents view: uploads, rename, signed-URL viewing, and deletion.
//!
//! The 50 MiB ceiling is enforced here before any bytes are read or sent;
//! the server re-checks it. Viewing requests a one-hour signed URL and opens
//! it in a new tab.

use api::DocumentInfo;
use dioxus::prelude::*;
use ui::{use_collection, use_toast, validate, DialogState, Freshness, ModalOverlay};

#[component]
pub fn Documents() -> Element {
    let docs = use_collection(api::list_documents);
    let toasts = use_toast();

    let mut uploading = use_signal(|| false);

    // Rename dialog field.
    let mut name = use_signal(String::new);
    let mut name_error = use_signal(|| Option::<String>::None);

    let handle_upload = move |evt: FormEvent| {
        let files = evt.files();
        spawn(async move {
            let Some(file) = files.into_iter().next() else {
                return;
            };

            // Local rejection: nothing is read or sent past the ceiling.
            if let Err(msg) = validate::upload_size(file.size(), &file.name()) {
                toasts.error(msg);
                return;
            }

            uploading.set(true);
            match file.read_bytes().await {
                Ok(bytes) => {
                    let mime = file
                        .content_type()
                        .unwrap_or_else(|| "application/octet-stream".to_string());
                    match api::upload_document(file.name(), mime, bytes.to_vec()).await {
                        Ok(_) => {
                            docs.invalidate();
                            toasts.success("Document uploaded");
                        }
                        Err(e) => toasts.error(e.to_string()),
                    }
                }
                Err(e) => toasts.error(format!("Could not read file: {e}")),
            }
            uploading.set(false);
        });
    };

    let handle_view = move |id: String| {
        spawn(async move {
            match api::document_url(id).await {
                Ok(url) => {
                    #[cfg(target_arch = "wasm32")]
                    {
                        if let Some(window) = web_sys::window() {
                            let _ = window.open_with_url_and_target(&url, "_blank");
                        }
                    }
                    #[cfg(not(target_arch = "wasm32"))]
                    let _ = url;
                }
                Err(_) => toasts.error("Could not create download link"),
            }
        });
    };

    let mut open_rename = move |doc: DocumentInfo| {
        name.set(doc.name.clone());
        name_error.set(None);
        docs.open_edit(doc);
    };

    let handle_rename = move |_| {
        let n = match validate::required_text(&name(), "Name") {
            Ok(n) => {
                name_error.set(None);
                n
            }
            Err(msg) => {
                name_error.set(Some(msg));
                return;
            }
        };
        let Some(id) = docs.dialog.peek().item().map(|d: &DocumentInfo| d.id.clone()) else {
            return;
        };
        docs.submit("Document renamed", async move {
            api::rename_document(id, n).await
        });
    };

    let handle_delete = move |_| {
        let Some(id) = docs.dialog.peek().item().map(|d: &DocumentInfo| d.id.clone()) else {
            return;
        };
        docs.commit_delete("Document deleted", async move {
            api::delete_document(id).await
        });
    };

    let dialog = docs.dialog;
    let busy = dialog().busy();

    rsx! {
        section {
            class: "collection-page",

            div {
                class: "collection-header",
                h1 { "Documents" }
                label {
                    class: if uploading() { "primary upload-button disabled" } else { "primary upload-button" },
                    if uploading() { "Uploading..." } else { "Upload file" }
                    input {
                        r#type: "file",
                        disabled: uploading(),
                        onchange: handle_upload,
                    }
                }
            }

            if (docs.freshness)() == Freshness::Loading {
                p { class: "collection-empty", "Loading..." }
            } else {
                if docs.rows.read().is_empty() {
                    p { class: "collection-empty", "No documents yet. Upload one to get started." }
                }
                ul {
                    class: "collection-list",
                    for doc in (docs.rows)() {
                        li {
                            key: "{doc.id}",
                            class: "collection-item",
                            div {
                                class: "item-body",
                                span { class: "item-title", "{doc.name}" }
                                span {
                                    class: "item-meta",
                                    "{doc.mime_type} · {doc.human_size()}"
                                }
                            }
                            div {
                                class: "item-actions",
                                button {
                                    class: "secondary",
                                    onclick: {
                                        let id = doc.id.clone();
                                        move |_| handle_view(id.clone())
                                    },
                                    "View"
                                }
                                button {
                                    class: "secondary",
                                    onclick: {
                                        let doc = doc.clone();
                                        move |_| open_rename(doc.clone())
                                    },
                                    "Rename"
                                }
                                button {
                                    class: "danger",
                                    onclick: {
                                        let doc = doc.clone();
                                        move |_| docs.request_delete(doc.clone())
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
                on_close: move |_| docs.close(),
                div {
                    class: "dialog",
                    h2 { "Rename document" }

                    if let Some(err) = dialog().error() {
                        div { class: "form-error", "{err}" }
                    }

                    div {
                        class: "form-field",
                        label { "Name" }
                        input {
                            r#type: "text",
                            value: name(),
                            oninput: move |evt| name.set(evt.value()),
                        }
                        if let Some(err) = name_error() {
                            p { class: "field-error", "{err}" }
                        }
                    }

                    div {
                        class: "form-actions",
                        button {
                            class: "primary",
                            disabled: busy,
                            onclick: handle_rename,
                            if busy { "Saving..." } else { "Save" }
                        }
                        button {
                            class: "secondary",
                            onclick: move |_| docs.close(),
                            "Cancel"
                        }
                    }
                }
            }
        }

        if let DialogState::ConfirmingDelete(doc) | DialogState::Deleting(doc) = dialog() {
            ModalOverlay {
                on_close: move |_| docs.close(),
                div {
                    class: "dialog",
                    h2 { "Delete document" }
                    p { "Delete \"{doc.name}\"? The stored file is removed as well." }
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
                            onclick: move |_| docs.close(),
                            "Cancel"
                        }
                    }
                }
            }
        }
    }
}
