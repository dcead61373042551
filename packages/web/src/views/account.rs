//! Account view: profile details and password change.
//!
//! Two independent forms, each with its own pending flag so one in-flight
//! save never blocks the other. The profile is a single row keyed by the
//! user id, loaded once on mount.

use dioxus::prelude::*;
use ui::{use_auth, use_toast, validate};

#[component]
pub fn Account() -> Element {
    let auth = use_auth();
    let toasts = use_toast();

    // Profile form state.
    let mut first_name = use_signal(String::new);
    let mut last_name = use_signal(String::new);
    let mut avatar_url = use_signal(String::new);
    let mut avatar_error = use_signal(|| Option::<String>::None);
    let mut profile_saving = use_signal(|| false);

    // Password form state.
    let mut new_password = use_signal(String::new);
    let mut confirm_password = use_signal(String::new);
    let mut password_error = use_signal(|| Option::<String>::None);
    let mut password_saving = use_signal(|| false);

    // Load the profile once the session has resolved.
    let _loader = use_resource(move || async move {
        if auth().user.is_none() {
            return;
        }
        match api::get_profile().await {
            Ok(profile) => {
                first_name.set(profile.first_name.unwrap_or_default());
                last_name.set(profile.last_name.unwrap_or_default());
                avatar_url.set(profile.avatar_url.unwrap_or_default());
            }
            Err(e) => {
                tracing::warn!("profile load failed: {e}");
            }
        }
    });

    let handle_profile_save = move |evt: FormEvent| {
        evt.prevent_default();
        spawn(async move {
            let avatar = match validate::optional_url(&avatar_url()) {
                Ok(a) => {
                    avatar_error.set(None);
                    a
                }
                Err(msg) => {
                    avatar_error.set(Some(msg));
                    return;
                }
            };
            let first = first_name().trim().to_string();
            let last = last_name().trim().to_string();

            profile_saving.set(true);
            let result = api::update_profile(
                (!first.is_empty()).then_some(first),
                (!last.is_empty()).then_some(last),
                avatar,
            )
            .await;
            match result {
                Ok(_) => toasts.success("Profile saved"),
                Err(e) => toasts.error(e.to_string()),
            }
            profile_saving.set(false);
        });
    };

    let handle_password_save = move |evt: FormEvent| {
        evt.prevent_default();
        spawn(async move {
            let p = match validate::password(&new_password()) {
                Ok(p) => p,
                Err(msg) => {
                    password_error.set(Some(msg));
                    return;
                }
            };
            if p != confirm_password() {
                password_error.set(Some("Passwords do not match".to_string()));
                return;
            }
            password_error.set(None);

            password_saving.set(true);
            match api::update_password(p).await {
                Ok(()) => {
                    new_password.set(String::new());
                    confirm_password.set(String::new());
                    toasts.success("Password updated");
                }
                Err(e) => toasts.error(e.to_string()),
            }
            password_saving.set(false);
        });
    };

    rsx! {
        section {
            class: "collection-page",

            div {
                class: "collection-header",
                h1 { "Account" }
            }

            div {
                class: "settings-section",
                h2 { "Profile" }

                form {
                    onsubmit: handle_profile_save,

                    div {
                        class: "form-field",
                        label { "First name" }
                        input {
                            r#type: "text",
                            value: first_name(),
                            oninput: move |evt| first_name.set(evt.value()),
                        }
                    }

                    div {
                        class: "form-field",
                        label { "Last name" }
                        input {
                            r#type: "text",
                            value: last_name(),
                            oninput: move |evt| last_name.set(evt.value()),
                        }
                    }

                    div {
                        class: "form-field",
                        label { "Avatar URL" }
                        input {
                            r#type: "url",
                            placeholder: "https://example.com/me.png",
                            value: avatar_url(),
                            oninput: move |evt| avatar_url.set(evt.value()),
                        }
                        if let Some(err) = avatar_error() {
                            p { class: "field-error", "{err}" }
                        }
                    }

                    div {
                        class: "form-actions",
                        button {
                            class: "primary",
                            r#type: "submit",
                            disabled: profile_saving(),
                            if profile_saving() { "Saving..." } else { "Save profile" }
                        }
                    }
                }
            }

            div {
                class: "settings-section",
                h2 { "Change password" }

                form {
                    onsubmit: handle_password_save,

                    if let Some(err) = password_error() {
                        div { class: "form-error", "{err}" }
                    }

                    div {
                        class: "form-field",
                        label { "New password" }
                        input {
                            r#type: "password",
                            placeholder: "Min 8 characters",
                            value: new_password(),
                            oninput: move |evt| new_password.set(evt.value()),
                        }
                    }

                    div {
                        class: "form-field",
                        label { "Confirm new password" }
                        input {
                            r#type: "password",
                            value: confirm_password(),
                            oninput: move |evt| confirm_password.set(evt.value()),
                        }
                    }

                    div {
                        class: "form-actions",
                        button {
                            class: "primary",
                            r#type: "submit",
                            disabled: password_saving(),
                            if password_saving() { "Saving..." } else { "Update password" }
                        }
                    }
                }
            }
        }
    }
}
