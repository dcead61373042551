//! Transient toast notifications.
//!
//! Every remote-operation failure in the app surfaces here as a dismissible
//! toast; successes get a short confirmation. Toasts auto-dismiss after a few
//! seconds and never escalate to a blocking error state.

use dioxus::prelude::*;

const TOAST_DISMISS_SECS: u64 = 4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    fn class(self) -> &'static str {
        match self {
            Self::Success => "toast toast-success",
            Self::Error => "toast toast-error",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Toast {
    id: u64,
    kind: ToastKind,
    message: String,
}

/// Handle for pushing toasts, available anywhere under [`ToastProvider`].
#[derive(Clone, Copy)]
pub struct Toasts {
    items: Signal<Vec<Toast>>,
    next_id: Signal<u64>,
}

impl Toasts {
    pub fn success(&self, message: impl Into<String>) {
        self.push(ToastKind::Success, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(ToastKind::Error, message.into());
    }

    fn push(&self, kind: ToastKind, message: String) {
        let mut items = self.items;
        let mut next_id = self.next_id;
        let id = next_id();
        next_id.set(id + 1);
        items.write().push(Toast { id, kind, message });

        spawn(async move {
            #[cfg(target_arch = "wasm32")]
            gloo_timers::future::sleep(std::time::Duration::from_secs(TOAST_DISMISS_SECS)).await;
            #[cfg(not(target_arch = "wasm32"))]
            tokio::time::sleep(std::time::Duration::from_secs(TOAST_DISMISS_SECS)).await;

            items.write().retain(|t| t.id != id);
        });
    }

    fn dismiss(&self, id: u64) {
        let mut items = self.items;
        items.write().retain(|t| t.id != id);
    }
}

/// Get the toast handle.
pub fn use_toast() -> Toasts {
    use_context::<Toasts>()
}

/// Provider component that owns the toast stack and renders it.
#[component]
pub fn ToastProvider(children: Element) -> Element {
    let items = use_signal(Vec::<Toast>::new);
    let next_id = use_signal(|| 0u64);
    let toasts = use_context_provider(|| Toasts { items, next_id });

    rsx! {
        {children}

        div {
            class: "toast-stack",
            for toast in items() {
                div {
                    key: "{toast.id}",
                    class: toast.kind.class(),
                    onclick: move |_| toasts.dismiss(toast.id),
                    "{toast.message}"
                }
            }
        }
    }
}
