//! # Collection hook — the shared fetch-cache-mutate-invalidate cycle
//!
//! Every resource view (links, documents, memos) manages the same triangle:
//! local UI state, a cached collection, and the authoritative store behind the
//! server functions. [`use_collection`] implements that cycle once:
//!
//! - the cached rows load through a `use_resource` that waits for the session
//!   to resolve to a user before issuing any request;
//! - a failed fetch keeps the previous rows (stale fallback) and stays silent
//!   on the read path — only mutations surface errors;
//! - every successful mutation bumps an epoch counter, invalidating the whole
//!   cached collection and forcing a refetch (no partial merge of the mutated
//!   row);
//! - dialog and selection state is an explicit state machine
//!   ([`DialogState`]), so a submit can only be in flight once per dialog and
//!   a delete is only reachable through its confirmation step.

use dioxus::prelude::*;

use crate::auth::use_auth;
use crate::toast::{use_toast, Toasts};

/// Freshness of the cached collection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Freshness {
    /// First fetch has not resolved yet.
    Loading,
    /// Cache matches the last successful fetch.
    Ready,
    /// Last fetch failed; rows are the previous value.
    Stale,
}

/// Dialog and selection state for one resource view.
///
/// Transitions: `Idle → Composing → Submitting → Idle` for create/edit, and
/// `Idle → ConfirmingDelete → Deleting → Idle` for delete. A failed submit
/// falls back to the preceding state instead of closing.
#[derive(Debug, Clone, PartialEq)]
pub enum DialogState<T: Clone + PartialEq + 'static> {
    Idle,
    Composing {
        /// `Some` when editing an existing item, `None` when creating.
        editing: Option<T>,
        /// Remote failure from the previous submit attempt, shown in the dialog.
        error: Option<String>,
    },
    Submitting {
        editing: Option<T>,
    },
    ConfirmingDelete(T),
    Deleting(T),
}

impl<T: Clone + PartialEq + 'static> DialogState<T> {
    /// Whether the compose dialog is visible.
    pub fn composing(&self) -> bool {
        matches!(self, Self::Composing { .. } | Self::Submitting { .. })
    }

    /// Whether the delete confirmation is visible.
    pub fn confirming_delete(&self) -> bool {
        matches!(self, Self::ConfirmingDelete(_) | Self::Deleting(_))
    }

    /// Whether a mutation is in flight (submit controls must be disabled).
    pub fn busy(&self) -> bool {
        matches!(self, Self::Submitting { .. } | Self::Deleting(_))
    }

    /// The item being edited or deleted, if any.
    pub fn item(&self) -> Option<&T> {
        match self {
            Self::Composing { editing, .. } | Self::Submitting { editing } => editing.as_ref(),
            Self::ConfirmingDelete(item) | Self::Deleting(item) => Some(item),
            Self::Idle => None,
        }
    }

    /// The error from the last failed submit, if the dialog is showing one.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Composing { error, .. } => error.as_deref(),
            _ => None,
        }
    }

    /// Composing → Submitting, ConfirmingDelete → Deleting. Anything else is
    /// unchanged (a second gesture while busy must not restart the mutation).
    fn begin(self) -> Self {
        match self {
            Self::Composing { editing, .. } => Self::Submitting { editing },
            Self::ConfirmingDelete(item) => Self::Deleting(item),
            other => other,
        }
    }

    /// Failed mutation: reopen the dialog that launched it.
    fn failed(self, error: String) -> Self {
        match self {
            Self::Submitting { editing } => Self::Composing {
                editing,
                error: Some(error),
            },
            Self::Deleting(item) => Self::ConfirmingDelete(item),
            other => other,
        }
    }
}

/// State and operations for one resource collection scoped to the current
/// user. Cheap to copy; hand it to event handlers freely.
pub struct Collection<T: Clone + PartialEq + 'static> {
    pub rows: Signal<Vec<T>>,
    pub freshness: Signal<Freshness>,
    pub dialog: Signal<DialogState<T>>,
    epoch: Signal<u32>,
    toasts: Toasts,
}

impl<T: Clone + PartialEq + 'static> Clone for Collection<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Clone + PartialEq + 'static> Copy for Collection<T> {}

/// Set up the fetch-cache-invalidate cycle for one resource.
///
/// `fetch` is the resource's list server function. It is not called until the
/// session context reports a signed-in user, and re-runs whenever the epoch
/// is bumped by a successful mutation.
pub fn use_collection<T, F, Fut>(fetch: F) -> Collection<T>
where
    T: Clone + PartialEq + 'static,
    F: Fn() -> Fut + Clone + 'static,
    Fut: std::future::Future<Output = Result<Vec<T>, ServerFnError>> + 'static,
{
    let auth = use_auth();
    let mut rows = use_signal(Vec::<T>::new);
    let mut freshness = use_signal(|| Freshness::Loading);
    let dialog = use_signal(|| DialogState::<T>::Idle);
    let epoch = use_signal(|| 0u32);
    let toasts = use_toast();

    let _loader = use_resource(move || {
        let fetch = fetch.clone();
        async move {
            // Subscribe to invalidation.
            let _ = epoch();
            // No request until the session has resolved to a user.
            if auth().user.is_none() {
                return;
            }
            match fetch().await {
                Ok(list) => {
                    rows.set(list);
                    freshness.set(Freshness::Ready);
                }
                Err(e) => {
                    // Stale fallback: keep whatever we had. Read-path
                    // failures are not surfaced as blocking errors.
                    tracing::warn!("collection fetch failed: {e}");
                    freshness.set(Freshness::Stale);
                }
            }
        }
    });

    Collection {
        rows,
        freshness,
        dialog,
        epoch,
        toasts,
    }
}

impl<T: Clone + PartialEq + 'static> Collection<T> {
    /// Open the compose dialog for a new item.
    pub fn open_new(&self) {
        let mut dialog = self.dialog;
        dialog.set(DialogState::Composing {
            editing: None,
            error: None,
        });
    }

    /// Open the compose dialog pre-filled with an existing item.
    pub fn open_edit(&self, item: T) {
        let mut dialog = self.dialog;
        dialog.set(DialogState::Composing {
            editing: Some(item),
            error: None,
        });
    }

    /// Open the delete confirmation for an item.
    pub fn request_delete(&self, item: T) {
        let mut dialog = self.dialog;
        dialog.set(DialogState::ConfirmingDelete(item));
    }

    /// Close any dialog, unless a mutation is still in flight.
    pub fn close(&self) {
        let mut dialog = self.dialog;
        if !dialog.peek().busy() {
            dialog.set(DialogState::Idle);
        }
    }

    /// Force the next read to refetch the whole collection.
    pub fn invalidate(&self) {
        let mut epoch = self.epoch;
        epoch += 1;
    }

    /// Run a create/update mutation from the compose dialog.
    ///
    /// On success the dialog closes, the cache is invalidated, and a toast
    /// confirms; on failure the dialog reopens with the store's message.
    pub fn submit<Fut>(&self, success_message: &'static str, op: Fut)
    where
        Fut: std::future::Future<Output = Result<(), ServerFnError>> + 'static,
    {
        self.run(success_message, op);
    }

    /// Run the delete mutation. Only reachable from the confirmation state;
    /// calling it from anywhere else is a no-op.
    pub fn commit_delete<Fut>(&self, success_message: &'static str, op: Fut)
    where
        Fut: std::future::Future<Output = Result<(), ServerFnError>> + 'static,
    {
        if !matches!(&*self.dialog.peek(), DialogState::ConfirmingDelete(_)) {
            return;
        }
        self.run(success_message, op);
    }

    fn run<Fut>(&self, success_message: &'static str, op: Fut)
    where
        Fut: std::future::Future<Output = Result<(), ServerFnError>> + 'static,
    {
        let mut dialog = self.dialog;
        if dialog.peek().busy() {
            return;
        }
        let started = dialog.peek().clone();
        dialog.set(started.begin());

        let this = *self;
        spawn(async move {
            match op.await {
                Ok(()) => {
                    let mut dialog = this.dialog;
                    dialog.set(DialogState::Idle);
                    this.invalidate();
                    this.toasts.success(success_message);
                }
                Err(e) => {
                    let message = e.to_string();
                    let mut dialog = this.dialog;
                    let current = dialog.peek().clone();
                    dialog.set(current.failed(message.clone()));
                    this.toasts.error(message);
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item(u32);

    #[test]
    fn test_begin_from_composing() {
        let state = DialogState::Composing {
            editing: Some(Item(1)),
            error: None,
        };
        let next = state.begin();
        assert_eq!(
            next,
            DialogState::Submitting {
                editing: Some(Item(1))
            }
        );
        assert!(next.busy());
        assert!(next.composing());
    }

    #[test]
    fn test_begin_from_confirming_delete() {
        let next = DialogState::ConfirmingDelete(Item(2)).begin();
        assert_eq!(next, DialogState::Deleting(Item(2)));
        assert!(next.busy());
        assert!(next.confirming_delete());
    }

    #[test]
    fn test_begin_is_noop_while_busy() {
        let busy = DialogState::Submitting {
            editing: Some(Item(3)),
        };
        assert_eq!(busy.clone().begin(), busy);

        let deleting = DialogState::Deleting(Item(3));
        assert_eq!(deleting.clone().begin(), deleting);
    }

    #[test]
    fn test_failed_submit_reopens_compose_with_error() {
        let state = DialogState::Submitting {
            editing: Some(Item(4)),
        };
        let next = state.failed("duplicate key".to_string());
        assert_eq!(next.error(), Some("duplicate key"));
        assert_eq!(next.item(), Some(&Item(4)));
        assert!(!next.busy());
    }

    #[test]
    fn test_failed_delete_returns_to_confirmation() {
        let next = DialogState::Deleting(Item(5)).failed("gone".to_string());
        assert_eq!(next, DialogState::ConfirmingDelete(Item(5)));
    }

    #[test]
    fn test_idle_exposes_nothing() {
        let idle = DialogState::<Item>::Idle;
        assert!(!idle.composing());
        assert!(!idle.confirming_delete());
        assert!(!idle.busy());
        assert_eq!(idle.item(), None);
        assert_eq!(idle.error(), None);
    }
}
