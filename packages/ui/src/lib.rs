//! This crate contains all shared UI for the workspace.

mod auth;
pub use auth::{use_auth, AuthProvider, AuthState, LogoutButton};

mod collection;
pub use collection::{use_collection, Collection, DialogState, Freshness};

mod toast;
pub use toast::{use_toast, ToastKind, ToastProvider, Toasts};

mod modal;
pub use modal::ModalOverlay;

mod navbar;
pub use navbar::Navbar;

pub mod validate;
