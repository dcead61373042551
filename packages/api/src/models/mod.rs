//! Data models for the application.
//!
//! Each resource has two representations: the full database row (server only,
//! derives [`sqlx::FromRow`]) and a client-safe `*Info` projection that crosses
//! the server/client boundary via Dioxus server functions. Projections carry
//! ids and timestamps as `String` so they work in WASM, and never include the
//! owning `user_id` or any credential material.

mod user;
#[cfg(feature = "server")]
pub use user::User;
pub use user::UserInfo;

mod link;
#[cfg(feature = "server")]
pub use link::Link;
pub use link::LinkInfo;

mod document;
#[cfg(feature = "server")]
pub use document::Document;
pub use document::DocumentInfo;

mod memo;
#[cfg(feature = "server")]
pub use memo::Memo;
pub use memo::MemoInfo;

mod profile;
#[cfg(feature = "server")]
pub use profile::Profile;
pub use profile::ProfileInfo;
