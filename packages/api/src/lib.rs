//! # API crate — shared fullstack server functions for Alcove
//!
//! This crate is the backbone of the Alcove fullstack architecture. It defines
//! every Dioxus server function the web frontend calls, along with the
//! supporting modules they depend on.
//!
//! ## Modules
//!
//! | Module | Feature gate | Purpose |
//! |--------|-------------|---------|
//! | [`auth`] | — | Email + password authentication, session key, signup domain allow-list |
//! | [`db`] | `server` | PostgreSQL connection pool (lazy `OnceCell` singleton) |
//! | [`models`] | — | Database rows and their client-safe `*Info` projections |
//! | [`storage`] | `server` | Filesystem blob store and HMAC-signed download URLs |
//!
//! ## Server functions exposed here
//!
//! Every public `async fn` in this file is a Dioxus server function, annotated
//! with `#[get(...)]` or `#[post(...)]` and compiled twice: once with full
//! server logic (behind `#[cfg(feature = "server")]`) and once as a thin
//! client stub that simply forwards the call over HTTP.
//!
//! - **Authentication**: `get_current_user`, `register`, `login`, `logout`, `update_password`
//! - **Links**: `list_links`, `create_link`, `update_link`, `delete_link`
//! - **Documents**: `list_documents`, `upload_document`, `rename_document`, `delete_document`, `document_url`
//! - **Memos**: `list_memos`, `create_memo`, `update_memo`, `delete_memo`
//! - **Profile**: `get_profile`, `update_profile`
//!
//! Every row query is scoped by the session user's id; no function reads or
//! writes another user's rows.

use dioxus::prelude::*;

pub mod auth;
#[cfg(feature = "server")]
pub mod db;
pub mod models;
#[cfg(feature = "server")]
pub mod storage;

pub use models::{DocumentInfo, LinkInfo, MemoInfo, ProfileInfo, UserInfo};

/// Upload ceiling for documents: 50 MiB, checked client-side before any
/// network call and re-checked server-side.
pub const MAX_DOCUMENT_BYTES: u64 = 50 * 1024 * 1024;

/// Validity window for signed document download URLs.
#[cfg(feature = "server")]
const DOCUMENT_URL_TTL: std::time::Duration = std::time::Duration::from_secs(60 * 60);

/// Resolve the session to a user id, or fail with "Not authenticated".
#[cfg(feature = "server")]
async fn require_user(session: &tower_sessions::Session) -> Result<uuid::Uuid, ServerFnError> {
    let user_id: Option<String> = session
        .get(auth::SESSION_USER_ID_KEY)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let Some(user_id) = user_id else {
        return Err(ServerFnError::new("Not authenticated"));
    };

    uuid::Uuid::parse_str(&user_id).map_err(|e| ServerFnError::new(e.to_string()))
}

/// Whether a query failed on a unique constraint, so callers can report a
/// conflict instead of the driver's raw error text.
#[cfg(feature = "server")]
fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.is_unique_violation())
}

#[cfg(feature = "server")]
fn validate_title(title: &str, what: &str) -> Result<String, ServerFnError> {
    let title = title.trim().to_string();
    if title.is_empty() {
        return Err(ServerFnError::new(format!("{what} is required")));
    }
    Ok(title)
}

#[cfg(feature = "server")]
fn validate_url(raw: &str) -> Result<String, ServerFnError> {
    let raw = raw.trim();
    match url::Url::parse(raw) {
        Ok(_) => Ok(raw.to_string()),
        Err(_) => Err(ServerFnError::new("URL must be a valid absolute URL")),
    }
}

// ---------------------------------------------------------------------------
// Authentication
// ---------------------------------------------------------------------------

/// Get the current authenticated user from the session.
#[cfg(feature = "server")]
#[get("/api/auth/me", session: tower_sessions::Session)]
pub async fn get_current_user() -> Result<Option<UserInfo>, ServerFnError> {
    use crate::db::get_pool;
    use crate::models::User;

    let user_id: Option<String> = session
        .get(auth::SESSION_USER_ID_KEY)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let Some(user_id) = user_id else {
        return Ok(None);
    };

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let user_uuid =
        uuid::Uuid::parse_str(&user_id).map_err(|e| ServerFnError::new(e.to_string()))?;

    let user: Option<User> = sqlx::query_as("SELECT * FROM users WHERE id = $1")
        .bind(user_uuid)
        .fetch_optional(pool)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(user.map(|u| u.to_info()))
}

#[cfg(not(feature = "server"))]
#[get("/api/auth/me")]
pub async fn get_current_user() -> Result<Option<UserInfo>, ServerFnError> {
    Ok(None)
}

/// Register a new user with email and password.
#[cfg(feature = "server")]
#[post("/api/auth/register", session: tower_sessions::Session)]
pub async fn register(email: String, password: String) -> Result<UserInfo, ServerFnError> {
    use crate::db::get_pool;
    use crate::models::User;

    let email = email.trim().to_lowercase();

    if email.is_empty() || !email.contains('@') {
        return Err(ServerFnError::new("Invalid email address"));
    }
    auth::check_signup_domain(&email).map_err(ServerFnError::new)?;
    if password.len() < 8 {
        return Err(ServerFnError::new("Password must be at least 8 characters"));
    }

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    // Fast path; the INSERT below still decides under concurrency.
    let existing: Option<(i64,)> = sqlx::query_as("SELECT 1::BIGINT AS n FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(pool)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    if existing.is_some() {
        return Err(ServerFnError::new(
            "An account with this email already exists",
        ));
    }

    let password_hash = auth::hash_password(&password).map_err(ServerFnError::new)?;

    let user: User =
        sqlx::query_as("INSERT INTO users (email, password_hash) VALUES ($1, $2) RETURNING *")
            .bind(&email)
            .bind(&password_hash)
            .fetch_one(pool)
            .await
            .map_err(|e| {
                // A concurrent signup can win between the check and here.
                if is_unique_violation(&e) {
                    ServerFnError::new("An account with this email already exists")
                } else {
                    ServerFnError::new(e.to_string())
                }
            })?;

    session
        .insert(auth::SESSION_USER_ID_KEY, user.id.to_string())
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    tracing::info!(user = %user.id, "registered new user");
    Ok(user.to_info())
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/register")]
pub async fn register(email: String, password: String) -> Result<UserInfo, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Log in with email and password.
#[cfg(feature = "server")]
#[post("/api/auth/login", session: tower_sessions::Session)]
pub async fn login(email: String, password: String) -> Result<UserInfo, ServerFnError> {
    use crate::db::get_pool;
    use crate::models::User;

    let email = email.trim().to_lowercase();

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let user: Option<User> = sqlx::query_as("SELECT * FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(pool)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let Some(user) = user else {
        return Err(ServerFnError::new("Invalid email or password"));
    };

    let valid = auth::verify_password(&password, &user.password_hash).map_err(ServerFnError::new)?;

    if !valid {
        return Err(ServerFnError::new("Invalid email or password"));
    }

    session
        .insert(auth::SESSION_USER_ID_KEY, user.id.to_string())
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(user.to_info())
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/login")]
pub async fn login(email: String, password: String) -> Result<UserInfo, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Log out the current user by clearing the session.
#[cfg(feature = "server")]
#[post("/api/auth/logout", session: tower_sessions::Session)]
pub async fn logout() -> Result<(), ServerFnError> {
    session
        .flush()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(())
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/logout")]
pub async fn logout() -> Result<(), ServerFnError> {
    Ok(())
}

/// Change the current user's password.
#[cfg(feature = "server")]
#[post("/api/auth/password", session: tower_sessions::Session)]
pub async fn update_password(new_password: String) -> Result<(), ServerFnError> {
    use crate::db::get_pool;

    let user_id = require_user(&session).await?;

    if new_password.len() < 8 {
        return Err(ServerFnError::new("Password must be at least 8 characters"));
    }

    let password_hash = auth::hash_password(&new_password).map_err(ServerFnError::new)?;

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    sqlx::query("UPDATE users SET password_hash = $1, updated_at = NOW() WHERE id = $2")
        .bind(&password_hash)
        .bind(user_id)
        .execute(pool)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(())
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/password")]
pub async fn update_password(new_password: String) -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

// ---------------------------------------------------------------------------
// Links
// ---------------------------------------------------------------------------

/// List the current user's links, newest first.
#[cfg(feature = "server")]
#[get("/api/links", session: tower_sessions::Session)]
pub async fn list_links() -> Result<Vec<LinkInfo>, ServerFnError> {
    use crate::db::get_pool;
    use crate::models::Link;

    let user_id = require_user(&session).await?;
    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let links: Vec<Link> =
        sqlx::query_as("SELECT * FROM links WHERE user_id = $1 ORDER BY created_at DESC")
            .bind(user_id)
            .fetch_all(pool)
            .await
            .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(links.iter().map(|l| l.to_info()).collect())
}

#[cfg(not(feature = "server"))]
#[get("/api/links")]
pub async fn list_links() -> Result<Vec<LinkInfo>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Create a link owned by the current user.
#[cfg(feature = "server")]
#[post("/api/links", session: tower_sessions::Session)]
pub async fn create_link(title: String, url: String) -> Result<LinkInfo, ServerFnError> {
    use crate::db::get_pool;
    use crate::models::Link;

    let user_id = require_user(&session).await?;
    let title = validate_title(&title, "Title")?;
    let url = validate_url(&url)?;

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let link: Link = sqlx::query_as(
        "INSERT INTO links (user_id, title, url) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(user_id)
    .bind(&title)
    .bind(&url)
    .fetch_one(pool)
    .await
    .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(link.to_info())
}

#[cfg(not(feature = "server"))]
#[post("/api/links")]
pub async fn create_link(title: String, url: String) -> Result<LinkInfo, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Update one link's title and URL, scoped by ownership.
#[cfg(feature = "server")]
#[post("/api/links/update", session: tower_sessions::Session)]
pub async fn update_link(id: String, title: String, url: String) -> Result<(), ServerFnError> {
    use crate::db::get_pool;

    let user_id = require_user(&session).await?;
    let link_id = uuid::Uuid::parse_str(&id).map_err(|e| ServerFnError::new(e.to_string()))?;
    let title = validate_title(&title, "Title")?;
    let url = validate_url(&url)?;

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let result =
        sqlx::query("UPDATE links SET title = $1, url = $2 WHERE id = $3 AND user_id = $4")
            .bind(&title)
            .bind(&url)
            .bind(link_id)
            .bind(user_id)
            .execute(pool)
            .await
            .map_err(|e| ServerFnError::new(e.to_string()))?;

    if result.rows_affected() == 0 {
        return Err(ServerFnError::new("Link not found"));
    }
    Ok(())
}

#[cfg(not(feature = "server"))]
#[post("/api/links/update")]
pub async fn update_link(id: String, title: String, url: String) -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Delete one link, scoped by ownership.
#[cfg(feature = "server")]
#[post("/api/links/delete", session: tower_sessions::Session)]
pub async fn delete_link(id: String) -> Result<(), ServerFnError> {
    use crate::db::get_pool;

    let user_id = require_user(&session).await?;
    let link_id = uuid::Uuid::parse_str(&id).map_err(|e| ServerFnError::new(e.to_string()))?;

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let result = sqlx::query("DELETE FROM links WHERE id = $1 AND user_id = $2")
        .bind(link_id)
        .bind(user_id)
        .execute(pool)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    if result.rows_affected() == 0 {
        return Err(ServerFnError::new("Link not found"));
    }
    Ok(())
}

#[cfg(not(feature = "server"))]
#[post("/api/links/delete")]
pub async fn delete_link(id: String) -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

// ---------------------------------------------------------------------------
// Documents
// ---------------------------------------------------------------------------

/// List the current user's documents, newest first.
#[cfg(feature = "server")]
#[get("/api/documents", session: tower_sessions::Session)]
pub async fn list_documents() -> Result<Vec<DocumentInfo>, ServerFnError> {
    use crate::db::get_pool;
    use crate::models::Document;

    let user_id = require_user(&session).await?;
    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let docs: Vec<Document> =
        sqlx::query_as("SELECT * FROM documents WHERE user_id = $1 ORDER BY created_at DESC")
            .bind(user_id)
            .fetch_all(pool)
            .await
            .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(docs.iter().map(|d| d.to_info()).collect())
}

#[cfg(not(feature = "server"))]
#[get("/api/documents")]
pub async fn list_documents() -> Result<Vec<DocumentInfo>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Upload a document: write the blob, then insert the row.
///
/// The blob write comes first; if it fails, no row is inserted. If the row
/// insert fails after a successful write, the blob is left as an orphan —
/// there is no compensating delete.
#[cfg(feature = "server")]
#[post("/api/documents", session: tower_sessions::Session)]
pub async fn upload_document(
    name: String,
    mime_type: String,
    bytes: Vec<u8>,
) -> Result<DocumentInfo, ServerFnError> {
    use crate::db::get_pool;
    use crate::models::Document;

    let user_id = require_user(&session).await?;
    let name = validate_title(&name, "File name")?;

    if bytes.len() as u64 > MAX_DOCUMENT_BYTES {
        return Err(ServerFnError::new("File exceeds the 50 MiB upload limit"));
    }

    let mime_type = if mime_type.trim().is_empty() {
        "application/octet-stream".to_string()
    } else {
        mime_type
    };

    let path = storage::object_path(&user_id, &name);
    storage::upload(&path, &bytes)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let doc: Document = sqlx::query_as(
        "INSERT INTO documents (user_id, name, mime_type, size_bytes, storage_path)
         VALUES ($1, $2, $3, $4, $5) RETURNING *",
    )
    .bind(user_id)
    .bind(&name)
    .bind(&mime_type)
    .bind(bytes.len() as i64)
    .bind(&path)
    .fetch_one(pool)
    .await
    .map_err(|e| {
        tracing::warn!(%path, "row insert failed after blob write; blob orphaned");
        ServerFnError::new(e.to_string())
    })?;

    Ok(doc.to_info())
}

#[cfg(not(feature = "server"))]
#[post("/api/documents")]
pub async fn upload_document(
    name: String,
    mime_type: String,
    bytes: Vec<u8>,
) -> Result<DocumentInfo, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Rename a document (display name only; the stored blob is untouched).
#[cfg(feature = "server")]
#[post("/api/documents/rename", session: tower_sessions::Session)]
pub async fn rename_document(id: String, name: String) -> Result<(), ServerFnError> {
    use crate::db::get_pool;

    let user_id = require_user(&session).await?;
    let doc_id = uuid::Uuid::parse_str(&id).map_err(|e| ServerFnError::new(e.to_string()))?;
    let name = validate_title(&name, "Name")?;

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let result = sqlx::query("UPDATE documents SET name = $1 WHERE id = $2 AND user_id = $3")
        .bind(&name)
        .bind(doc_id)
        .bind(user_id)
        .execute(pool)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    if result.rows_affected() == 0 {
        return Err(ServerFnError::new("Document not found"));
    }
    Ok(())
}

#[cfg(not(feature = "server"))]
#[post("/api/documents/rename")]
pub async fn rename_document(id: String, name: String) -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Delete a document: remove the blob first, then the row.
///
/// If blob removal fails the row delete is not attempted, so the pair never
/// ends up as a dangling row. A blob that is already gone counts as removed.
#[cfg(feature = "server")]
#[post("/api/documents/delete", session: tower_sessions::Session)]
pub async fn delete_document(id: String) -> Result<(), ServerFnError> {
    use crate::db::get_pool;
    use crate::models::Document;
    use crate::storage::StorageError;

    let user_id = require_user(&session).await?;
    let doc_id = uuid::Uuid::parse_str(&id).map_err(|e| ServerFnError::new(e.to_string()))?;

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let doc: Option<Document> =
        sqlx::query_as("SELECT * FROM documents WHERE id = $1 AND user_id = $2")
            .bind(doc_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
            .map_err(|e| ServerFnError::new(e.to_string()))?;

    let Some(doc) = doc else {
        return Err(ServerFnError::new("Document not found"));
    };

    match storage::remove(&doc.storage_path).await {
        Ok(()) => {}
        Err(StorageError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(ServerFnError::new(e.to_string())),
    }

    sqlx::query("DELETE FROM documents WHERE id = $1 AND user_id = $2")
        .bind(doc_id)
        .bind(user_id)
        .execute(pool)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(())
}

#[cfg(not(feature = "server"))]
#[post("/api/documents/delete")]
pub async fn delete_document(id: String) -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Mint a one-hour signed download URL for a document.
#[cfg(feature = "server")]
#[get("/api/documents/url", session: tower_sessions::Session)]
pub async fn document_url(id: String) -> Result<String, ServerFnError> {
    use crate::db::get_pool;
    use crate::models::Document;

    let user_id = require_user(&session).await?;
    let doc_id = uuid::Uuid::parse_str(&id).map_err(|e| ServerFnError::new(e.to_string()))?;

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let doc: Option<Document> =
        sqlx::query_as("SELECT * FROM documents WHERE id = $1 AND user_id = $2")
            .bind(doc_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
            .map_err(|e| ServerFnError::new(e.to_string()))?;

    let Some(doc) = doc else {
        return Err(ServerFnError::new("Document not found"));
    };

    Ok(storage::signed_url(&doc.storage_path, DOCUMENT_URL_TTL))
}

#[cfg(not(feature = "server"))]
#[get("/api/documents/url")]
pub async fn document_url(id: String) -> Result<String, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

// ---------------------------------------------------------------------------
// Memos
// ---------------------------------------------------------------------------

/// List the current user's memos, most recently updated first.
#[cfg(feature = "server")]
#[get("/api/memos", session: tower_sessions::Session)]
pub async fn list_memos() -> Result<Vec<MemoInfo>, ServerFnError> {
    use crate::db::get_pool;
    use crate::models::Memo;

    let user_id = require_user(&session).await?;
    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let memos: Vec<Memo> =
        sqlx::query_as("SELECT * FROM memos WHERE user_id = $1 ORDER BY updated_at DESC")
            .bind(user_id)
            .fetch_all(pool)
            .await
            .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(memos.iter().map(|m| m.to_info()).collect())
}

#[cfg(not(feature = "server"))]
#[get("/api/memos")]
pub async fn list_memos() -> Result<Vec<MemoInfo>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Create a memo owned by the current user.
#[cfg(feature = "server")]
#[post("/api/memos", session: tower_sessions::Session)]
pub async fn create_memo(title: String, content: Option<String>) -> Result<MemoInfo, ServerFnError> {
    use crate::db::get_pool;
    use crate::models::Memo;

    let user_id = require_user(&session).await?;
    let title = validate_title(&title, "Title")?;
    let content = content.filter(|c| !c.trim().is_empty());

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let memo: Memo = sqlx::query_as(
        "INSERT INTO memos (user_id, title, content) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(user_id)
    .bind(&title)
    .bind(&content)
    .fetch_one(pool)
    .await
    .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(memo.to_info())
}

#[cfg(not(feature = "server"))]
#[post("/api/memos")]
pub async fn create_memo(title: String, content: Option<String>) -> Result<MemoInfo, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Update one memo, refreshing its `updated_at` timestamp.
#[cfg(feature = "server")]
#[post("/api/memos/update", session: tower_sessions::Session)]
pub async fn update_memo(
    id: String,
    title: String,
    content: Option<String>,
) -> Result<(), ServerFnError> {
    use crate::db::get_pool;

    let user_id = require_user(&session).await?;
    let memo_id = uuid::Uuid::parse_str(&id).map_err(|e| ServerFnError::new(e.to_string()))?;
    let title = validate_title(&title, "Title")?;
    let content = content.filter(|c| !c.trim().is_empty());

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let result = sqlx::query(
        "UPDATE memos SET title = $1, content = $2, updated_at = NOW()
         WHERE id = $3 AND user_id = $4",
    )
    .bind(&title)
    .bind(&content)
    .bind(memo_id)
    .bind(user_id)
    .execute(pool)
    .await
    .map_err(|e| ServerFnError::new(e.to_string()))?;

    if result.rows_affected() == 0 {
        return Err(ServerFnError::new("Memo not found"));
    }
    Ok(())
}

#[cfg(not(feature = "server"))]
#[post("/api/memos/update")]
pub async fn update_memo(
    id: String,
    title: String,
    content: Option<String>,
) -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Delete one memo, scoped by ownership.
#[cfg(feature = "server")]
#[post("/api/memos/delete", session: tower_sessions::Session)]
pub async fn delete_memo(id: String) -> Result<(), ServerFnError> {
    use crate::db::get_pool;

    let user_id = require_user(&session).await?;
    let memo_id = uuid::Uuid::parse_str(&id).map_err(|e| ServerFnError::new(e.to_string()))?;

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let result = sqlx::query("DELETE FROM memos WHERE id = $1 AND user_id = $2")
        .bind(memo_id)
        .bind(user_id)
        .execute(pool)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    if result.rows_affected() == 0 {
        return Err(ServerFnError::new("Memo not found"));
    }
    Ok(())
}

#[cfg(not(feature = "server"))]
#[post("/api/memos/delete")]
pub async fn delete_memo(id: String) -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

/// Get the current user's profile. An unset profile reads as empty fields.
#[cfg(feature = "server")]
#[get("/api/profile", session: tower_sessions::Session)]
pub async fn get_profile() -> Result<ProfileInfo, ServerFnError> {
    use crate::db::get_pool;
    use crate::models::Profile;

    let user_id = require_user(&session).await?;
    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let profile: Option<Profile> = sqlx::query_as("SELECT * FROM profiles WHERE user_id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(profile.map(|p| p.to_info()).unwrap_or_default())
}

#[cfg(not(feature = "server"))]
#[get("/api/profile")]
pub async fn get_profile() -> Result<ProfileInfo, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Upsert the current user's profile.
#[cfg(feature = "server")]
#[post("/api/profile", session: tower_sessions::Session)]
pub async fn update_profile(
    first_name: Option<String>,
    last_name: Option<String>,
    avatar_url: Option<String>,
) -> Result<ProfileInfo, ServerFnError> {
    use crate::db::get_pool;
    use crate::models::Profile;

    let user_id = require_user(&session).await?;

    let first_name = first_name.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());
    let last_name = last_name.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());
    let avatar_url = avatar_url.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());

    if let Some(ref avatar) = avatar_url {
        validate_url(avatar).map_err(|_| ServerFnError::new("Avatar URL must be a valid URL"))?;
    }

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let profile: Profile = sqlx::query_as(
        "INSERT INTO profiles (user_id, first_name, last_name, avatar_url)
         VALUES ($1, $2, $3, $4)
         ON CONFLICT (user_id) DO UPDATE SET
            first_name = $2,
            last_name = $3,
            avatar_url = $4,
            updated_at = NOW()
         RETURNING *",
    )
    .bind(user_id)
    .bind(&first_name)
    .bind(&last_name)
    .bind(&avatar_url)
    .fetch_one(pool)
    .await
    .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(profile.to_info())
}

#[cfg(not(feature = "server"))]
#[post("/api/profile")]
pub async fn update_profile(
    first_name: Option<String>,
    last_name: Option<String>,
    avatar_url: Option<String>,
) -> Result<ProfileInfo, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(all(test, feature = "server"))]
mod tests {
    use super::*;

    #[test]
    fn test_unique_violation_only_matches_constraint_errors() {
        // Ordinary driver errors keep their own text; only a database-level
        // unique constraint maps to the duplicate-account message.
        assert!(!is_unique_violation(&sqlx::Error::RowNotFound));
        assert!(!is_unique_violation(&sqlx::Error::PoolTimedOut));
    }

    #[test]
    fn test_validate_title_trims_and_requires_content() {
        assert_eq!(validate_title("  notes  ", "Title").unwrap(), "notes");
        assert!(validate_title("   ", "Title").is_err());
    }

    #[test]
    fn test_validate_url_requires_absolute() {
        assert!(validate_url("https://example.com").is_ok());
        assert!(validate_url("example.com").is_err());
    }
}
