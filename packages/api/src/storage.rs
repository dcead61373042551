//! # Blob storage — filesystem store with signed download URLs
//!
//! Uploaded document bytes live on the server filesystem under
//! `STORAGE_ROOT` (default `./data/storage`), at opaque paths of the form
//! `<user-id>/<uuid>_<file-name>`. Clients never read the filesystem
//! directly: downloads go through `GET /files/{path}` carrying an expiry
//! timestamp and an HMAC-SHA256 signature, minted here by [`signed_url`] and
//! checked by [`verify`].
//!
//! The signing key is derived from `STORAGE_SIGNING_KEY`; paths are
//! validated against traversal before any filesystem access.

use std::path::{Component, Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;

use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// Errors from blob storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("invalid storage path")]
    InvalidPath,
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn storage_root() -> PathBuf {
    dotenvy::dotenv().ok();
    std::env::var("STORAGE_ROOT")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("./data/storage"))
}

fn signing_key() -> &'static [u8; 32] {
    static KEY: OnceLock<[u8; 32]> = OnceLock::new();
    KEY.get_or_init(|| {
        dotenvy::dotenv().ok();
        let secret = std::env::var("STORAGE_SIGNING_KEY")
            .unwrap_or_else(|_| "alcove-dev-signing-key".to_string());
        // Fixed-length key regardless of the secret's length.
        let digest = Sha256::digest(secret.as_bytes());
        digest.into()
    })
}

/// Resolve a storage path under the root, rejecting empty, absolute, and
/// traversing paths.
fn resolve(path: &str) -> Result<PathBuf, StorageError> {
    if path.is_empty() || path.contains('\\') {
        return Err(StorageError::InvalidPath);
    }
    let rel = Path::new(path);
    let clean = rel
        .components()
        .all(|c| matches!(c, Component::Normal(_)));
    if !clean {
        return Err(StorageError::InvalidPath);
    }
    Ok(storage_root().join(rel))
}

/// Generate a fresh object path for an upload: the owner's id, a globally
/// unique suffix, and the sanitized original file name.
///
/// Path separators and URL-reserved characters are replaced so the path can
/// be interpolated into a download URL verbatim: the string signed by
/// [`signed_url`] must be exactly what the file route extracts back out.
pub fn object_path(user_id: &uuid::Uuid, file_name: &str) -> String {
    let safe: String = file_name
        .chars()
        .map(|c| match c {
            '/' | '\\' | '#' | '?' | '%' | '&' | '=' | '+' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let safe = safe.trim_matches('.').trim();
    let safe = if safe.is_empty() { "file" } else { safe };
    format!("{user_id}/{}_{safe}", uuid::Uuid::new_v4())
}

/// Write blob bytes, creating parent directories as needed.
pub async fn upload(path: &str, bytes: &[u8]) -> Result<(), StorageError> {
    let full = resolve(path)?;
    if let Some(parent) = full.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(&full, bytes).await?;
    Ok(())
}

/// Read blob bytes back.
pub async fn read(path: &str) -> Result<Vec<u8>, StorageError> {
    let full = resolve(path)?;
    Ok(tokio::fs::read(&full).await?)
}

/// Remove a blob object.
pub async fn remove(path: &str) -> Result<(), StorageError> {
    let full = resolve(path)?;
    tokio::fs::remove_file(&full).await?;
    Ok(())
}

fn signature(path: &str, expires: i64) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(signing_key())
        .expect("HMAC accepts any key length");
    mac.update(path.as_bytes());
    mac.update(b"\n");
    mac.update(expires.to_string().as_bytes());
    mac.finalize().into_bytes().to_vec()
}

/// Mint a time-limited download URL for a stored path.
pub fn signed_url(path: &str, ttl: Duration) -> String {
    let expires = chrono::Utc::now().timestamp() + ttl.as_secs() as i64;
    let sig = hex::encode(signature(path, expires));
    format!("/files/{path}?expires={expires}&sig={sig}")
}

/// Check a download request's expiry and signature (constant-time compare).
pub fn verify(path: &str, expires: i64, sig_hex: &str) -> bool {
    if expires < chrono::Utc::now().timestamp() {
        return false;
    }
    let Ok(sig) = hex::decode(sig_hex) else {
        return false;
    };
    let mut mac = HmacSha256::new_from_slice(signing_key())
        .expect("HMAC accepts any key length");
    mac.update(path.as_bytes());
    mac.update(b"\n");
    mac.update(expires.to_string().as_bytes());
    mac.verify_slice(&sig).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_path_is_unique_per_upload() {
        let user = uuid::Uuid::new_v4();
        let a = object_path(&user, "notes.txt");
        let b = object_path(&user, "notes.txt");
        assert_ne!(a, b);
        assert!(a.starts_with(&format!("{user}/")));
        assert!(a.ends_with("_notes.txt"));
    }

    #[test]
    fn test_object_path_sanitizes_separators() {
        let user = uuid::Uuid::new_v4();
        let path = object_path(&user, "../../etc/passwd");
        assert!(!path[37..].contains('/'), "suffix must be a single segment: {path}");
        resolve(&path).unwrap();
    }

    #[test]
    fn test_object_path_survives_url_interpolation() {
        // A minted URL must keep its query intact for names that carry
        // fragment, query, or escape characters.
        let user = uuid::Uuid::new_v4();
        for name in ["report#v2.pdf", "100%.pdf", "a?b&c=d.txt", "tab\there.txt"] {
            let path = object_path(&user, name);
            assert!(
                !path.contains(['#', '?', '%', '&', '=', '+']),
                "reserved character kept in {path}"
            );

            let url = signed_url(&path, Duration::from_secs(60));
            let (route_path, query) = url.split_once('?').unwrap();
            assert_eq!(route_path, format!("/files/{path}"));
            assert!(query.starts_with("expires="), "query lost in {url}");
        }
    }

    #[test]
    fn test_resolve_rejects_traversal() {
        assert!(resolve("../secrets").is_err());
        assert!(resolve("a/../../b").is_err());
        assert!(resolve("/etc/passwd").is_err());
        assert!(resolve("").is_err());
    }

    #[test]
    fn test_signed_url_verifies() {
        let url = signed_url("user/abc_file.txt", Duration::from_secs(3600));
        let query = url.split_once('?').unwrap().1;
        let mut expires = 0i64;
        let mut sig = String::new();
        for pair in query.split('&') {
            let (k, v) = pair.split_once('=').unwrap();
            match k {
                "expires" => expires = v.parse().unwrap(),
                "sig" => sig = v.to_string(),
                _ => {}
            }
        }
        assert!(verify("user/abc_file.txt", expires, &sig));
        // Wrong path, tampered signature, and past expiry all fail.
        assert!(!verify("user/other.txt", expires, &sig));
        assert!(!verify("user/abc_file.txt", expires, "deadbeef"));
        assert!(!verify(
            "user/abc_file.txt",
            chrono::Utc::now().timestamp() - 10,
            &hex::encode(signature("user/abc_file.txt", chrono::Utc::now().timestamp() - 10)),
        ));
    }

    #[tokio::test]
    async fn test_upload_read_remove_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        std::env::set_var("STORAGE_ROOT", dir.path());

        let path = format!("{}/blob.bin", uuid::Uuid::new_v4());
        upload(&path, b"hello blobs").await.unwrap();
        assert_eq!(read(&path).await.unwrap(), b"hello blobs");

        remove(&path).await.unwrap();
        assert!(read(&path).await.is_err());
    }
}
