//! # Document model for uploaded files
//!
//! A [`Document`] row describes one uploaded file: its display name (the only
//! mutable field), the MIME type and byte size captured at upload time, and
//! the opaque `storage_path` pointing into blob storage. The row and the blob
//! it references are treated as a single unit — see `delete_document` in the
//! crate root for the ordering contract.

use serde::{Deserialize, Serialize};

#[cfg(feature = "server")]
use chrono::{DateTime, Utc};
#[cfg(feature = "server")]
use sqlx::FromRow;
#[cfg(feature = "server")]
use uuid::Uuid;

/// Full document record from the database.
#[cfg(feature = "server")]
#[derive(Debug, Clone, FromRow)]
pub struct Document {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub mime_type: String,
    pub size_bytes: i64,
    pub storage_path: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(feature = "server")]
impl Document {
    /// Convert to DocumentInfo for client consumption.
    ///
    /// The storage path stays server-side; clients reach the blob only
    /// through signed URLs.
    pub fn to_info(&self) -> DocumentInfo {
        DocumentInfo {
            id: self.id.to_string(),
            name: self.name.clone(),
            mime_type: self.mime_type.clone(),
            size_bytes: self.size_bytes,
            created_at: self.created_at.to_rfc3339(),
        }
    }
}

/// Document fields safe to send to the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentInfo {
    pub id: String,
    pub name: String,
    pub mime_type: String,
    pub size_bytes: i64,
    pub created_at: String,
}

impl DocumentInfo {
    /// Human-readable size, e.g. "3.4 MB".
    pub fn human_size(&self) -> String {
        let bytes = self.size_bytes as f64;
        if bytes < 1024.0 {
            format!("{} B", self.size_bytes)
        } else if bytes < 1024.0 * 1024.0 {
            format!("{:.1} KB", bytes / 1024.0)
        } else if bytes < 1024.0 * 1024.0 * 1024.0 {
            format!("{:.1} MB", bytes / (1024.0 * 1024.0))
        } else {
            format!("{:.1} GB", bytes / (1024.0 * 1024.0 * 1024.0))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(size_bytes: i64) -> DocumentInfo {
        DocumentInfo {
            id: "x".into(),
            name: "report.pdf".into(),
            mime_type: "application/pdf".into(),
            size_bytes,
            created_at: String::new(),
        }
    }

    #[test]
    fn test_human_size_bytes() {
        assert_eq!(doc(512).human_size(), "512 B");
    }

    #[test]
    fn test_human_size_kilobytes() {
        assert_eq!(doc(2048).human_size(), "2.0 KB");
    }

    #[test]
    fn test_human_size_megabytes() {
        assert_eq!(doc(5 * 1024 * 1024).human_size(), "5.0 MB");
    }
}
