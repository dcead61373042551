//! Memo model: a titled free-text note. `updated_at` is refreshed on every
//! mutation and drives the newest-first ordering of the memo list.

use serde::{Deserialize, Serialize};

#[cfg(feature = "server")]
use chrono::{DateTime, Utc};
#[cfg(feature = "server")]
use sqlx::FromRow;
#[cfg(feature = "server")]
use uuid::Uuid;

/// Full memo record from the database.
#[cfg(feature = "server")]
#[derive(Debug, Clone, FromRow)]
pub struct Memo {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub content: Option<String>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(feature = "server")]
impl Memo {
    /// Convert to MemoInfo for client consumption.
    pub fn to_info(&self) -> MemoInfo {
        MemoInfo {
            id: self.id.to_string(),
            title: self.title.clone(),
            content: self.content.clone(),
            updated_at: self.updated_at.to_rfc3339(),
        }
    }
}

/// Memo fields safe to send to the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MemoInfo {
    pub id: String,
    pub title: String,
    pub content: Option<String>,
    pub updated_at: String,
}

impl MemoInfo {
    /// First line of the content, for list previews.
    pub fn preview(&self) -> &str {
        self.content
            .as_deref()
            .and_then(|c| c.lines().next())
            .unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_takes_first_line() {
        let memo = MemoInfo {
            id: "x".into(),
            title: "Groceries".into(),
            content: Some("milk\neggs\nbread".into()),
            updated_at: String::new(),
        };
        assert_eq!(memo.preview(), "milk");
    }

    #[test]
    fn test_preview_empty_without_content() {
        let memo = MemoInfo {
            id: "x".into(),
            title: "Empty".into(),
            content: None,
            updated_at: String::new(),
        };
        assert_eq!(memo.preview(), "");
    }
}
