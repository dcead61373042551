//! Saved link model: a titled URL owned by one user.

use serde::{Deserialize, Serialize};

#[cfg(feature = "server")]
use chrono::{DateTime, Utc};
#[cfg(feature = "server")]
use sqlx::FromRow;
#[cfg(feature = "server")]
use uuid::Uuid;

/// Full link record from the database.
#[cfg(feature = "server")]
#[derive(Debug, Clone, FromRow)]
pub struct Link {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(feature = "server")]
impl Link {
    /// Convert to LinkInfo for client consumption.
    pub fn to_info(&self) -> LinkInfo {
        LinkInfo {
            id: self.id.to_string(),
            title: self.title.clone(),
            url: self.url.clone(),
            created_at: self.created_at.to_rfc3339(),
        }
    }
}

/// Link fields safe to send to the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LinkInfo {
    pub id: String,
    pub title: String,
    pub url: String,
    pub created_at: String,
}

impl LinkInfo {
    /// Host portion of the URL, for compact display next to the title.
    pub fn host(&self) -> Option<String> {
        url::Url::parse(&self.url)
            .ok()
            .and_then(|u| u.host_str().map(|h| h.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_of_valid_url() {
        let link = LinkInfo {
            id: "x".into(),
            title: "Docs".into(),
            url: "https://docs.rs/url/latest".into(),
            created_at: String::new(),
        };
        assert_eq!(link.host().as_deref(), Some("docs.rs"));
    }

    #[test]
    fn test_host_of_garbage_is_none() {
        let link = LinkInfo {
            id: "x".into(),
            title: "Bad".into(),
            url: "not a url".into(),
            created_at: String::new(),
        };
        assert_eq!(link.host(), None);
    }
}
