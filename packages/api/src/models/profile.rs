//! Profile model: optional display details, one row per user keyed by the
//! user id itself.

use serde::{Deserialize, Serialize};

#[cfg(feature = "server")]
use chrono::{DateTime, Utc};
#[cfg(feature = "server")]
use sqlx::FromRow;
#[cfg(feature = "server")]
use uuid::Uuid;

/// Full profile record from the database.
#[cfg(feature = "server")]
#[derive(Debug, Clone, FromRow)]
pub struct Profile {
    pub user_id: Uuid,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub avatar_url: Option<String>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(feature = "server")]
impl Profile {
    /// Convert to ProfileInfo for client consumption.
    pub fn to_info(&self) -> ProfileInfo {
        ProfileInfo {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            avatar_url: self.avatar_url.clone(),
        }
    }
}

/// Profile fields safe to send to the client. `Default` is the empty profile
/// served before the user has saved anything.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProfileInfo {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub avatar_url: Option<String>,
}

impl ProfileInfo {
    /// "First Last", either half optional; `None` when both are unset.
    pub fn full_name(&self) -> Option<String> {
        match (self.first_name.as_deref(), self.last_name.as_deref()) {
            (None, None) => None,
            (first, last) => Some(
                [first, last]
                    .into_iter()
                    .flatten()
                    .collect::<Vec<_>>()
                    .join(" "),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name_both_parts() {
        let p = ProfileInfo {
            first_name: Some("Ada".into()),
            last_name: Some("Lovelace".into()),
            avatar_url: None,
        };
        assert_eq!(p.full_name().as_deref(), Some("Ada Lovelace"));
    }

    #[test]
    fn test_full_name_single_part() {
        let p = ProfileInfo {
            first_name: Some("Ada".into()),
            ..Default::default()
        };
        assert_eq!(p.full_name().as_deref(), Some("Ada"));
    }

    #[test]
    fn test_full_name_empty_profile() {
        assert_eq!(ProfileInfo::default().full_name(), None);
    }
}
