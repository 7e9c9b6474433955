use crate::database::app_user::User;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use utoipa::ToSchema;

/// Maps to the `share_permission` Postgres enum.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema,
)]
#[sqlx(type_name = "share_permission", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SharePermission {
    View,
    Edit,
}

impl fmt::Display for SharePermission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::View => f.write_str("view"),
            Self::Edit => f.write_str("edit"),
        }
    }
}

/// A per-grantee share on an album.
///
/// The grantee is identified by exactly one of email or username; the
/// target user does not have to exist yet at share time.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AlbumShare {
    pub id: i64,
    pub album_id: String,
    pub grantee_email: Option<String>,
    pub grantee_username: Option<String>,
    pub permission: SharePermission,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl AlbumShare {
    /// Whether this share currently applies to `user`.
    ///
    /// Grantee matching is exact (persistence-layer collation); an
    /// `expires_at` in the past means "not shared", though the row itself
    /// is kept around.
    #[must_use]
    pub fn applies_to(&self, user: &User, now: DateTime<Utc>) -> bool {
        if let Some(expires_at) = self.expires_at
            && expires_at <= now
        {
            return false;
        }
        match (&self.grantee_email, &self.grantee_username) {
            (Some(email), _) => email == &user.email,
            (None, Some(username)) => username == &user.username,
            (None, None) => false,
        }
    }
}
