use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Represents a single album in the database.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    pub id: String,
    pub owner_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub cover_photo_id: Option<String>,
    pub is_public: bool,
    /// The bearer credential for unauthenticated reads. Never serialized
    /// into responses; the issuing endpoint returns it explicitly.
    #[serde(skip_serializing)]
    pub public_token: Option<String>,
    pub public_expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Album {
    /// Whether `token` currently grants public read access to this album.
    #[must_use]
    pub fn public_token_grants_access(&self, token: &str, now: DateTime<Utc>) -> bool {
        match (&self.public_token, self.public_expires_at) {
            (Some(current), None) => current == token,
            (Some(current), Some(expires_at)) => current == token && now < expires_at,
            (None, _) => false,
        }
    }
}

/// An album row together with its photo count, for list views.
#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AlbumWithCount {
    pub id: String,
    pub owner_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub cover_photo_id: Option<String>,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub photo_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn album_with_token(token: Option<&str>, expires_at: Option<DateTime<Utc>>) -> Album {
        Album {
            id: "a1".into(),
            owner_id: 1,
            title: "Trip".into(),
            description: None,
            cover_photo_id: None,
            is_public: token.is_some(),
            public_token: token.map(ToOwned::to_owned),
            public_expires_at: expires_at,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn token_without_expiry_grants_access() {
        let album = album_with_token(Some("t"), None);
        assert!(album.public_token_grants_access("t", Utc::now()));
        assert!(!album.public_token_grants_access("other", Utc::now()));
    }

    #[test]
    fn expired_token_is_treated_like_a_revoked_one() {
        let now = Utc::now();
        let album = album_with_token(Some("t"), Some(now - Duration::seconds(1)));
        assert!(!album.public_token_grants_access("t", now));
    }

    #[test]
    fn token_expiring_in_the_future_still_grants_access() {
        let now = Utc::now();
        let album = album_with_token(Some("t"), Some(now + Duration::seconds(1)));
        assert!(album.public_token_grants_access("t", now));
    }

    #[test]
    fn revoked_album_grants_nothing() {
        let album = album_with_token(None, None);
        assert!(!album.public_token_grants_access("t", Utc::now()));
    }
}
