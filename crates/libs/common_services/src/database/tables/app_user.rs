use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Represents a user in the application.
///
/// Users are created on the first successful token verification for a
/// previously unseen identity-provider subject and are never hard-deleted.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i32,
    /// Subject ID at the external identity provider.
    #[serde(skip_serializing)]
    pub auth_provider_id: String,
    pub username: String,
    pub email: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
    /// Free-form profile sub-document (bio, links, preferences).
    #[schema(value_type = Object)]
    pub profile: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
