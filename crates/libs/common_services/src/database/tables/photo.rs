use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// A photo's metadata record.
///
/// The row is created when an upload URL is requested, so it may briefly
/// (or, for abandoned uploads, permanently) describe an object that was
/// never written to storage.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub id: String,
    pub user_id: i32,
    /// Opaque object storage key. Globally unique, immutable once set.
    pub storage_key: String,
    pub original_name: String,
    pub mime_type: String,
    pub file_size: i64,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub taken_at: Option<DateTime<Utc>>,
    #[schema(value_type = Object)]
    pub metadata: serde_json::Value,
    pub uploaded_at: DateTime<Utc>,
}

/// Aggregate statistics over one user's photo library.
#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PhotoStats {
    pub photo_count: i64,
    pub total_bytes: i64,
    pub first_uploaded_at: Option<DateTime<Utc>>,
    pub last_uploaded_at: Option<DateTime<Utc>>,
}
