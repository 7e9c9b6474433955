use crate::database::album::album::{Album, AlbumWithCount};
use crate::database::album::album_share::{AlbumShare, SharePermission};
use crate::database::photo::Photo;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAlbumRequest {
    pub title: String,
    pub description: Option<String>,
}

/// Album patch. An absent field leaves the column alone; an explicit
/// `null` clears it. The title can change but never clear.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAlbumRequest {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "present_or_null")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "present_or_null")]
    #[schema(value_type = Option<String>)]
    pub cover_photo_id: Option<Option<String>>,
}

/// Keeps a JSON `null` distinguishable from a missing field: the outer
/// `Some` means the field was present in the request body.
fn present_or_null<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddPhotosRequest {
    pub photo_ids: Vec<String>,
}

/// Outcome of a membership add. `skipped` counts photos that were
/// already members; re-adding is not an error.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddPhotosResponse {
    pub total: usize,
    pub added: u64,
    pub skipped: u64,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShareAlbumRequest {
    pub grantee_email: Option<String>,
    pub grantee_username: Option<String>,
    pub permission: SharePermission,
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicLinkRequest {
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicLinkResponse {
    pub public_token: String,
    pub public_url: String,
    pub expires_at: Option<DateTime<Utc>>,
}

/// A member photo plus its short-lived download URL. The URL is `None`
/// when the storage gateway failed for that key; the listing still
/// succeeds.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AlbumPhoto {
    #[serde(flatten)]
    pub photo: Photo,
    pub download_url: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AlbumListResponse {
    pub owned: Vec<AlbumWithCount>,
    pub shared_with_me: Vec<AlbumWithCount>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AlbumDetailsResponse {
    #[serde(flatten)]
    pub album: Album,
    pub photos: Vec<AlbumPhoto>,
    /// Only present for the owner; grantees never see who else has access.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shares: Option<Vec<AlbumShare>>,
}

/// Projection served to anonymous token holders. Deliberately narrower
/// than the authenticated shape: no owner, no shares, no storage keys.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicAlbumResponse {
    pub title: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub photos: Vec<PublicPhoto>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicPhoto {
    pub id: String,
    pub original_name: String,
    pub mime_type: String,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub taken_at: Option<DateTime<Utc>>,
    pub download_url: Option<String>,
}

impl PublicPhoto {
    pub fn from_photo(photo: &Photo, download_url: Option<String>) -> Self {
        Self {
            id: photo.id.clone(),
            original_name: photo.original_name.clone(),
            mime_type: photo.mime_type.clone(),
            width: photo.width,
            height: photo.height,
            taken_at: photo.taken_at,
            download_url,
        }
    }
}
