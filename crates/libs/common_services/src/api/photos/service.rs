use crate::api::photos::error::PhotosError;
use crate::api::photos::interfaces::{
    PhotoListQuery, PhotoResponse, RequestUploadRequest, RequestUploadResponse,
};
use crate::database::app_user::User;
use crate::database::photo::{Photo, PhotoStats};
use crate::database::photo_store::PhotoStore;
use crate::storage::ObjectStorage;
use crate::utils::nice_id;
use app_state::constants::PHOTO_ID_LENGTH;
use sqlx::PgPool;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{info, instrument, warn};

const MAX_FILE_SIZE_BYTES: i64 = 500 * 1024 * 1024;

/// Strips path components and control characters from a client-supplied
/// file name so it is safe inside a storage key.
fn sanitize_file_name(file_name: &str) -> String {
    let base = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(file_name)
        .trim();
    let cleaned: String = base
        .chars()
        .filter(|c| !c.is_control())
        .map(|c| if c == ' ' { '_' } else { c })
        .collect();
    if cleaned.is_empty() || cleaned == "." || cleaned == ".." {
        "upload".to_owned()
    } else {
        cleaned
    }
}

fn storage_key(user_id: i32, photo_id: &str, file_name: &str) -> String {
    format!("users/{user_id}/{photo_id}/{file_name}")
}

/// Phase one of the two-phase upload: persist provisional metadata and
/// hand back a presigned PUT URL. The client performs phase two itself.
#[instrument(skip(pool, storage, request))]
pub async fn request_upload(
    pool: &PgPool,
    storage: &dyn ObjectStorage,
    user: &User,
    request: RequestUploadRequest,
    upload_ttl: Duration,
) -> Result<RequestUploadResponse, PhotosError> {
    if request.file_name.trim().is_empty() {
        return Err(PhotosError::Validation("File name cannot be empty.".into()));
    }
    if request.file_size <= 0 || request.file_size > MAX_FILE_SIZE_BYTES {
        return Err(PhotosError::Validation(format!(
            "File size must be between 1 and {MAX_FILE_SIZE_BYTES} bytes."
        )));
    }

    let file_name = sanitize_file_name(&request.file_name);
    let mime_type = request.mime_type.unwrap_or_else(|| {
        mime_guess::from_path(&file_name)
            .first_or_octet_stream()
            .essence_str()
            .to_owned()
    });

    let photo_id = nice_id(PHOTO_ID_LENGTH);
    let key = storage_key(user.id, &photo_id, &file_name);

    let photo = PhotoStore::create(
        pool,
        &photo_id,
        user.id,
        &key,
        &file_name,
        &mime_type,
        request.file_size,
        request.width,
        request.height,
        request.taken_at,
        request.metadata.unwrap_or_else(|| serde_json::json!({})),
    )
    .await?;

    let upload_url = storage.issue_upload_url(&key, &mime_type, upload_ttl).await?;

    info!("Upload intent {photo_id} for user {}", user.id);
    Ok(RequestUploadResponse { photo, upload_url })
}

#[instrument(skip(pool, storage))]
pub async fn list_photos(
    pool: &PgPool,
    storage: &dyn ObjectStorage,
    user: &User,
    query: PhotoListQuery,
    download_ttl: Duration,
) -> Result<Vec<PhotoResponse>, PhotosError> {
    let photos = PhotoStore::list_by_owner(pool, user.id, query.from, query.to).await?;
    Ok(with_download_urls(storage, photos, download_ttl).await)
}

#[instrument(skip(pool, storage))]
pub async fn get_photo(
    pool: &PgPool,
    storage: &dyn ObjectStorage,
    photo_id: &str,
    user: &User,
    download_ttl: Duration,
) -> Result<PhotoResponse, PhotosError> {
    let Some(photo) = PhotoStore::find_owned(pool, photo_id, user.id).await? else {
        return Err(PhotosError::NotFound(format!(
            "photo {photo_id} missing or not owned by user {}",
            user.id
        )));
    };

    let download_url = match storage
        .issue_download_url(&photo.storage_key, download_ttl)
        .await
    {
        Ok(url) => Some(url),
        Err(err) => {
            warn!("Failed to presign {}: {err}", photo.storage_key);
            None
        }
    };

    Ok(PhotoResponse {
        photo,
        download_url,
    })
}

/// Deletes a photo. The metadata row goes first and is authoritative;
/// if the object delete fails afterwards the orphaned blob is logged
/// and left for cleanup.
#[instrument(skip(pool, storage))]
pub async fn delete_photo(
    pool: &PgPool,
    storage: &dyn ObjectStorage,
    photo_id: &str,
    user: &User,
) -> Result<(), PhotosError> {
    let Some(photo) = PhotoStore::find_owned(pool, photo_id, user.id).await? else {
        return Err(PhotosError::NotFound(format!(
            "photo {photo_id} missing or not owned by user {}",
            user.id
        )));
    };

    PhotoStore::delete(pool, photo_id).await?;
    info!("Deleted photo {photo_id}");

    if let Err(err) = storage.delete_object(&photo.storage_key).await {
        warn!(
            "Orphaned object {} after metadata delete: {err}",
            photo.storage_key
        );
    }
    Ok(())
}

#[instrument(skip(pool))]
pub async fn user_stats(pool: &PgPool, user: &User) -> Result<PhotoStats, PhotosError> {
    Ok(PhotoStore::stats(pool, user.id).await?)
}

async fn with_download_urls(
    storage: &dyn ObjectStorage,
    photos: Vec<Photo>,
    ttl: Duration,
) -> Vec<PhotoResponse> {
    let keys: Vec<String> = photos.iter().map(|p| p.storage_key.clone()).collect();
    let mut urls: HashMap<String, Option<String>> = storage
        .issue_batch_download_urls(&keys, ttl)
        .await
        .into_iter()
        .collect();

    photos
        .into_iter()
        .map(|photo| {
            let download_url = urls.remove(&photo.storage_key).flatten();
            PhotoResponse {
                photo,
                download_url,
            }
        })
        .collect()
}
