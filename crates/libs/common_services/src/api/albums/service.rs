use crate::api::albums::access::AlbumAccess;
use crate::api::albums::error::AlbumError;
use crate::api::albums::interfaces::{
    AddPhotosRequest, AddPhotosResponse, AlbumDetailsResponse, AlbumListResponse, AlbumPhoto,
    CreateAlbumRequest, PublicAlbumResponse, PublicLinkRequest, PublicLinkResponse, PublicPhoto,
    ShareAlbumRequest, UpdateAlbumRequest,
};
use crate::api::albums::token::{generate_public_token, is_well_formed};
use crate::database::album::album::Album;
use crate::database::album::album_share::AlbumShare;
use crate::database::album_store::AlbumStore;
use crate::database::app_user::User;
use crate::database::photo::Photo;
use crate::database::photo_store::PhotoStore;
use crate::storage::ObjectStorage;
use crate::utils::nice_id;
use app_state::constants::ALBUM_ID_LENGTH;
use chrono::Utc;
use sqlx::PgPool;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{info, instrument};
use url::Url;

/// Loads an album and its shares, resolving what `user` may do with it.
///
/// Missing albums and denied callers both surface as `NotFound` so a
/// response never reveals whether the album exists.
async fn authorize(
    pool: &PgPool,
    album_id: &str,
    user: &User,
) -> Result<(Album, Vec<AlbumShare>, AlbumAccess), AlbumError> {
    let Some(album) = AlbumStore::find_by_id(pool, album_id).await? else {
        return Err(AlbumError::NotFound(format!("no album {album_id}")));
    };
    let shares = AlbumStore::list_shares(pool, album_id).await?;
    let access = AlbumAccess::resolve(&album, &shares, user, Utc::now());
    if !access.can_view() {
        return Err(AlbumError::NotFound(format!(
            "user {} denied on album {album_id}",
            user.id
        )));
    }
    Ok((album, shares, access))
}

/// Pairs each photo with a freshly presigned download URL.
async fn resolve_photo_urls(
    storage: &dyn ObjectStorage,
    photos: Vec<Photo>,
    ttl: Duration,
) -> Vec<AlbumPhoto> {
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
            AlbumPhoto {
                photo,
                download_url,
            }
        })
        .collect()
}

#[instrument(skip(pool, request))]
pub async fn create_album(
    pool: &PgPool,
    user: &User,
    request: CreateAlbumRequest,
) -> Result<Album, AlbumError> {
    let title = request.title.trim();
    if title.is_empty() {
        return Err(AlbumError::Validation("Album title cannot be empty.".into()));
    }

    let album_id = nice_id(ALBUM_ID_LENGTH);
    info!("Creating album {album_id} for user {}", user.id);
    Ok(AlbumStore::create(pool, &album_id, user.id, title, request.description).await?)
}

/// Owned and shared-with-me listings, fetched concurrently.
#[instrument(skip(pool))]
pub async fn list_albums(
    pool: &PgPool,
    user: &User,
) -> Result<AlbumListResponse, AlbumError> {
    let (owned, shared_with_me) = tokio::join!(
        AlbumStore::list_owned(pool, user.id),
        AlbumStore::list_shared_with(pool, &user.email, &user.username),
    );
    Ok(AlbumListResponse {
        owned: owned?,
        shared_with_me: shared_with_me?,
    })
}

#[instrument(skip(pool, storage))]
pub async fn get_album(
    pool: &PgPool,
    storage: &dyn ObjectStorage,
    album_id: &str,
    user: &User,
    download_ttl: Duration,
) -> Result<AlbumDetailsResponse, AlbumError> {
    let (album, shares, access) = authorize(pool, album_id, user).await?;

    let photos = AlbumStore::list_photos(pool, album_id).await?;
    let photos = resolve_photo_urls(storage, photos, download_ttl).await;

    Ok(AlbumDetailsResponse {
        album,
        photos,
        shares: access.is_owner().then_some(shares),
    })
}

#[instrument(skip(pool, request))]
pub async fn update_album(
    pool: &PgPool,
    album_id: &str,
    user: &User,
    request: UpdateAlbumRequest,
) -> Result<Album, AlbumError> {
    let (_, _, access) = authorize(pool, album_id, user).await?;
    if !access.is_owner() {
        return Err(AlbumError::NotFound(format!(
            "user {} is not the owner of album {album_id}",
            user.id
        )));
    }

    if let Some(title) = &request.title
        && title.trim().is_empty()
    {
        return Err(AlbumError::Validation("Album title cannot be empty.".into()));
    }

    // The cover must already be a member of the album; clearing it to
    // null needs no check.
    if let Some(Some(cover_id)) = &request.cover_photo_id
        && !AlbumStore::is_member(pool, album_id, cover_id).await?
    {
        return Err(AlbumError::Validation(
            "Cover photo is not part of this album.".into(),
        ));
    }

    Ok(AlbumStore::update(
        pool,
        album_id,
        request.title.map(|t| t.trim().to_owned()),
        request.description,
        request.cover_photo_id,
    )
    .await?)
}

#[instrument(skip(pool))]
pub async fn delete_album(
    pool: &PgPool,
    album_id: &str,
    user: &User,
) -> Result<(), AlbumError> {
    let (_, _, access) = authorize(pool, album_id, user).await?;
    if !access.is_owner() {
        return Err(AlbumError::NotFound(format!(
            "user {} is not the owner of album {album_id}",
            user.id
        )));
    }

    info!("Deleting album {album_id}");
    AlbumStore::delete(pool, album_id).await?;
    Ok(())
}

/// Adds photos to the album. Every id must belong to the album owner;
/// photos already present are counted as skipped rather than failing
/// the whole request.
#[instrument(skip(pool, request))]
pub async fn add_photos_to_album(
    pool: &PgPool,
    album_id: &str,
    user: &User,
    request: AddPhotosRequest,
) -> Result<AddPhotosResponse, AlbumError> {
    let (album, _, access) = authorize(pool, album_id, user).await?;
    if !access.can_edit_membership() {
        return Err(AlbumError::NotFound(format!(
            "user {} may not edit album {album_id}",
            user.id
        )));
    }

    if request.photo_ids.is_empty() {
        return Err(AlbumError::Validation("No photos given.".into()));
    }

    let mut photo_ids = request.photo_ids;
    photo_ids.sort_unstable();
    photo_ids.dedup();

    // Memberships may only reference the album owner's photos, no matter
    // who performs the add; misses are reported as not found without
    // confirming existence.
    let owned = PhotoStore::filter_owned_ids(pool, album.owner_id, &photo_ids).await?;
    if owned.len() != photo_ids.len() {
        return Err(AlbumError::NotFound(
            "one or more photos missing or not owned by the album owner".into(),
        ));
    }

    let total = photo_ids.len();
    let added = AlbumStore::add_photos(pool, album_id, &photo_ids, user.id).await?;
    Ok(AddPhotosResponse {
        total,
        added,
        skipped: total as u64 - added,
    })
}

#[instrument(skip(pool))]
pub async fn remove_photo_from_album(
    pool: &PgPool,
    album_id: &str,
    photo_id: &str,
    user: &User,
) -> Result<(), AlbumError> {
    let (_, _, access) = authorize(pool, album_id, user).await?;
    if !access.can_edit_membership() {
        return Err(AlbumError::NotFound(format!(
            "user {} may not edit album {album_id}",
            user.id
        )));
    }

    let result = AlbumStore::remove_photo(pool, album_id, photo_id).await?;
    if result.rows_affected() == 0 {
        return Err(AlbumError::NotFound(format!(
            "photo {photo_id} is not in album {album_id}"
        )));
    }
    Ok(())
}

/// Grants or replaces a share. One grantee per request; sharing the same
/// grantee again overwrites the earlier grant.
#[instrument(skip(pool, request))]
pub async fn share_album(
    pool: &PgPool,
    album_id: &str,
    user: &User,
    request: ShareAlbumRequest,
) -> Result<AlbumShare, AlbumError> {
    let (_, _, access) = authorize(pool, album_id, user).await?;
    if !access.is_owner() {
        return Err(AlbumError::NotFound(format!(
            "user {} is not the owner of album {album_id}",
            user.id
        )));
    }

    let grantee_email = request
        .grantee_email
        .map(|e| e.trim().to_owned())
        .filter(|e| !e.is_empty());
    let grantee_username = request
        .grantee_username
        .map(|u| u.trim().to_owned())
        .filter(|u| !u.is_empty());

    match (&grantee_email, &grantee_username) {
        (Some(_), None) | (None, Some(_)) => {}
        _ => {
            return Err(AlbumError::Validation(
                "Exactly one of grantee_email or grantee_username is required.".into(),
            ));
        }
    }

    if let Some(expires_at) = request.expires_at
        && expires_at <= Utc::now()
    {
        return Err(AlbumError::Validation(
            "Share expiry must be in the future.".into(),
        ));
    }

    Ok(AlbumStore::upsert_share(
        pool,
        album_id,
        grantee_email,
        grantee_username,
        request.permission,
        request.expires_at,
    )
    .await?)
}

/// Installs a fresh public token. Any previously issued token stops
/// working the moment the new one lands.
#[instrument(skip(pool, request))]
pub async fn generate_public_link(
    pool: &PgPool,
    album_id: &str,
    user: &User,
    request: PublicLinkRequest,
    public_base_url: &Url,
) -> Result<PublicLinkResponse, AlbumError> {
    let (_, _, access) = authorize(pool, album_id, user).await?;
    if !access.is_owner() {
        return Err(AlbumError::NotFound(format!(
            "user {} is not the owner of album {album_id}",
            user.id
        )));
    }

    if let Some(expires_at) = request.expires_at
        && expires_at <= Utc::now()
    {
        return Err(AlbumError::Validation(
            "Link expiry must be in the future.".into(),
        ));
    }

    let token = generate_public_token();
    let album = AlbumStore::set_public_token(pool, album_id, &token, request.expires_at).await?;

    let public_url = public_base_url
        .join(&format!("public/albums/{token}"))
        .map_err(|e| AlbumError::Internal(e.into()))?;

    info!("Issued public link for album {album_id}");
    Ok(PublicLinkResponse {
        public_token: token,
        public_url: public_url.into(),
        expires_at: album.public_expires_at,
    })
}

/// Revokes the public link. Revoking an album that has none is a no-op.
#[instrument(skip(pool))]
pub async fn revoke_public_link(
    pool: &PgPool,
    album_id: &str,
    user: &User,
) -> Result<(), AlbumError> {
    let (_, _, access) = authorize(pool, album_id, user).await?;
    if !access.is_owner() {
        return Err(AlbumError::NotFound(format!(
            "user {} is not the owner of album {album_id}",
            user.id
        )));
    }

    AlbumStore::clear_public_token(pool, album_id).await?;
    info!("Revoked public link for album {album_id}");
    Ok(())
}

/// Anonymous read through a public token.
///
/// A token with the wrong shape is rejected outright; unknown, revoked
/// and expired tokens are indistinguishable from the outside.
#[instrument(skip(pool, storage, token))]
pub async fn get_album_by_token(
    pool: &PgPool,
    storage: &dyn ObjectStorage,
    token: &str,
    download_ttl: Duration,
) -> Result<PublicAlbumResponse, AlbumError> {
    if !is_well_formed(token) {
        return Err(AlbumError::Validation(
            "Public token must be 64 hex characters.".into(),
        ));
    }

    let Some(album) = AlbumStore::find_by_public_token(pool, token).await? else {
        return Err(AlbumError::NotFound("unknown public token".into()));
    };
    if !album.public_token_grants_access(token, Utc::now()) {
        return Err(AlbumError::NotFound(format!(
            "public token for album {} no longer grants access",
            album.id
        )));
    }

    let photos = AlbumStore::list_photos(pool, &album.id).await?;
    let keys: Vec<String> = photos.iter().map(|p| p.storage_key.clone()).collect();
    let mut urls: HashMap<String, Option<String>> = storage
        .issue_batch_download_urls(&keys, download_ttl)
        .await
        .into_iter()
        .collect();

    let photos = photos
        .iter()
        .map(|photo| {
            let url = urls.remove(&photo.storage_key).flatten();
            PublicPhoto::from_photo(photo, url)
        })
        .collect();

    Ok(PublicAlbumResponse {
        title: album.title,
        description: album.description,
        created_at: album.created_at,
        photos,
    })
}
