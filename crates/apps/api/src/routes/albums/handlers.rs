use crate::api_state::ApiContext;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use common_services::api::albums::error::AlbumError;
use common_services::api::albums::interfaces::{
    AddPhotosRequest, AddPhotosResponse, AlbumDetailsResponse, AlbumListResponse,
    CreateAlbumRequest, PublicLinkRequest, PublicLinkResponse, ShareAlbumRequest,
    UpdateAlbumRequest,
};
use common_services::api::albums::service::{
    add_photos_to_album, create_album, delete_album, generate_public_link, get_album, list_albums,
    remove_photo_from_album, revoke_public_link, share_album, update_album,
};
use common_services::api::envelope::ApiResponse;
use common_services::database::album::album::Album;
use common_services::database::album::album_share::AlbumShare;
use common_services::database::app_user::User;

/// Create a new album owned by the caller.
#[utoipa::path(
    post,
    path = "/albums",
    tag = "Albums",
    request_body = CreateAlbumRequest,
    responses(
        (status = 201, description = "Album created.", body = Album),
        (status = 400, description = "Invalid album title."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_album_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Json(payload): Json<CreateAlbumRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Album>>), AlbumError> {
    let album = create_album(&context.pool, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(album))))
}

/// List albums the caller owns plus albums shared with them.
#[utoipa::path(
    get,
    path = "/albums",
    tag = "Albums",
    responses(
        (status = 200, description = "Owned and shared album listings.", body = AlbumListResponse),
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_albums_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
) -> Result<Json<ApiResponse<AlbumListResponse>>, AlbumError> {
    let albums = list_albums(&context.pool, &user).await?;
    Ok(Json(ApiResponse::ok(albums)))
}

/// Album details with its photos and fresh download URLs.
///
/// Share rows are included for the owner only.
#[utoipa::path(
    get,
    path = "/albums/{album_id}",
    tag = "Albums",
    params(("album_id" = String, Path, description = "The unique ID of the album.")),
    responses(
        (status = 200, description = "The album with its member photos.", body = AlbumDetailsResponse),
        (status = 404, description = "Album missing or caller has no access."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_album_handler(
    State(context): State<ApiContext>,
    Path(album_id): Path<String>,
    Extension(user): Extension<User>,
) -> Result<Json<ApiResponse<AlbumDetailsResponse>>, AlbumError> {
    let details = get_album(
        &context.pool,
        context.storage.as_ref(),
        &album_id,
        &user,
        context.settings.storage.download_url_ttl(),
    )
    .await?;
    Ok(Json(ApiResponse::ok(details)))
}

/// Update album title, description or cover photo. Owner only.
#[utoipa::path(
    patch,
    path = "/albums/{album_id}",
    tag = "Albums",
    params(("album_id" = String, Path, description = "The unique ID of the album.")),
    request_body = UpdateAlbumRequest,
    responses(
        (status = 200, description = "The updated album.", body = Album),
        (status = 400, description = "Invalid update."),
        (status = 404, description = "Album missing or caller is not the owner."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_album_handler(
    State(context): State<ApiContext>,
    Path(album_id): Path<String>,
    Extension(user): Extension<User>,
    Json(payload): Json<UpdateAlbumRequest>,
) -> Result<Json<ApiResponse<Album>>, AlbumError> {
    let album = update_album(&context.pool, &album_id, &user, payload).await?;
    Ok(Json(ApiResponse::ok(album)))
}

/// Delete an album. Member photos themselves are untouched.
#[utoipa::path(
    delete,
    path = "/albums/{album_id}",
    tag = "Albums",
    params(("album_id" = String, Path, description = "The unique ID of the album.")),
    responses(
        (status = 200, description = "Album deleted."),
        (status = 404, description = "Album missing or caller is not the owner."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_album_handler(
    State(context): State<ApiContext>,
    Path(album_id): Path<String>,
    Extension(user): Extension<User>,
) -> Result<Json<ApiResponse<()>>, AlbumError> {
    delete_album(&context.pool, &album_id, &user).await?;
    Ok(Json(ApiResponse::ok(())))
}

/// Add photos owned by the album owner; duplicates are skipped.
#[utoipa::path(
    post,
    path = "/albums/{album_id}/photos",
    tag = "Albums",
    params(("album_id" = String, Path, description = "The unique ID of the album.")),
    request_body = AddPhotosRequest,
    responses(
        (status = 200, description = "Membership change summary.", body = AddPhotosResponse),
        (status = 404, description = "Album or photos missing, or caller may not edit."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn add_photos_handler(
    State(context): State<ApiContext>,
    Path(album_id): Path<String>,
    Extension(user): Extension<User>,
    Json(payload): Json<AddPhotosRequest>,
) -> Result<Json<ApiResponse<AddPhotosResponse>>, AlbumError> {
    let outcome = add_photos_to_album(&context.pool, &album_id, &user, payload).await?;
    Ok(Json(ApiResponse::ok(outcome)))
}

/// Remove one photo from an album.
#[utoipa::path(
    delete,
    path = "/albums/{album_id}/photos/{photo_id}",
    tag = "Albums",
    params(
        ("album_id" = String, Path, description = "The unique ID of the album."),
        ("photo_id" = String, Path, description = "The unique ID of the photo."),
    ),
    responses(
        (status = 200, description = "Photo removed from the album."),
        (status = 404, description = "Not a member, or caller may not edit."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn remove_photo_handler(
    State(context): State<ApiContext>,
    Path((album_id, photo_id)): Path<(String, String)>,
    Extension(user): Extension<User>,
) -> Result<Json<ApiResponse<()>>, AlbumError> {
    remove_photo_from_album(&context.pool, &album_id, &photo_id, &user).await?;
    Ok(Json(ApiResponse::ok(())))
}

/// Grant or replace a share for one grantee. Owner only.
#[utoipa::path(
    post,
    path = "/albums/{album_id}/shares",
    tag = "Albums",
    params(("album_id" = String, Path, description = "The unique ID of the album.")),
    request_body = ShareAlbumRequest,
    responses(
        (status = 200, description = "The stored share.", body = AlbumShare),
        (status = 400, description = "Invalid grantee or expiry."),
        (status = 404, description = "Album missing or caller is not the owner."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn share_album_handler(
    State(context): State<ApiContext>,
    Path(album_id): Path<String>,
    Extension(user): Extension<User>,
    Json(payload): Json<ShareAlbumRequest>,
) -> Result<Json<ApiResponse<AlbumShare>>, AlbumError> {
    let share = share_album(&context.pool, &album_id, &user, payload).await?;
    Ok(Json(ApiResponse::ok(share)))
}

/// Issue a fresh public link, superseding any previous one. Owner only.
#[utoipa::path(
    post,
    path = "/albums/{album_id}/public-link",
    tag = "Albums",
    params(("album_id" = String, Path, description = "The unique ID of the album.")),
    request_body = PublicLinkRequest,
    responses(
        (status = 200, description = "The new public link.", body = PublicLinkResponse),
        (status = 404, description = "Album missing or caller is not the owner."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn generate_public_link_handler(
    State(context): State<ApiContext>,
    Path(album_id): Path<String>,
    Extension(user): Extension<User>,
    Json(payload): Json<PublicLinkRequest>,
) -> Result<Json<ApiResponse<PublicLinkResponse>>, AlbumError> {
    let link = generate_public_link(
        &context.pool,
        &album_id,
        &user,
        payload,
        &context.settings.api.public_url,
    )
    .await?;
    Ok(Json(ApiResponse::ok(link)))
}

/// Revoke the album's public link. Owner only; revoking twice is fine.
#[utoipa::path(
    delete,
    path = "/albums/{album_id}/public-link",
    tag = "Albums",
    params(("album_id" = String, Path, description = "The unique ID of the album.")),
    responses(
        (status = 200, description = "Public link revoked."),
        (status = 404, description = "Album missing or caller is not the owner."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn revoke_public_link_handler(
    State(context): State<ApiContext>,
    Path(album_id): Path<String>,
    Extension(user): Extension<User>,
) -> Result<Json<ApiResponse<()>>, AlbumError> {
    revoke_public_link(&context.pool, &album_id, &user).await?;
    Ok(Json(ApiResponse::ok(())))
}
