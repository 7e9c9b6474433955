use crate::api_state::ApiContext;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use common_services::api::envelope::ApiResponse;
use common_services::api::photos::error::PhotosError;
use common_services::api::photos::interfaces::{
    PhotoListQuery, PhotoResponse, RequestUploadRequest, RequestUploadResponse,
};
use common_services::api::photos::service::{
    delete_photo, get_photo, list_photos, request_upload,
};
use common_services::database::app_user::User;

/// Declare an upload-intent and receive a presigned PUT URL.
///
/// The client uploads the bytes itself; the metadata row already exists
/// when this returns.
#[utoipa::path(
    post,
    path = "/photos/uploads",
    tag = "Photos",
    request_body = RequestUploadRequest,
    responses(
        (status = 201, description = "Upload intent registered.", body = RequestUploadResponse),
        (status = 400, description = "Invalid file name or size."),
        (status = 502, description = "Storage backend unavailable."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn request_upload_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Json(payload): Json<RequestUploadRequest>,
) -> Result<(StatusCode, Json<ApiResponse<RequestUploadResponse>>), PhotosError> {
    let response = request_upload(
        &context.pool,
        context.storage.as_ref(),
        &user,
        payload,
        context.settings.storage.upload_url_ttl(),
    )
    .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(response))))
}

/// List the caller's photos, newest first.
#[utoipa::path(
    get,
    path = "/photos",
    tag = "Photos",
    params(PhotoListQuery),
    responses(
        (status = 200, description = "The caller's photos with download URLs.", body = Vec<PhotoResponse>),
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_photos_handler(
    State(context): State<ApiContext>,
    Query(query): Query<PhotoListQuery>,
    Extension(user): Extension<User>,
) -> Result<Json<ApiResponse<Vec<PhotoResponse>>>, PhotosError> {
    let photos = list_photos(
        &context.pool,
        context.storage.as_ref(),
        &user,
        query,
        context.settings.storage.download_url_ttl(),
    )
    .await?;
    Ok(Json(ApiResponse::ok(photos)))
}

/// A single photo with a fresh download URL.
#[utoipa::path(
    get,
    path = "/photos/{photo_id}",
    tag = "Photos",
    params(("photo_id" = String, Path, description = "The unique ID of the photo.")),
    responses(
        (status = 200, description = "The photo.", body = PhotoResponse),
        (status = 404, description = "Photo missing or not owned by the caller."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_photo_handler(
    State(context): State<ApiContext>,
    Path(photo_id): Path<String>,
    Extension(user): Extension<User>,
) -> Result<Json<ApiResponse<PhotoResponse>>, PhotosError> {
    let photo = get_photo(
        &context.pool,
        context.storage.as_ref(),
        &photo_id,
        &user,
        context.settings.storage.download_url_ttl(),
    )
    .await?;
    Ok(Json(ApiResponse::ok(photo)))
}

/// Delete a photo and (best-effort) its stored object.
#[utoipa::path(
    delete,
    path = "/photos/{photo_id}",
    tag = "Photos",
    params(("photo_id" = String, Path, description = "The unique ID of the photo.")),
    responses(
        (status = 200, description = "Photo deleted."),
        (status = 404, description = "Photo missing or not owned by the caller."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_photo_handler(
    State(context): State<ApiContext>,
    Path(photo_id): Path<String>,
    Extension(user): Extension<User>,
) -> Result<Json<ApiResponse<()>>, PhotosError> {
    delete_photo(&context.pool, context.storage.as_ref(), &photo_id, &user).await?;
    Ok(Json(ApiResponse::ok(())))
}
