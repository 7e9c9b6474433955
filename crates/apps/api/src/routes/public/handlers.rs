use crate::api_state::ApiContext;
use axum::Json;
use axum::extract::{Path, State};
use common_services::api::albums::error::AlbumError;
use common_services::api::albums::interfaces::PublicAlbumResponse;
use common_services::api::albums::service::get_album_by_token;
use common_services::api::envelope::ApiResponse;

/// Read a shared album through its public token. No authentication.
///
/// Tokens with the wrong shape answer 400; unknown, revoked and expired
/// tokens all answer 404.
#[utoipa::path(
    get,
    path = "/public/albums/{token}",
    tag = "Public",
    params(("token" = String, Path, description = "64-character public album token.")),
    responses(
        (status = 200, description = "The public view of the album.", body = PublicAlbumResponse),
        (status = 400, description = "Token is not 64 hex characters."),
        (status = 404, description = "Token does not grant access."),
    )
)]
pub async fn get_public_album_handler(
    State(context): State<ApiContext>,
    Path(token): Path<String>,
) -> Result<Json<ApiResponse<PublicAlbumResponse>>, AlbumError> {
    let album = get_album_by_token(
        &context.pool,
        context.storage.as_ref(),
        &token,
        context.settings.storage.download_url_ttl(),
    )
    .await?;
    Ok(Json(ApiResponse::ok(album)))
}
