use crate::api_state::ApiContext;
use axum::extract::State;
use axum::{Extension, Json};
use common_services::api::envelope::ApiResponse;
use common_services::api::photos::error::PhotosError;
use common_services::api::photos::service::user_stats;
use common_services::api::users::error::UserError;
use common_services::api::users::interfaces::UpdateProfileRequest;
use common_services::api::users::service::update_profile;
use common_services::database::app_user::User;
use common_services::database::photo::PhotoStats;

/// The caller's own profile.
#[utoipa::path(
    get,
    path = "/users/me",
    tag = "Users",
    responses(
        (status = 200, description = "The authenticated user.", body = User),
        (status = 401, description = "Missing or invalid credential."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_me_handler(
    Extension(user): Extension<User>,
) -> Json<ApiResponse<User>> {
    Json(ApiResponse::ok(user))
}

/// Update the caller's display name, avatar or preferences blob.
#[utoipa::path(
    patch,
    path = "/users/me",
    tag = "Users",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "The updated user.", body = User),
        (status = 400, description = "Invalid profile update."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_profile_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<ApiResponse<User>>, UserError> {
    let updated = update_profile(&context.pool, &user, payload).await?;
    Ok(Json(ApiResponse::ok(updated)))
}

/// Photo count, total bytes and upload-time bounds for the caller.
#[utoipa::path(
    get,
    path = "/users/me/stats",
    tag = "Users",
    responses(
        (status = 200, description = "Aggregate library statistics.", body = PhotoStats),
    ),
    security(("bearer_auth" = []))
)]
pub async fn user_stats_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
) -> Result<Json<ApiResponse<PhotoStats>>, PhotosError> {
    let stats = user_stats(&context.pool, &user).await?;
    Ok(Json(ApiResponse::ok(stats)))
}
