use crate::api::users::error::UserError;
use crate::api::users::interfaces::UpdateProfileRequest;
use crate::database::app_user::User;
use crate::database::user_store::UserStore;
use sqlx::PgPool;
use tracing::instrument;

#[instrument(skip(pool, request))]
pub async fn update_profile(
    pool: &PgPool,
    user: &User,
    request: UpdateProfileRequest,
) -> Result<User, UserError> {
    if let Some(display_name) = &request.display_name
        && display_name.trim().is_empty()
    {
        return Err(UserError::Validation(
            "Display name cannot be empty.".into(),
        ));
    }

    Ok(UserStore::update_profile(
        pool,
        user.id,
        request.display_name.map(|n| n.trim().to_owned()),
        request.avatar_url,
        request.profile,
    )
    .await?)
}
