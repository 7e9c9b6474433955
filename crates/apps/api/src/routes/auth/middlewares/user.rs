use crate::api_state::ApiContext;
use crate::auth::middlewares::common::{extract_context, extract_token};
use axum::{
    extract::{FromRequestParts, State},
    http::request::Parts,
};
use common_services::api::auth::error::AuthError;
use common_services::api::auth::service::authenticate;
use common_services::database::app_user::User;

/// The authenticated caller, resolved (and created on first sight) from
/// the bearer token the identity provider issued.
#[derive(Clone, Debug)]
pub struct ApiUser(pub User);

impl<S> FromRequestParts<S> for ApiUser
where
    S: Send + Sync,
    State<ApiContext>: FromRequestParts<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = extract_token(parts)?;
        let context = extract_context(parts, state).await?;
        let user = authenticate(&context.pool, &context.verifier, &token).await?;
        parts.extensions.insert(user.clone());
        Ok(Self(user))
    }
}
