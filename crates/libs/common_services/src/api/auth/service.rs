use crate::api::auth::error::AuthError;
use crate::api::auth::interfaces::IdentityClaims;
use crate::api::auth::jwks::TokenVerifier;
use crate::database::app_user::User;
use crate::database::user_store::UserStore;
use crate::utils::nice_id;
use sqlx::PgPool;
use tracing::{info, instrument};

/// Verifies a bearer token and resolves the local user it belongs to,
/// creating the user record on first sight.
#[instrument(skip_all)]
pub async fn authenticate(
    pool: &PgPool,
    verifier: &TokenVerifier,
    token: &str,
) -> Result<User, AuthError> {
    let claims = verifier.verify(token).await?;
    resolve_user(pool, &claims).await
}

/// Resolve-or-create keyed by the credential's subject claim.
///
/// A valid credential without an email cannot create a local record and
/// fails with `IncompleteIdentity` rather than creating a broken user.
#[instrument(skip(pool))]
pub async fn resolve_user(pool: &PgPool, claims: &IdentityClaims) -> Result<User, AuthError> {
    if let Some(user) = UserStore::find_by_provider_id(pool, &claims.sub).await? {
        return Ok(user);
    }

    let email = claims.email.as_deref().ok_or(AuthError::IncompleteIdentity)?;
    let mut username = claims
        .username_hint()
        .ok_or(AuthError::IncompleteIdentity)?;
    if UserStore::username_taken(pool, &username).await? {
        username = format!("{username}_{}", nice_id(4));
    }
    let display_name = claims.name.clone().unwrap_or_else(|| username.clone());

    info!("Creating user for subject {}, username {username}", claims.sub);
    let created = UserStore::create(
        pool,
        &claims.sub,
        &username,
        email,
        &display_name,
        claims.picture.clone(),
    )
    .await;

    match created {
        Ok(user) => Ok(user),
        // Two first-sight requests can race; the loser re-reads.
        Err(err) => match UserStore::find_by_provider_id(pool, &claims.sub).await? {
            Some(user) => Ok(user),
            None => Err(err.into()),
        },
    }
}
