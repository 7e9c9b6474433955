use crate::api::envelope::error_body;
use crate::database::DbError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use color_eyre::eyre;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Missing bearer token")]
    MissingToken,

    #[error("Invalid bearer token")]
    InvalidToken,

    /// The credential verified, but lacks the claims needed to create a
    /// local user record (e.g. no email on first sight). Distinct from
    /// "not authenticated" so callers can tell the two apart.
    #[error("Identity is missing required claims")]
    IncompleteIdentity,

    #[error("Identity provider key set unavailable: {0}")]
    KeySetUnavailable(String),

    #[error("Database error")]
    Database(sqlx::Error),

    #[error("internal error")]
    Internal(#[from] eyre::Report),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            Self::MissingToken | Self::InvalidToken => {
                (StatusCode::UNAUTHORIZED, "Not authenticated.".to_string())
            }
            Self::IncompleteIdentity => (
                StatusCode::UNAUTHORIZED,
                "Authenticated identity has an incomplete profile.".to_string(),
            ),
            Self::KeySetUnavailable(detail) => {
                warn!("JWKS fetch failed: {detail}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Authentication is temporarily unavailable.".to_string(),
                )
            }
            Self::Database(e) => {
                warn!("Database query failed: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A database error occurred.".to_string(),
                )
            }
            Self::Internal(e) => {
                warn!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected internal error occurred.".to_string(),
                )
            }
        };

        (status, Json(error_body(&error_message))).into_response()
    }
}

impl From<sqlx::Error> for AuthError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err)
    }
}

impl From<DbError> for AuthError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Sqlx(sql_err) => Self::Database(sql_err),
            DbError::SerdeJson(err) => Self::Internal(eyre::Report::new(err)),
        }
    }
}
