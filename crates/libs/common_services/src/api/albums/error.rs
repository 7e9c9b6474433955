use crate::api::envelope::error_body;
use crate::database::DbError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use color_eyre::eyre;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum AlbumError {
    #[error("Database error")]
    Database(#[from] sqlx::Error),

    #[error("internal error")]
    Internal(#[from] eyre::Report),

    /// Merged not-found / forbidden: unauthorized callers must not be
    /// able to tell whether the album exists.
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    Validation(String),
}

fn log_error(error: &AlbumError) {
    match error {
        AlbumError::Database(e) => warn!("Database query failed: {e}"),
        AlbumError::Internal(e) => warn!("Internal error: {e:?}"),
        AlbumError::NotFound(detail) => warn!("Album -> Not found: {detail}"),
        AlbumError::Validation(message) => warn!("Album -> Bad request: {message}"),
    }
}

impl IntoResponse for AlbumError {
    fn into_response(self) -> Response {
        log_error(&self);

        let (status, error_message) = match self {
            Self::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "A database error occurred.".to_string(),
            ),
            Self::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An unexpected internal error occurred.".to_string(),
            ),
            // The detail stays in the log; the body never distinguishes
            // missing from forbidden.
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "Album not found.".to_string()),
            Self::Validation(message) => (StatusCode::BAD_REQUEST, message),
        };

        (status, Json(error_body(&error_message))).into_response()
    }
}

impl From<DbError> for AlbumError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Sqlx(sql_err) => {
                if matches!(sql_err, sqlx::Error::RowNotFound) {
                    Self::NotFound("row not found".into())
                } else {
                    Self::Database(sql_err)
                }
            }
            DbError::SerdeJson(err) => Self::Internal(eyre::Report::new(err)),
        }
    }
}
