use crate::api::envelope::error_body;
use crate::database::DbError;
use crate::storage::StorageError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use color_eyre::eyre;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum PhotosError {
    #[error("Database error")]
    Database(#[from] sqlx::Error),

    #[error("storage gateway error")]
    Storage(#[from] StorageError),

    #[error("internal error")]
    Internal(#[from] eyre::Report),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    Validation(String),
}

fn log_error(error: &PhotosError) {
    match error {
        PhotosError::Database(e) => warn!("Database query failed: {e}"),
        PhotosError::Storage(e) => warn!("Storage gateway failed: {e}"),
        PhotosError::Internal(e) => warn!("Internal error: {e:?}"),
        PhotosError::NotFound(detail) => warn!("Photo -> Not found: {detail}"),
        PhotosError::Validation(message) => warn!("Photo -> Bad request: {message}"),
    }
}

impl IntoResponse for PhotosError {
    fn into_response(self) -> Response {
        log_error(&self);

        let (status, error_message) = match self {
            Self::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "A database error occurred.".to_string(),
            ),
            Self::Storage(_) => (
                StatusCode::BAD_GATEWAY,
                "The storage backend is unavailable.".to_string(),
            ),
            Self::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An unexpected internal error occurred.".to_string(),
            ),
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "Photo not found.".to_string()),
            Self::Validation(message) => (StatusCode::BAD_REQUEST, message),
        };

        (status, Json(error_body(&error_message))).into_response()
    }
}

impl From<DbError> for PhotosError {
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
