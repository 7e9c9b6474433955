use thiserror::Error;

pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Invalid presigning configuration: {0}")]
    Presign(String),

    #[error("Storage backend error: {0}")]
    Backend(String),
}
