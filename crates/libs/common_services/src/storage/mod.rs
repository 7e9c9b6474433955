//! Object Storage Gateway.
//!
//! The backend never moves photo bytes itself; it hands out short-lived
//! presigned URLs and lets clients talk to the object store directly.

mod error;
mod s3;

pub use error::*;
pub use s3::*;

use async_trait::async_trait;
use futures_util::future::join_all;
use std::time::Duration;
use tracing::warn;

/// Issues time-bounded capability URLs for an S3-compatible object store.
///
/// Possession of a URL is sufficient to perform the operation until it
/// expires; authorization is never re-checked after issuance.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    async fn issue_download_url(&self, key: &str, ttl: Duration) -> StorageResult<String>;

    async fn issue_upload_url(
        &self,
        key: &str,
        content_type: &str,
        ttl: Duration,
    ) -> StorageResult<String>;

    /// Best-effort object deletion.
    async fn delete_object(&self, key: &str) -> StorageResult<()>;

    /// Issues download URLs for many keys with unordered concurrent
    /// fan-out. A failed key yields `None` for that key only; the rest of
    /// the batch proceeds.
    async fn issue_batch_download_urls(
        &self,
        keys: &[String],
        ttl: Duration,
    ) -> Vec<(String, Option<String>)> {
        let futures = keys.iter().map(|key| async move {
            match self.issue_download_url(key, ttl).await {
                Ok(url) => (key.clone(), Some(url)),
                Err(err) => {
                    warn!("Failed to issue download URL for {key}: {err}");
                    (key.clone(), None)
                }
            }
        });
        join_all(futures).await
    }
}
