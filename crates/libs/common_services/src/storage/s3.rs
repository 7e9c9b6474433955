//! S3-compatible presigning client (AWS S3, Minio, Backblaze, etc.).

use crate::storage::{ObjectStorage, StorageError, StorageResult};
use app_state::StorageSettings;
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::timeout::TimeoutConfig;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::presigning::PresigningConfig;
use std::time::Duration;

pub struct S3Storage {
    client: Client,
    bucket: String,
}

impl S3Storage {
    /// Builds a client from settings. Credentials fall back to the
    /// standard AWS provider chain when not configured explicitly;
    /// `endpoint` + `force_path_style` cover Minio-style deployments.
    pub async fn from_settings(settings: &StorageSettings) -> Self {
        let base = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(settings.region.clone()))
            .load()
            .await;

        let timeouts = TimeoutConfig::builder()
            .operation_timeout(Duration::from_secs(settings.request_timeout_seconds))
            .build();

        let mut builder = aws_sdk_s3::config::Builder::from(&base)
            .force_path_style(settings.force_path_style)
            .timeout_config(timeouts);

        if let Some(endpoint) = &settings.endpoint {
            builder = builder.endpoint_url(endpoint);
        }
        if let (Some(access_key), Some(secret_key)) = (&settings.access_key, &settings.secret_key)
        {
            builder = builder.credentials_provider(Credentials::new(
                access_key,
                secret_key,
                None,
                None,
                "photovault-settings",
            ));
        }

        Self {
            client: Client::from_conf(builder.build()),
            bucket: settings.bucket.clone(),
        }
    }

    fn presigning_config(ttl: Duration) -> StorageResult<PresigningConfig> {
        PresigningConfig::expires_in(ttl).map_err(|e| StorageError::Presign(e.to_string()))
    }
}

#[async_trait]
impl ObjectStorage for S3Storage {
    async fn issue_download_url(&self, key: &str, ttl: Duration) -> StorageResult<String> {
        let request = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(Self::presigning_config(ttl)?)
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        Ok(request.uri().to_string())
    }

    async fn issue_upload_url(
        &self,
        key: &str,
        content_type: &str,
        ttl: Duration,
    ) -> StorageResult<String> {
        let request = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .presigned(Self::presigning_config(ttl)?)
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        Ok(request.uri().to_string())
    }

    async fn delete_object(&self, key: &str) -> StorageResult<()> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        Ok(())
    }
}
