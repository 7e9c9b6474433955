use serde::Deserialize;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;
use url::Url;

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub api: ApiSettings,
    pub database: DatabaseSettings,
    pub storage: StorageSettings,
    pub identity: IdentitySettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    pub host: String,
    pub port: u16,
    /// Externally reachable base URL, used to build public share links.
    pub public_url: Url,
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl DatabaseSettings {
    pub async fn connect(&self) -> Result<PgPool, sqlx::Error> {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .acquire_timeout(Duration::from_secs(5))
            .connect(&self.url)
            .await
    }
}

/// S3-compatible object storage settings (AWS S3, Minio, Backblaze, etc.).
#[derive(Debug, Deserialize, Clone)]
pub struct StorageSettings {
    pub bucket: String,
    #[serde(default = "default_region")]
    pub region: String,
    /// Custom endpoint for S3-compatible stores; `None` means AWS proper.
    pub endpoint: Option<String>,
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    /// Required for Minio-style path addressing.
    #[serde(default)]
    pub force_path_style: bool,
    #[serde(default = "default_download_ttl")]
    pub download_url_ttl_seconds: u64,
    #[serde(default = "default_upload_ttl")]
    pub upload_url_ttl_seconds: u64,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl StorageSettings {
    #[must_use]
    pub fn download_url_ttl(&self) -> Duration {
        Duration::from_secs(self.download_url_ttl_seconds)
    }

    #[must_use]
    pub fn upload_url_ttl(&self) -> Duration {
        Duration::from_secs(self.upload_url_ttl_seconds)
    }
}

/// External identity provider settings.
#[derive(Debug, Deserialize, Clone)]
pub struct IdentitySettings {
    /// Token issuer, e.g. `https://photovault.eu.auth0.com/`.
    pub issuer: Url,
    pub audience: String,
    /// Overrides the conventional `{issuer}/.well-known/jwks.json`.
    pub jwks_url: Option<Url>,
    #[serde(default = "default_jwks_cache_ttl")]
    pub jwks_cache_ttl_seconds: u64,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
    /// When set, bearer tokens are verified as HS256 with this secret
    /// instead of the issuer's JWKS. Local development and integration
    /// tests only.
    pub shared_secret: Option<String>,
}

impl IdentitySettings {
    /// Errors when no override is configured and the issuer URL cannot
    /// carry the well-known path (e.g. a cannot-be-a-base URL).
    pub fn jwks_url(&self) -> Result<Url, url::ParseError> {
        match &self.jwks_url {
            Some(url) => Ok(url.clone()),
            None => self.issuer.join(".well-known/jwks.json"),
        }
    }
}

const fn default_max_connections() -> u32 {
    10
}

fn default_region() -> String {
    "us-east-1".to_owned()
}

const fn default_download_ttl() -> u64 {
    900
}

const fn default_upload_ttl() -> u64 {
    600
}

const fn default_request_timeout() -> u64 {
    10
}

const fn default_jwks_cache_ttl() -> u64 {
    3600
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jwks_url_defaults_to_well_known_path() {
        let settings = IdentitySettings {
            issuer: "https://id.example.com/".parse().unwrap(),
            audience: "photovault-api".to_owned(),
            jwks_url: None,
            jwks_cache_ttl_seconds: 3600,
            request_timeout_seconds: 10,
            shared_secret: None,
        };
        assert_eq!(
            settings.jwks_url().unwrap().as_str(),
            "https://id.example.com/.well-known/jwks.json"
        );
    }

    #[test]
    fn jwks_url_prefers_the_configured_override() {
        let settings = IdentitySettings {
            issuer: "https://id.example.com/".parse().unwrap(),
            audience: "photovault-api".to_owned(),
            jwks_url: Some("https://keys.example.com/jwks".parse().unwrap()),
            jwks_cache_ttl_seconds: 3600,
            request_timeout_seconds: 10,
            shared_secret: None,
        };
        assert_eq!(
            settings.jwks_url().unwrap().as_str(),
            "https://keys.example.com/jwks"
        );
    }

    #[test]
    fn jwks_url_rejects_an_issuer_that_cannot_take_a_path() {
        let settings = IdentitySettings {
            issuer: "data:text/plain,nope".parse().unwrap(),
            audience: "photovault-api".to_owned(),
            jwks_url: None,
            jwks_cache_ttl_seconds: 3600,
            request_timeout_seconds: 10,
            shared_secret: None,
        };
        assert!(settings.jwks_url().is_err());
    }
}
