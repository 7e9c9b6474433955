//! Bearer token verification against the identity provider's key set.
//!
//! Keys rotate rarely, so fetched JWKS entries are cached by key ID with
//! a TTL. A shared-secret HS256 mode exists for local development and
//! integration tests, where no real identity provider is available.

use crate::api::auth::error::AuthError;
use crate::api::auth::interfaces::IdentityClaims;
use app_state::IdentitySettings;
use color_eyre::eyre::eyre;
use jsonwebtoken::jwk::{Jwk, JwkSet};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, decode_header};
use moka::future::Cache;
use std::time::Duration;
use tracing::debug;
use url::Url;

#[derive(Clone)]
pub struct TokenVerifier {
    audience: String,
    issuer: Url,
    mode: VerifierMode,
}

#[derive(Clone)]
enum VerifierMode {
    Jwks {
        http: reqwest::Client,
        jwks_url: Url,
        keys: Cache<String, Jwk>,
    },
    SharedSecret(String),
}

impl TokenVerifier {
    pub fn from_settings(settings: &IdentitySettings) -> Result<Self, AuthError> {
        let mode = if let Some(secret) = &settings.shared_secret {
            VerifierMode::SharedSecret(secret.clone())
        } else {
            let http = reqwest::Client::builder()
                .timeout(Duration::from_secs(settings.request_timeout_seconds))
                .build()
                .map_err(|e| AuthError::Internal(eyre!("Failed to build HTTP client: {e}")))?;
            let jwks_url = settings
                .jwks_url()
                .map_err(|e| AuthError::Internal(eyre!("Identity issuer yields no JWKS URL: {e}")))?;
            VerifierMode::Jwks {
                http,
                jwks_url,
                keys: Cache::builder()
                    .time_to_live(Duration::from_secs(settings.jwks_cache_ttl_seconds))
                    .build(),
            }
        };

        Ok(Self {
            audience: settings.audience.clone(),
            issuer: settings.issuer.clone(),
            mode,
        })
    }

    /// Verifies signature, audience, issuer and expiry, returning the
    /// token's claims.
    pub async fn verify(&self, token: &str) -> Result<IdentityClaims, AuthError> {
        match &self.mode {
            VerifierMode::SharedSecret(secret) => {
                let key = DecodingKey::from_secret(secret.as_bytes());
                let validation = self.validation(Algorithm::HS256);
                decode::<IdentityClaims>(token, &key, &validation)
                    .map(|data| data.claims)
                    .map_err(|_| AuthError::InvalidToken)
            }
            VerifierMode::Jwks { .. } => {
                let header = decode_header(token).map_err(|_| AuthError::InvalidToken)?;
                let kid = header.kid.ok_or(AuthError::InvalidToken)?;
                let jwk = self.key_for(&kid).await?;
                let key = DecodingKey::from_jwk(&jwk).map_err(|_| AuthError::InvalidToken)?;
                let validation = self.validation(Algorithm::RS256);
                decode::<IdentityClaims>(token, &key, &validation)
                    .map(|data| data.claims)
                    .map_err(|_| AuthError::InvalidToken)
            }
        }
    }

    fn validation(&self, algorithm: Algorithm) -> Validation {
        let mut validation = Validation::new(algorithm);
        validation.set_audience(&[&self.audience]);
        // Issuers are inconsistent about the trailing slash.
        validation.set_issuer(&[
            self.issuer.as_str(),
            self.issuer.as_str().trim_end_matches('/'),
        ]);
        validation
    }

    async fn key_for(&self, kid: &str) -> Result<Jwk, AuthError> {
        let VerifierMode::Jwks {
            http,
            jwks_url,
            keys,
        } = &self.mode
        else {
            return Err(AuthError::Internal(eyre!("key_for called without JWKS mode")));
        };

        if let Some(jwk) = keys.get(kid).await {
            return Ok(jwk);
        }

        debug!("Fetching JWKS from {jwks_url}");
        let jwk_set: JwkSet = http
            .get(jwks_url.clone())
            .send()
            .await
            .map_err(|e| AuthError::KeySetUnavailable(e.to_string()))?
            .error_for_status()
            .map_err(|e| AuthError::KeySetUnavailable(e.to_string()))?
            .json()
            .await
            .map_err(|e| AuthError::KeySetUnavailable(e.to_string()))?;

        for jwk in &jwk_set.keys {
            if let Some(key_id) = &jwk.common.key_id {
                keys.insert(key_id.clone(), jwk.clone()).await;
            }
        }

        // An unknown kid is an invalid credential, not a provider outage.
        jwk_set.find(kid).cloned().ok_or(AuthError::InvalidToken)
    }
}
