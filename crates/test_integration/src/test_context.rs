use crate::utils::{base_url, create_test_database, create_test_settings, mint_token};
use app_state::AppSettings;
use color_eyre::Result;
use common_services::utils::nice_id;
use sqlx::PgPool;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// The main context for the integration tests: a throwaway database and
/// an API server running as a background task.
pub struct TestContext {
    pub pool: PgPool,
    pub settings: AppSettings,
    pub http_client: reqwest::Client,
    pub base_url: String,
    _db_name: String,
    _management_pool: PgPool,
    _api_handle: JoinHandle<()>,
}

impl TestContext {
    pub async fn new() -> Result<Self> {
        info!("Setting up test environment...");

        let database_name = format!("test_{}", nice_id(8));
        let (pool, management_pool) = create_test_database(&database_name).await?;
        let settings = create_test_settings(&database_name);

        let api_pool = pool.clone();
        let api_settings = settings.clone();
        let api_handle = tokio::spawn(async move {
            if let Err(e) = api::serve(api_pool, api_settings).await {
                error!("API server failed: {}", e);
            }
        });

        info!("Waiting for the API to start...");
        tokio::time::sleep(Duration::from_secs(2)).await;
        info!("Test environment is ready.");

        Ok(Self {
            pool,
            settings,
            http_client: reqwest::Client::new(),
            base_url: base_url(),
            _db_name: database_name,
            _management_pool: management_pool,
            _api_handle: api_handle,
        })
    }

    /// A fresh bearer token for a distinct user. The API creates the
    /// user record on the token's first use.
    pub fn token_for(&self, username: &str) -> Result<String> {
        mint_token(
            &format!("test|{username}"),
            &format!("{username}@test.local"),
            username,
        )
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        info!("Tearing down test environment...");
        self._api_handle.abort();
    }
}
