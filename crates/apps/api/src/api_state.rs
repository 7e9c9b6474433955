use app_state::AppSettings;
use axum::extract::FromRef;
use common_services::api::auth::jwks::TokenVerifier;
use common_services::storage::ObjectStorage;
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct ApiContext {
    pub pool: PgPool,
    pub settings: AppSettings,
    pub storage: Arc<dyn ObjectStorage>,
    pub verifier: TokenVerifier,
}

// These impls allow Axum to extract parts of the state directly, which is
// useful for middleware and extractors that only need one piece.
impl FromRef<ApiContext> for PgPool {
    fn from_ref(state: &ApiContext) -> Self {
        state.pool.clone()
    }
}

impl FromRef<ApiContext> for AppSettings {
    fn from_ref(state: &ApiContext) -> Self {
        state.settings.clone()
    }
}

impl FromRef<ApiContext> for TokenVerifier {
    fn from_ref(state: &ApiContext) -> Self {
        state.verifier.clone()
    }
}
