use crate::api_state::ApiContext;
use crate::create_router;
use app_state::AppSettings;
use color_eyre::Result;
use color_eyre::eyre::eyre;
use common_services::api::auth::jwks::TokenVerifier;
use common_services::database::MIGRATOR;
use common_services::storage::S3Storage;
use http::header;
use sqlx::PgPool;
use std::iter::once;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::cors;
use tower_http::cors::CorsLayer;
use tower_http::sensitive_headers::SetSensitiveRequestHeadersLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

pub async fn serve(pool: PgPool, settings: AppSettings) -> Result<()> {
    info!("🚀 Initializing server...");

    MIGRATOR.run(&pool).await?;

    let api_state = ApiContext {
        pool: pool.clone(),
        storage: Arc::new(S3Storage::from_settings(&settings.storage).await),
        verifier: TokenVerifier::from_settings(&settings.identity)
            .map_err(|e| eyre!("Failed to configure token verification: {e}"))?,
        settings: settings.clone(),
    };

    // --- CORS Configuration ---
    let allowed_origins: Vec<http::HeaderValue> = settings
        .api
        .allowed_origins
        .iter()
        .filter_map(|s| match s.parse() {
            Ok(hv) => Some(hv),
            Err(e) => {
                error!("Invalid CORS origin configured: {} - Error: {}", s, e);
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_methods(cors::Any)
        .allow_origin(allowed_origins)
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::ORIGIN,
            header::USER_AGENT,
            header::CACHE_CONTROL,
            header::PRAGMA,
        ]);

    let app = create_router(api_state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(SetSensitiveRequestHeadersLayer::new(once(
            header::AUTHORIZATION,
        )));

    let addr: SocketAddr = format!("{}:{}", settings.api.host, settings.api.port)
        .parse()
        .map_err(|e| eyre!("Invalid address: {}", e))?;

    info!("🐸 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
