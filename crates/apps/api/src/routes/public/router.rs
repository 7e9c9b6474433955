use crate::api_state::ApiContext;
use crate::routes::public::handlers::get_public_album_handler;
use axum::{Router, routing::get};

/// Anonymous routes gated by a public token instead of a credential.
pub fn public_router() -> Router<ApiContext> {
    Router::new().route("/public/albums/{token}", get(get_public_album_handler))
}
