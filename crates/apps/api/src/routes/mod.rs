pub mod albums;
mod api_doc;
pub mod auth;
pub mod photos;
pub mod public;
pub mod root;
pub mod users;

use crate::albums::router::albums_protected_router;
use crate::api_state::ApiContext;
use crate::auth::middlewares::user::ApiUser;
use crate::photos::router::photos_protected_router;
use crate::public::router::public_router;
use crate::root::router::root_public_router;
use crate::routes::api_doc::ApiDoc;
use crate::users::router::users_protected_router;
use axum::Router;
use axum::middleware::from_extractor_with_state;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

// --- Router Construction ---
pub fn create_router(api_state: ApiContext) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
        .merge(public_routes())
        .merge(protected_routes(api_state.clone()))
        .with_state(api_state)
}

fn public_routes() -> Router<ApiContext> {
    Router::new()
        .merge(root_public_router())
        .merge(public_router())
}

fn protected_routes(api_state: ApiContext) -> Router<ApiContext> {
    Router::new()
        .merge(albums_protected_router())
        .merge(photos_protected_router())
        .merge(users_protected_router())
        .route_layer(from_extractor_with_state::<ApiUser, ApiContext>(api_state))
}
