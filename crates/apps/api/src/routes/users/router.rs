use crate::api_state::ApiContext;
use crate::routes::users::handlers::{get_me_handler, update_profile_handler, user_stats_handler};
use axum::{Router, routing::get};

pub fn users_protected_router() -> Router<ApiContext> {
    Router::new()
        .route("/users/me", get(get_me_handler).patch(update_profile_handler))
        .route("/users/me/stats", get(user_stats_handler))
}
