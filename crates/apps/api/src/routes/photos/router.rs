use crate::api_state::ApiContext;
use crate::routes::photos::handlers::{
    delete_photo_handler, get_photo_handler, list_photos_handler, request_upload_handler,
};
use axum::{
    Router,
    routing::{get, post},
};

pub fn photos_protected_router() -> Router<ApiContext> {
    Router::new()
        .route("/photos", get(list_photos_handler))
        .route("/photos/uploads", post(request_upload_handler))
        .route(
            "/photos/{photo_id}",
            get(get_photo_handler).delete(delete_photo_handler),
        )
}
