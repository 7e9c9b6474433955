use crate::api_state::ApiContext;
use crate::routes::albums::handlers::{
    add_photos_handler, create_album_handler, delete_album_handler, generate_public_link_handler,
    get_album_handler, list_albums_handler, remove_photo_handler, revoke_public_link_handler,
    share_album_handler, update_album_handler,
};
use axum::{
    Router,
    routing::{delete, get, post},
};

pub fn albums_protected_router() -> Router<ApiContext> {
    Router::new()
        .route(
            "/albums",
            post(create_album_handler).get(list_albums_handler),
        )
        .route(
            "/albums/{album_id}",
            get(get_album_handler)
                .patch(update_album_handler)
                .delete(delete_album_handler),
        )
        .route("/albums/{album_id}/photos", post(add_photos_handler))
        .route(
            "/albums/{album_id}/photos/{photo_id}",
            delete(remove_photo_handler),
        )
        .route("/albums/{album_id}/shares", post(share_album_handler))
        .route(
            "/albums/{album_id}/public-link",
            post(generate_public_link_handler).delete(revoke_public_link_handler),
        )
}
