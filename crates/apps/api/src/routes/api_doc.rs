use crate::routes::{albums, photos, public, root, users};
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    paths(
        root::handlers::root,
        root::handlers::health_check,
        // Album handlers
        albums::handlers::create_album_handler,
        albums::handlers::list_albums_handler,
        albums::handlers::get_album_handler,
        albums::handlers::update_album_handler,
        albums::handlers::delete_album_handler,
        albums::handlers::add_photos_handler,
        albums::handlers::remove_photo_handler,
        albums::handlers::share_album_handler,
        albums::handlers::generate_public_link_handler,
        albums::handlers::revoke_public_link_handler,
        // Photos handlers
        photos::handlers::request_upload_handler,
        photos::handlers::list_photos_handler,
        photos::handlers::get_photo_handler,
        photos::handlers::delete_photo_handler,
        // Users handlers
        users::handlers::get_me_handler,
        users::handlers::update_profile_handler,
        users::handlers::user_stats_handler,
        // Public handlers
        public::handlers::get_public_album_handler,
    ),
    components(
        schemas(
        ),
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "PhotoVault", description = "PhotoVault's API"),
        (name = "Photos", description = "Endpoints for uploading and managing photos"),
        (name = "Albums", description = "Endpoints for managing albums and sharing"),
        (name = "Users", description = "Profile endpoints"),
        (name = "Public", description = "Token-gated anonymous access"),
        (name = "System", description = "Health check"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
