mod handlers;

use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub use handlers::{art, method_not_allowed, not_found, stream_definition};

/// Build the two-endpoint router.
///
/// Both routes are POST-only; other verbs on a known path get a 405 with the
/// usual error envelope, unknown paths get a 404.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/art", post(art).fallback(method_not_allowed))
        .route(
            "/api/stream",
            post(stream_definition).fallback(method_not_allowed),
        )
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
