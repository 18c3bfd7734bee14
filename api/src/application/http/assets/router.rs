use super::handlers::{serve_index, serve_manifest, serve_service_worker};
use crate::application::http::server::app_state::AppState;
use axum::{Router, routing::get};
use tower_http::services::ServeDir;

/// Static PWA routes. Explicit files first, everything else under `/static`.
pub fn asset_routes(state: AppState) -> Router<AppState> {
    let static_dir = state.args.storage.static_dir.clone();

    Router::new()
        .route("/", get(serve_index))
        .route("/manifest.json", get(serve_manifest))
        .route("/sw.js", get(serve_service_worker))
        .nest_service("/static", ServeDir::new(static_dir))
}
