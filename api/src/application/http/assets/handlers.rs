use std::io::ErrorKind;

use axum::{
    extract::State,
    http::{HeaderName, header::CONTENT_TYPE},
    response::IntoResponse,
};

use crate::application::http::server::{api_entities::api_error::ApiError, app_state::AppState};

const SERVICE_WORKER_ALLOWED: HeaderName = HeaderName::from_static("service-worker-allowed");

async fn read_asset(state: &AppState, name: &str) -> Result<Vec<u8>, ApiError> {
    let path = state.args.storage.static_dir.join(name);

    tokio::fs::read(&path).await.map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            ApiError::NotFound(format!("{} not found", name))
        } else {
            tracing::error!(path = %path.display(), "Failed to read static asset: {}", e);
            ApiError::InternalServerError("Failed to read static asset".to_string())
        }
    })
}

/// Landing page of the PWA
pub async fn serve_index(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let body = read_asset(&state, "index.html").await?;
    Ok(([(CONTENT_TYPE, "text/html; charset=utf-8")], body))
}

pub async fn serve_manifest(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let body = read_asset(&state, "manifest.json").await?;
    Ok(([(CONTENT_TYPE, "application/json")], body))
}

/// Served from the root so the worker may control the whole origin.
pub async fn serve_service_worker(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let body = read_asset(&state, "sw.js").await?;
    Ok((
        [
            (CONTENT_TYPE, "application/javascript"),
            (SERVICE_WORKER_ALLOWED, "/"),
        ],
        body,
    ))
}
