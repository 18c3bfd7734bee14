use super::handlers::analyze_medicine::{__path_analyze_medicine, analyze_medicine};
use crate::application::http::server::app_state::AppState;
use axum::{Router, extract::DefaultBodyLimit, routing::post};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(analyze_medicine))]
pub struct MedicineAnalysisApiDoc;

pub fn medicine_analysis_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/analyze", post(analyze_medicine))
        .layer(DefaultBodyLimit::max(state.args.server.max_upload_bytes))
}
