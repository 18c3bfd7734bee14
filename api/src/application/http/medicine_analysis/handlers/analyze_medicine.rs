use axum::{
    extract::{Multipart, State, multipart::MultipartError},
    http::StatusCode,
};
use dawa_core::domain::medicine_analysis::{
    entities::AnalysisResult, ports::MedicineAnalysisService,
};
use tracing::error;

use crate::application::http::{
    medicine_analysis::validators::{AnalyzeMedicineForm, AnalyzeMedicineRequest},
    server::{
        api_entities::{
            api_error::{ApiError, ApiErrorResponse},
            response::Response,
        },
        app_state::AppState,
    },
};

fn multipart_error(e: MultipartError) -> ApiError {
    error!("Failed to read multipart field: {}", e);
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge(e.body_text())
    } else {
        ApiError::BadRequest(format!("Failed to read multipart field: {}", e))
    }
}

#[utoipa::path(
    post,
    path = "/analyze",
    tag = "medicine-analysis",
    summary = "Analyze a medicine photo",
    description = "Identifies the medicine on the photo and checks authenticity, safety for the given profile and general dosage using a vision model. Replies that cannot be read come back as a 200 fallback with not_medicine set.",
    request_body(content = AnalyzeMedicineRequest, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Analysis or unreadable-photo fallback", body = AnalysisResult),
        (status = 400, description = "Upload is not an image", body = ApiErrorResponse),
        (status = 422, description = "Malformed profile field", body = ApiErrorResponse),
        (status = 500, description = "Analysis failed", body = AnalysisResult)
    ),
)]
pub async fn analyze_medicine(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response<serde_json::Value>, ApiError> {
    let mut form = AnalyzeMedicineForm::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "image" => {
                let content_type = field.content_type().map(|c| c.to_string());
                let data = field.bytes().await.map_err(multipart_error)?;
                form.image = Some((data, content_type));
            }
            "age" => form.age = Some(field.text().await.map_err(multipart_error)?),
            "gender" => form.gender = Some(field.text().await.map_err(multipart_error)?),
            "weight" => form.weight = Some(field.text().await.map_err(multipart_error)?),
            "pregnant" => form.pregnant = Some(field.text().await.map_err(multipart_error)?),
            "allergies" => form.allergies = Some(field.text().await.map_err(multipart_error)?),
            _ => {
                // Ignore unknown fields
            }
        }
    }

    let outcome = state
        .service
        .analyze_medicine(form.into_input()?)
        .await
        .map_err(ApiError::from)?;

    if outcome.is_server_error() {
        Ok(Response::InternalServerError(outcome.into_body()))
    } else {
        Ok(Response::OK(outcome.into_body()))
    }
}
