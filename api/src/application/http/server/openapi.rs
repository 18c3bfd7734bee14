use crate::application::http::medicine_analysis::router::MedicineAnalysisApiDoc;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Dawa Pahchan API"
    ),
    nest(
        (path = "/api", api = MedicineAnalysisApiDoc),
    )
)]
pub struct ApiDoc;
