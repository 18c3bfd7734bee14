use crate::{
    domain::common::{DawaConfig, entities::app_errors::CoreError, services::Service},
    infrastructure::{llm::GeminiVisionClient, scratch::FsScratchStorage},
};

pub type DawaService = Service<GeminiVisionClient, FsScratchStorage>;

pub async fn create_service(config: DawaConfig) -> Result<DawaService, CoreError> {
    let timeout = config.llm.timeout;
    let vision_client = GeminiVisionClient::new(config.llm)?;
    let scratch_storage = FsScratchStorage::new(config.scratch).await?;

    Ok(Service::new(vision_client, scratch_storage, timeout))
}
