use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum CoreError {
    #[error("Unsupported media type: an image upload is required")]
    UnsupportedMediaType,

    #[error("Scratch storage error: {0}")]
    ScratchStorage(String),

    #[error("External service error: {0}")]
    ExternalServiceError(String),

    #[error("External service did not answer within {0} seconds")]
    Timeout(u64),

    #[error("Analysis task did not complete: {0}")]
    TaskFailed(String),
}
