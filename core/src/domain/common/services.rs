use std::{sync::Arc, time::Duration};

/// Holds the adapters every domain service implementation works with.
///
/// Domain modules implement their service traits for this struct, so the
/// wiring lives in one place and tests can swap any adapter for a mock.
pub struct Service<LLM, SS> {
    pub(crate) vision_client: Arc<LLM>,
    pub(crate) scratch_storage: Arc<SS>,
    pub(crate) llm_timeout: Duration,
}

impl<LLM, SS> Service<LLM, SS> {
    pub fn new(vision_client: LLM, scratch_storage: SS, llm_timeout: Duration) -> Self {
        Self {
            vision_client: Arc::new(vision_client),
            scratch_storage: Arc::new(scratch_storage),
            llm_timeout,
        }
    }
}

impl<LLM, SS> Clone for Service<LLM, SS> {
    fn clone(&self) -> Self {
        Self {
            vision_client: Arc::clone(&self.vision_client),
            scratch_storage: Arc::clone(&self.scratch_storage),
            llm_timeout: self.llm_timeout,
        }
    }
}
