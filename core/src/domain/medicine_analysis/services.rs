use std::{any::Any, future::Future, panic::AssertUnwindSafe};

use futures::FutureExt;
use tokio::time::Instant;
use tracing::{debug, error, info, warn};

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    medicine_analysis::{
        decoder::decode_model_reply,
        entities::{AnalysisOutcome, AnalysisResult, ScratchFile, UploadedImage, UserProfile},
        ports::{MedicineAnalysisService, ScratchStorage, VisionModelClient},
        prompt::build_analysis_prompt,
        value_objects::{AnalyzeMedicineInput, VisionRequest},
    },
};

const ANALYSIS_TEMPERATURE: f32 = 0.2;

impl<LLM, SS> MedicineAnalysisService for Service<LLM, SS>
where
    LLM: VisionModelClient + 'static,
    SS: ScratchStorage + 'static,
{
    async fn analyze_medicine(
        &self,
        input: AnalyzeMedicineInput,
    ) -> Result<AnalysisOutcome, CoreError> {
        let AnalyzeMedicineInput { image, profile } = input;

        // Validate before touching the filesystem
        if !image.is_image() {
            warn!(content_type = %image.content_type, "Rejected non-image upload");
            return Err(CoreError::UnsupportedMediaType);
        }

        info!(
            content_type = %image.content_type,
            size = image.data.len(),
            "Analyzing medicine image"
        );

        // Detached from the caller: cleanup still runs if the request is dropped
        let service = self.clone();
        let lifecycle = tokio::spawn(async move { service.run_lifecycle(image, profile).await });

        match lifecycle.await {
            Ok(outcome) => Ok(outcome),
            Err(e) => {
                let e = if e.is_panic() {
                    CoreError::TaskFailed(panic_message(e.into_panic().as_ref()))
                } else {
                    CoreError::TaskFailed(e.to_string())
                };
                error!(error = %e, "Medicine analysis failed");
                Ok(AnalysisOutcome::Failed(AnalysisResult::analysis_failed()))
            }
        }
    }
}

impl<LLM, SS> Service<LLM, SS>
where
    LLM: VisionModelClient,
    SS: ScratchStorage,
{
    /// Persist, analyze, discard. The scratch file is discarded on every
    /// path once it exists.
    async fn run_lifecycle(&self, image: UploadedImage, profile: UserProfile) -> AnalysisOutcome {
        let extension = image.extension();
        let scratch = match self
            .scratch_storage
            .persist(image.data, extension, image.content_type)
            .await
        {
            Ok(file) => file,
            Err(e) => {
                error!(error = %e, "Failed to persist uploaded image");
                return AnalysisOutcome::Failed(AnalysisResult::analysis_failed());
            }
        };

        let outcome = match guarded(self.run_analysis(&profile, &scratch)).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(error = %e, "Medicine analysis failed");
                AnalysisOutcome::Failed(AnalysisResult::analysis_failed())
            }
        };

        let path = scratch.path.clone();
        if let Err(e) = self.scratch_storage.discard(scratch).await {
            debug!(error = %e, path = %path.display(), "Ignoring scratch cleanup failure");
        }

        outcome
    }

    async fn run_analysis(
        &self,
        profile: &UserProfile,
        scratch: &ScratchFile,
    ) -> Result<AnalysisOutcome, CoreError> {
        let deadline = Instant::now() + self.llm_timeout;

        let remote = self
            .within(deadline, self.vision_client.upload_image(scratch.clone()))
            .await?;

        let request = VisionRequest {
            prompt: build_analysis_prompt(profile),
            image: remote.clone(),
            temperature: ANALYSIS_TEMPERATURE,
        };
        let reply = self.within(deadline, guarded(self.generate(request))).await;

        let name = remote.name.clone();
        if let Err(e) = self.vision_client.delete_image(remote).await {
            warn!(error = %e, file = %name, "Ignoring remote image cleanup failure");
        }

        let reply = reply?;
        match decode_model_reply(Some(&reply)) {
            Some(value) => Ok(AnalysisOutcome::Decoded(value)),
            None => {
                warn!(reply_len = reply.len(), "Model reply could not be decoded");
                Ok(AnalysisOutcome::Undecodable(AnalysisResult::undecodable()))
            }
        }
    }

    /// Structured mode first, then a single plain retry on the same upload.
    async fn generate(&self, request: VisionRequest) -> Result<String, CoreError> {
        match self
            .vision_client
            .generate_structured(request.clone())
            .await
        {
            Ok(reply) => Ok(reply),
            Err(e) => {
                warn!(error = %e, "Structured generation rejected, retrying in plain mode");
                self.vision_client.generate_plain(request).await
            }
        }
    }

    async fn within<T>(
        &self,
        deadline: Instant,
        future: impl Future<Output = Result<T, CoreError>>,
    ) -> Result<T, CoreError> {
        tokio::time::timeout_at(deadline, future)
            .await
            .map_err(|_| CoreError::Timeout(self.llm_timeout.as_secs()))?
    }
}

/// Turns a panic inside `future` into an error.
async fn guarded<T>(future: impl Future<Output = Result<T, CoreError>>) -> Result<T, CoreError> {
    AssertUnwindSafe(future)
        .catch_unwind()
        .await
        .unwrap_or_else(|payload| Err(CoreError::TaskFailed(panic_message(payload.as_ref()))))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}
