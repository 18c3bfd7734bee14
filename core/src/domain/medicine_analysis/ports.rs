use std::future::Future;

use bytes::Bytes;

use crate::domain::{
    common::entities::app_errors::CoreError,
    medicine_analysis::{
        entities::{AnalysisOutcome, RemoteImage, ScratchFile},
        value_objects::{AnalyzeMedicineInput, VisionRequest},
    },
};

/// Client for the hosted vision model.
///
/// An image is uploaded once and may then back several generations. The
/// caller owns the remote copy and must hand it to `delete_image`.
#[cfg_attr(test, mockall::automock)]
pub trait VisionModelClient: Send + Sync {
    fn upload_image(
        &self,
        image: ScratchFile,
    ) -> impl Future<Output = Result<RemoteImage, CoreError>> + Send;

    /// Ask for a JSON-only answer following the analysis schema
    fn generate_structured(
        &self,
        request: VisionRequest,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;

    /// Ask for a free-form answer
    fn generate_plain(
        &self,
        request: VisionRequest,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;

    fn delete_image(
        &self,
        image: RemoteImage,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;
}

/// Per-request temporary storage for uploaded images
#[cfg_attr(test, mockall::automock)]
pub trait ScratchStorage: Send + Sync {
    fn persist(
        &self,
        data: Bytes,
        extension: String,
        content_type: String,
    ) -> impl Future<Output = Result<ScratchFile, CoreError>> + Send;

    fn discard(&self, file: ScratchFile) -> impl Future<Output = Result<(), CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait MedicineAnalysisService: Send + Sync {
    /// Runs one analysis round trip.
    ///
    /// Only input validation surfaces as an error; every later failure is
    /// folded into [`AnalysisOutcome::Failed`].
    fn analyze_medicine(
        &self,
        input: AnalyzeMedicineInput,
    ) -> impl Future<Output = Result<AnalysisOutcome, CoreError>> + Send;
}
