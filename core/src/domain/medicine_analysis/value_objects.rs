use crate::domain::medicine_analysis::entities::{RemoteImage, UploadedImage, UserProfile};

#[derive(Debug, Clone)]
pub struct AnalyzeMedicineInput {
    pub image: UploadedImage,
    pub profile: UserProfile,
}

/// One generation against an already uploaded image.
#[derive(Debug, Clone, PartialEq)]
pub struct VisionRequest {
    pub prompt: String,
    pub image: RemoteImage,
    pub temperature: f32,
}
