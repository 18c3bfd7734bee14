use std::path::PathBuf;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const IMAGE_REQUIRED_MESSAGE_URDU: &str = "براہ کرم تصویر اپلوڈ کریں";
pub const UNDECODABLE_MESSAGE_URDU: &str =
    "تصویر سے معلومات حاصل نہیں ہو سکیں۔ براہ کرم صاف تصویر لیں اور دوبارہ کوشش کریں۔";
pub const ANALYSIS_FAILED_MESSAGE_URDU: &str = "تجزیہ میں مسئلہ ہوا۔ براہ کرم دوبارہ کوشش کریں۔";

/// Health profile sent along with the photo.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserProfile {
    pub age: i64,
    pub gender: String,
    pub weight: f64,
    pub pregnant: bool,
    pub allergies: String,
}

impl UserProfile {
    /// Case-insensitive match against `true`, `1` and `yes`.
    pub fn parse_pregnant(raw: &str) -> bool {
        matches!(raw.to_lowercase().as_str(), "true" | "1" | "yes")
    }
}

#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub data: Bytes,
    pub content_type: String,
}

impl UploadedImage {
    pub fn new(data: Bytes, content_type: impl Into<String>) -> Self {
        Self {
            data,
            content_type: content_type.into(),
        }
    }

    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }

    /// `image/jpeg; q=1` gives `jpeg`.
    pub fn extension(&self) -> String {
        let subtype = self.content_type.rsplit('/').next().unwrap_or_default();
        subtype
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_string()
    }
}

/// A persisted copy of an upload, owned by exactly one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScratchFile {
    pub path: PathBuf,
    pub content_type: String,
}

/// Copy of a scratch file held by the vision model provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteImage {
    /// Provider handle used to delete the copy
    pub name: String,
    pub uri: String,
    pub content_type: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AuthenticityStatus {
    Authentic,
    Suspicious,
    Counterfeit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SafetyStatus {
    Safe,
    Warning,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AuthenticityVerdict {
    pub status: AuthenticityStatus,
    #[serde(default)]
    pub label_urdu: String,
    #[serde(default)]
    pub reasons_urdu: Vec<String>,
    #[serde(default)]
    pub details: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SafetyVerdict {
    pub status: SafetyStatus,
    #[serde(default)]
    pub label_urdu: String,
    #[serde(default)]
    pub warnings_urdu: Vec<String>,
    #[serde(default)]
    pub details: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DosageGuidance {
    #[serde(default)]
    pub recommendation_urdu: String,
    #[serde(default)]
    pub details: String,
}

/// Shape of a medicine analysis as returned to the PWA.
///
/// Fields the model left out stay absent on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AnalysisResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medicine_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extracted_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation_urdu: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authenticity: Option<AuthenticityVerdict>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safety: Option<SafetyVerdict>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dosage: Option<DosageGuidance>,
    #[serde(default)]
    pub not_medicine: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message_urdu: Option<String>,
}

impl AnalysisResult {
    pub fn fallback(message: &str) -> Self {
        Self {
            not_medicine: true,
            error_message_urdu: Some(message.to_string()),
            ..Default::default()
        }
    }

    /// The model answered but nothing usable could be read from the reply.
    pub fn undecodable() -> Self {
        Self::fallback(UNDECODABLE_MESSAGE_URDU)
    }

    pub fn analysis_failed() -> Self {
        Self::fallback(ANALYSIS_FAILED_MESSAGE_URDU)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    /// Decoded model reply, relayed verbatim.
    Decoded(serde_json::Value),
    Undecodable(AnalysisResult),
    Failed(AnalysisResult),
}

impl AnalysisOutcome {
    pub fn is_server_error(&self) -> bool {
        matches!(self, AnalysisOutcome::Failed(_))
    }

    pub fn into_body(self) -> serde_json::Value {
        match self {
            AnalysisOutcome::Decoded(value) => value,
            AnalysisOutcome::Undecodable(result) | AnalysisOutcome::Failed(result) => {
                serde_json::to_value(result).unwrap_or_else(|_| {
                    serde_json::json!({ "not_medicine": true })
                })
            }
        }
    }
}
