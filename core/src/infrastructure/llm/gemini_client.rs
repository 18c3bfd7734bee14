use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::domain::{
    common::{LLMConfig, entities::app_errors::CoreError},
    medicine_analysis::{
        entities::{RemoteImage, ScratchFile},
        ports::VisionModelClient,
        schema::get_medicine_analysis_schema,
        value_objects::VisionRequest,
    },
};

#[derive(Debug, Clone)]
pub struct GeminiVisionClient {
    api_key: String,
    model_name: String,
    base_url: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    FileData { file_data: FileData },
}

#[derive(Debug, Serialize)]
struct FileData {
    mime_type: String,
    file_uri: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Debug, Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Debug, Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UploadFileResponse {
    file: UploadedFile,
}

#[derive(Debug, Deserialize)]
struct UploadedFile {
    name: String,
    uri: String,
}

impl GeminiResponse {
    /// Concatenated text parts of the first candidate.
    fn into_text(self) -> Option<String> {
        let parts = self.candidates.into_iter().next()?.content?.parts;
        let text: String = parts.into_iter().filter_map(|p| p.text).collect();
        if text.is_empty() { None } else { Some(text) }
    }
}

impl GeminiVisionClient {
    pub fn new(config: LLMConfig) -> Result<Self, CoreError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                CoreError::ExternalServiceError(format!("Failed to build LLM client: {}", e))
            })?;

        Ok(Self {
            api_key: config.gemini_api_key,
            model_name: config.gemini_model,
            base_url: config.gemini_base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    async fn call_gemini_api(&self, request: GeminiRequest) -> Result<String, CoreError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model_name, self.api_key
        );

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                let e = e.without_url();
                tracing::error!("Gemini API request failed: {}", e);
                CoreError::ExternalServiceError(format!("LLM API error: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Gemini API error: {} - {}", status, error_text);
            return Err(CoreError::ExternalServiceError(format!(
                "LLM API returned error: {} - {}",
                status, error_text
            )));
        }

        let gemini_response: GeminiResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Gemini response: {}", e);
            CoreError::ExternalServiceError(format!("Failed to parse LLM response: {}", e))
        })?;

        gemini_response
            .into_text()
            .ok_or_else(|| CoreError::ExternalServiceError("No response from LLM".to_string()))
    }
}

fn build_request(
    prompt: String,
    image: &RemoteImage,
    generation_config: GenerationConfig,
) -> GeminiRequest {
    GeminiRequest {
        contents: vec![Content {
            parts: vec![
                Part::Text { text: prompt },
                Part::FileData {
                    file_data: FileData {
                        mime_type: image.content_type.clone(),
                        file_uri: image.uri.clone(),
                    },
                },
            ],
        }],
        generation_config,
    }
}

impl VisionModelClient for GeminiVisionClient {
    #[instrument(skip_all, fields(path = %image.path.display()))]
    async fn upload_image(&self, image: ScratchFile) -> Result<RemoteImage, CoreError> {
        let data = tokio::fs::read(&image.path).await.map_err(|e| {
            CoreError::ScratchStorage(format!("Failed to read {}: {}", image.path.display(), e))
        })?;

        let url = format!("{}/upload/v1beta/files?key={}", self.base_url, self.api_key);

        let response = self
            .client
            .post(&url)
            .header("X-Goog-Upload-Protocol", "raw")
            .header(reqwest::header::CONTENT_TYPE, &image.content_type)
            .body(data)
            .send()
            .await
            .map_err(|e| {
                let e = e.without_url();
                tracing::error!("Gemini file upload failed: {}", e);
                CoreError::ExternalServiceError(format!("LLM upload error: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Gemini file upload error: {} - {}", status, error_text);
            return Err(CoreError::ExternalServiceError(format!(
                "LLM upload returned error: {} - {}",
                status, error_text
            )));
        }

        let uploaded: UploadFileResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Gemini upload response: {}", e);
            CoreError::ExternalServiceError(format!("Failed to parse LLM upload response: {}", e))
        })?;

        tracing::debug!(file = %uploaded.file.name, "Uploaded image to Gemini");
        Ok(RemoteImage {
            name: uploaded.file.name,
            uri: uploaded.file.uri,
            content_type: image.content_type,
        })
    }

    #[instrument(skip(self, request), fields(model = %self.model_name))]
    async fn generate_structured(&self, request: VisionRequest) -> Result<String, CoreError> {
        let generation_config = GenerationConfig {
            temperature: request.temperature,
            response_mime_type: Some("application/json".to_string()),
            response_schema: Some(get_medicine_analysis_schema()),
        };

        self.call_gemini_api(build_request(request.prompt, &request.image, generation_config))
            .await
    }

    #[instrument(skip(self, request), fields(model = %self.model_name))]
    async fn generate_plain(&self, request: VisionRequest) -> Result<String, CoreError> {
        let generation_config = GenerationConfig {
            temperature: request.temperature,
            response_mime_type: None,
            response_schema: None,
        };

        self.call_gemini_api(build_request(request.prompt, &request.image, generation_config))
            .await
    }

    #[instrument(skip_all, fields(file = %image.name))]
    async fn delete_image(&self, image: RemoteImage) -> Result<(), CoreError> {
        let url = format!("{}/v1beta/{}?key={}", self.base_url, image.name, self.api_key);

        let response = self.client.delete(&url).send().await.map_err(|e| {
            CoreError::ExternalServiceError(format!("LLM delete error: {}", e.without_url()))
        })?;

        if !response.status().is_success() {
            return Err(CoreError::ExternalServiceError(format!(
                "LLM delete returned error: {}",
                response.status()
            )));
        }

        tracing::debug!("Deleted image from Gemini");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn remote(content_type: &str) -> RemoteImage {
        RemoteImage {
            name: "files/abc123".to_string(),
            uri: "https://generativelanguage.googleapis.com/v1beta/files/abc123".to_string(),
            content_type: content_type.to_string(),
        }
    }

    #[test]
    fn test_plain_request_omits_structured_fields() {
        let request = build_request(
            "describe".to_string(),
            &remote("image/png"),
            GenerationConfig {
                temperature: 0.5,
                response_mime_type: None,
                response_schema: None,
            },
        );

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "contents": [{
                    "parts": [
                        { "text": "describe" },
                        { "file_data": {
                            "mime_type": "image/png",
                            "file_uri": "https://generativelanguage.googleapis.com/v1beta/files/abc123"
                        }}
                    ]
                }],
                "generation_config": { "temperature": 0.5 }
            })
        );
    }

    #[test]
    fn test_structured_request_carries_schema() {
        let request = build_request(
            "describe".to_string(),
            &remote("image/jpeg"),
            GenerationConfig {
                temperature: 0.5,
                response_mime_type: Some("application/json".to_string()),
                response_schema: Some(get_medicine_analysis_schema()),
            },
        );
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(
            value["generation_config"]["response_mime_type"],
            "application/json"
        );
        assert_eq!(
            value["generation_config"]["response_schema"]["required"],
            json!(["not_medicine"])
        );
    }

    #[test]
    fn test_reply_text_joins_parts_of_first_candidate() {
        let response: GeminiResponse = serde_json::from_value(json!({
            "candidates": [
                { "content": { "parts": [{ "text": "{\"a\":" }, { "text": " 1}" }] } },
                { "content": { "parts": [{ "text": "ignored" }] } }
            ]
        }))
        .unwrap();

        assert_eq!(response.into_text().as_deref(), Some("{\"a\": 1}"));
    }

    #[test]
    fn test_reply_without_text_is_none() {
        let response: GeminiResponse =
            serde_json::from_value(json!({ "candidates": [{ "finishReason": "SAFETY" }] })).unwrap();
        assert_eq!(response.into_text(), None);

        let response: GeminiResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(response.into_text(), None);
    }
}
