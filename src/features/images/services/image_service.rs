use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::config::GeminiConfig;
use crate::core::error::{AppError, Result};
use crate::shared::prompts::render_image_prompt;
use crate::shared::text::truncate_chars;

const MAX_API_ERROR_BODY_CHARS: usize = 500;

/// A generated image as returned by the model: base64 data plus MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<RequestContent>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(rename = "imageConfig")]
    image_config: ImageConfig,
}

#[derive(Debug, Serialize)]
struct ImageConfig {
    #[serde(rename = "aspectRatio")]
    aspect_ratio: &'static str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(rename = "inlineData")]
    inline_data: Option<InlineData>,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct InlineData {
    #[serde(rename = "mimeType")]
    mime_type: Option<String>,
    data: String,
}

/// Service generating before/after share images via Gemini.
pub struct ImageService {
    client: reqwest::Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl ImageService {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: config.api_key,
            model: config.model,
            base_url: config.base_url,
        })
    }

    /// Generate a 9:16 share image depicting the before/after transformation.
    pub async fn generate(&self, before_text: &str, after_text: &str) -> Result<ImagePayload> {
        let Some(api_key) = &self.api_key else {
            return Err(AppError::Internal(
                "GEMINI_API_KEY is not configured".to_string(),
            ));
        };

        let prompt = render_image_prompt(before_text, after_text)
            .map_err(|e| AppError::Internal(format!("Failed to render image prompt: {}", e)))?;

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        );

        let request = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                image_config: ImageConfig {
                    aspect_ratio: "9:16",
                },
            },
        };

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::Internal(format!("Gemini request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Internal(format!(
                "Gemini API error: {} {}",
                status.as_u16(),
                truncate_chars(&body, MAX_API_ERROR_BODY_CHARS)
            )));
        }

        let payload: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| AppError::Internal(format!("Gemini response parse failed: {}", e)))?;

        extract_inline_image(payload).ok_or_else(|| {
            tracing::error!("No inline image data in Gemini response");
            AppError::Internal("Failed to generate image".to_string())
        })
    }
}

/// Pick the first inline-data part out of the candidates; text-only replies
/// mean the model answered conversationally instead of drawing.
fn extract_inline_image(response: GenerateContentResponse) -> Option<ImagePayload> {
    let candidate = response.candidates.into_iter().next()?;
    let content = candidate.content?;

    for part in content.parts {
        if let Some(inline) = part.inline_data {
            return Some(ImagePayload {
                mime_type: inline.mime_type.unwrap_or_else(|| "image/png".to_string()),
                data: inline.data,
            });
        }
        if let Some(text) = part.text {
            tracing::debug!("Gemini returned text instead of image: {}", text);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response_from(value: serde_json::Value) -> GenerateContentResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_extract_inline_image_from_first_image_part() {
        let response = response_from(json!({
            "candidates": [{
                "content": {
                    "parts": [
                        {"text": "Here is your image:"},
                        {"inlineData": {"mimeType": "image/png", "data": "aGVsbG8="}}
                    ]
                }
            }]
        }));

        let image = extract_inline_image(response).unwrap();
        assert_eq!(image.mime_type, "image/png");
        assert_eq!(image.data, "aGVsbG8=");
    }

    #[test]
    fn test_extract_inline_image_defaults_mime_type() {
        let response = response_from(json!({
            "candidates": [{
                "content": {
                    "parts": [{"inlineData": {"data": "aGVsbG8="}}]
                }
            }]
        }));

        let image = extract_inline_image(response).unwrap();
        assert_eq!(image.mime_type, "image/png");
    }

    #[test]
    fn test_extract_inline_image_text_only_is_none() {
        let response = response_from(json!({
            "candidates": [{
                "content": {
                    "parts": [{"text": "I cannot draw that."}]
                }
            }]
        }));

        assert!(extract_inline_image(response).is_none());
    }

    #[test]
    fn test_extract_inline_image_no_candidates_is_none() {
        let response = response_from(json!({"candidates": []}));
        assert!(extract_inline_image(response).is_none());
    }
}
