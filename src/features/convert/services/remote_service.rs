use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::core::config::OpenAiConfig;
use crate::core::error::AppError;
use crate::features::convert::models::{ConversionResult, ConversionStyle};
use crate::shared::llm::parse_json;
use crate::shared::prompts::{render_convert_system_prompt, render_convert_user_prompt};
use crate::shared::text::truncate_chars;

const TEMPERATURE: f32 = 0.6;

/// Upstream error bodies embedded in a failure message are capped here.
const MAX_API_ERROR_BODY_CHARS: usize = 500;

const MAX_ALTERNATIVES: usize = 2;

/// Failures of the remote conversion path. These are surfaced to the caller
/// as a 500; the fallback converter is never used to mask them.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("OpenAI API error: {status} {body}")]
    Api { status: u16, body: String },

    #[error("OpenAI request timed out")]
    Timeout,

    #[error("OpenAI request failed: {0}")]
    Http(String),

    #[error("OpenAI returned empty content")]
    EmptyCompletion,

    #[error("OpenAI JSON parse failed: {0}")]
    InvalidJson(String),

    #[error("OpenAI JSON parse failed (converted empty)")]
    EmptyConverted,

    #[error("Failed to render prompt: {0}")]
    Prompt(String),
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Option<ChatChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// Remote conversion strategy backed by an OpenAI-compatible
/// chat-completions API.
///
/// Construction requires a credential; without one `from_config` returns
/// `None` and requests are served by the fallback converter instead.
pub struct RemoteConvertService {
    client: reqwest::Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl RemoteConvertService {
    /// Build the service if `OPENAI_API_KEY` is configured; `None` otherwise.
    pub fn from_config(config: &OpenAiConfig) -> crate::core::error::Result<Option<Self>> {
        let Some(api_key) = config.api_key.clone() else {
            return Ok(None);
        };

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Some(Self {
            client,
            api_key,
            model: config.model.clone(),
            endpoint: format!(
                "{}/v1/chat/completions",
                config.base_url.trim_end_matches('/')
            ),
        }))
    }

    pub async fn convert(
        &self,
        text: &str,
        style: ConversionStyle,
    ) -> Result<ConversionResult, RemoteError> {
        let system = render_convert_system_prompt().map_err(|e| RemoteError::Prompt(e.to_string()))?;
        let user = render_convert_user_prompt(style.label(), text)
            .map_err(|e| RemoteError::Prompt(e.to_string()))?;

        let request = ChatCompletionRequest {
            model: &self.model,
            temperature: TEMPERATURE,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    RemoteError::Timeout
                } else {
                    RemoteError::Http(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RemoteError::Api {
                status: status.as_u16(),
                body: truncate_chars(&body, MAX_API_ERROR_BODY_CHARS),
            });
        }

        let payload: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| RemoteError::Http(e.to_string()))?;

        let content = payload
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .unwrap_or_default();

        let content = content.trim();
        if content.is_empty() {
            return Err(RemoteError::EmptyCompletion);
        }

        parse_completion(content)
    }
}

/// Validate the model's completion against the expected
/// `{"converted": string, "alternatives": [string, string]}` shape.
///
/// `alternatives` is coerced leniently (non-strings dropped, capped at two)
/// but a missing, non-string or blank `converted` is an error.
fn parse_completion(content: &str) -> Result<ConversionResult, RemoteError> {
    let value: Value = parse_json(content).map_err(RemoteError::InvalidJson)?;

    let converted = value
        .get("converted")
        .and_then(Value::as_str)
        .map(str::trim)
        .unwrap_or_default();

    if converted.is_empty() {
        return Err(RemoteError::EmptyConverted);
    }

    let alternatives = value
        .get("alternatives")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .take(MAX_ALTERNATIVES)
                .collect()
        })
        .unwrap_or_default();

    Ok(ConversionResult {
        converted: converted.to_string(),
        alternatives,
    })
}
