use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::images::services::ImagePayload;

/// Request DTO for share-image generation
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateImageRequestDto {
    /// The original self-deprecating text
    #[serde(default)]
    #[validate(length(min = 1))]
    pub before_text: String,

    /// The positive rewrite
    #[serde(default)]
    #[validate(length(min = 1))]
    pub after_text: String,
}

/// Response DTO for a generated image
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GenerateImageResponseDto {
    pub success: bool,
    pub image: ImagePayloadDto,
}

/// Base64-encoded image with its MIME type
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImagePayloadDto {
    pub mime_type: String,
    pub data: String,
}

impl From<ImagePayload> for ImagePayloadDto {
    fn from(payload: ImagePayload) -> Self {
        Self {
            mime_type: payload.mime_type,
            data: payload.data,
        }
    }
}
