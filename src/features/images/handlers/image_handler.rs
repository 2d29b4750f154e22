use std::sync::Arc;

use axum::{extract::State, Json};
use validator::Validate;

use crate::core::error::{AppError, ErrorResponse, Result};
use crate::core::extractor::AppJson;
use crate::features::images::dtos::{GenerateImageRequestDto, GenerateImageResponseDto};
use crate::features::images::services::ImageService;

/// Generate a before/after share image
///
/// Produces a vertical (9:16) illustration of the transformation, suitable
/// for Instagram Stories, as base64 image data.
#[utoipa::path(
    post,
    path = "/api/generate-image",
    request_body = GenerateImageRequestDto,
    responses(
        (status = 200, description = "Image generated", body = GenerateImageResponseDto),
        (status = 400, description = "Missing beforeText/afterText", body = ErrorResponse),
        (status = 500, description = "Image generation failed", body = ErrorResponse)
    ),
    tag = "images"
)]
pub async fn generate_image(
    State(service): State<Arc<ImageService>>,
    AppJson(dto): AppJson<GenerateImageRequestDto>,
) -> Result<Json<GenerateImageResponseDto>> {
    dto.validate().map_err(|_| {
        AppError::Validation("beforeText and afterText are required".to_string())
    })?;

    let image = service.generate(&dto.before_text, &dto.after_text).await?;

    Ok(Json(GenerateImageResponseDto {
        success: true,
        image: image.into(),
    }))
}
