use utoipa::{Modify, OpenApi};

use crate::core::error::ErrorResponse;
use crate::features::convert::{
    dtos as convert_dtos, handlers as convert_handlers, models as convert_models,
};
use crate::features::images::{dtos as image_dtos, handlers as image_handlers};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Convert
        convert_handlers::convert_handler::convert,
        // Images
        image_handlers::image_handler::generate_image,
    ),
    components(
        schemas(
            ErrorResponse,
            // Convert
            convert_dtos::ConvertRequestDto,
            convert_dtos::ConvertResponseDto,
            convert_models::UsedStrategy,
            // Images
            image_dtos::GenerateImageRequestDto,
            image_dtos::GenerateImageResponseDto,
            image_dtos::ImagePayloadDto,
        )
    ),
    tags(
        (name = "convert", description = "Positive rewriting of self-deprecating text"),
        (name = "images", description = "Share-image generation")
    )
)]
pub struct ApiDoc;

/// Overrides the OpenAPI info block with values from configuration
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
