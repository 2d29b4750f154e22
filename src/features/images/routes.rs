use std::sync::Arc;

use axum::{routing::post, Router};

use crate::features::images::handlers::image_handler::generate_image;
use crate::features::images::services::ImageService;

/// Create routes for the images feature
pub fn routes(service: Arc<ImageService>) -> Router {
    Router::new()
        .route("/api/generate-image", post(generate_image))
        .with_state(service)
}
