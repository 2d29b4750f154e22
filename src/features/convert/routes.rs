use std::sync::Arc;

use axum::{routing::post, Router};

use crate::features::convert::handlers::convert_handler::{convert, ConvertState};
use crate::features::convert::services::ConversionService;
use crate::features::rate_limits::RateLimitService;

/// Create routes for the convert feature
pub fn routes(conversion: Arc<ConversionService>, rate_limit: Arc<RateLimitService>) -> Router {
    let state = ConvertState {
        conversion,
        rate_limit,
    };

    Router::new()
        .route("/api/convert", post(convert))
        .with_state(state)
}
