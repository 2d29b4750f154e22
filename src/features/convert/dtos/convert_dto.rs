use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::convert::models::{ConversionOutcome, UsedStrategy};

/// Request DTO for text conversion
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ConvertRequestDto {
    /// Text to rewrite (1-800 characters after trimming)
    #[serde(default)]
    pub text: String,

    /// Requested tone label; unrecognized values fall back to ビジネス丁寧
    #[serde(default)]
    pub style: Option<String>,
}

/// Response DTO for a successful conversion
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ConvertResponseDto {
    pub ok: bool,
    pub converted: String,
    pub alternatives: Vec<String>,
    pub used: UsedStrategy,
}

impl From<ConversionOutcome> for ConvertResponseDto {
    fn from(outcome: ConversionOutcome) -> Self {
        Self {
            ok: true,
            converted: outcome.result.converted,
            alternatives: outcome.result.alternatives,
            used: outcome.used,
        }
    }
}
