use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::convert::models::{ConversionOutcome, ConversionStyle, UsedStrategy};
use crate::features::convert::services::{FallbackService, RemoteConvertService};

/// Orchestrates the two conversion strategies.
///
/// The remote path is selected up front, by configuration: once a credential
/// is present its failures surface to the caller instead of being masked by
/// the fallback converter.
pub struct ConversionService {
    remote: Option<Arc<RemoteConvertService>>,
    fallback: Arc<FallbackService>,
}

impl ConversionService {
    pub fn new(remote: Option<Arc<RemoteConvertService>>, fallback: Arc<FallbackService>) -> Self {
        Self { remote, fallback }
    }

    /// Convert already-validated text, tagging the result with the strategy
    /// that produced it.
    pub async fn convert(&self, text: &str, style: ConversionStyle) -> Result<ConversionOutcome> {
        if let Some(remote) = &self.remote {
            let result = remote
                .convert(text, style)
                .await
                .map_err(|e| AppError::Remote(e.to_string()))?;

            return Ok(ConversionOutcome {
                result,
                used: UsedStrategy::Remote,
            });
        }

        let result = self.fallback.convert(text, style);

        // The fallback contract guarantees a non-empty rewrite; an empty one
        // here is a bug in the rule table.
        if result.converted.trim().is_empty() {
            return Err(AppError::Internal("変換に失敗しました".to_string()));
        }

        Ok(ConversionOutcome {
            result,
            used: UsedStrategy::Fallback,
        })
    }
}
