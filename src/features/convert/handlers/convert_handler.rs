use std::sync::Arc;

use axum::{extract::State, http::HeaderMap, Json};

use crate::core::error::{AppError, ErrorResponse, Result};
use crate::core::extractor::{AppJson, AppJsonRejection};
use crate::features::convert::dtos::{ConvertRequestDto, ConvertResponseDto};
use crate::features::convert::models::ConversionStyle;
use crate::features::convert::services::ConversionService;
use crate::features::rate_limits::RateLimitService;

const MAX_TEXT_CHARS: usize = 800;

/// State for the convert handler
#[derive(Clone)]
pub struct ConvertState {
    pub conversion: Arc<ConversionService>,
    pub rate_limit: Arc<RateLimitService>,
}

/// Derive the rate-limit key from the forwarded-IP chain.
///
/// Takes the first `x-forwarded-for` entry when the header is present,
/// otherwise `x-real-ip`, otherwise the shared "unknown" sentinel.
fn client_key(headers: &HeaderMap) -> String {
    if let Some(forwarded) = headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
    {
        let first = forwarded.split(',').next().unwrap_or("").trim();
        return if first.is_empty() {
            "unknown".to_string()
        } else {
            first.to_string()
        };
    }

    headers
        .get("x-real-ip")
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| "unknown".to_string())
}

/// Rewrite self-deprecating text into positive phrasing
///
/// Rate limited per client IP. Served by the remote model when a credential
/// is configured, by the offline fallback otherwise; the `used` field tells
/// the caller which.
#[utoipa::path(
    post,
    path = "/api/convert",
    request_body = ConvertRequestDto,
    responses(
        (status = 200, description = "Conversion succeeded", body = ConvertResponseDto),
        (status = 400, description = "Malformed body, empty or over-length text", body = ErrorResponse),
        (status = 429, description = "Rate limit exceeded, see retry-after header", body = ErrorResponse),
        (status = 500, description = "Remote conversion failed", body = ErrorResponse)
    ),
    tag = "convert"
)]
pub async fn convert(
    State(state): State<ConvertState>,
    headers: HeaderMap,
    body: std::result::Result<AppJson<ConvertRequestDto>, AppJsonRejection>,
) -> Result<Json<ConvertResponseDto>> {
    // The rate limit counts every attempt, including ones whose body turns
    // out to be malformed
    let key = client_key(&headers);
    let decision = state.rate_limit.check(&key);
    if !decision.allowed {
        return Err(AppError::RateLimited {
            message: "しばらく時間をおいてお試しください。".to_string(),
            retry_after_secs: decision.retry_after_secs.unwrap_or(1),
        });
    }

    let AppJson(dto) = body.map_err(AppError::from)?;

    let text = dto.text.trim();
    if text.is_empty() {
        return Err(AppError::Validation(
            "変換したい文を入力してください。".to_string(),
        ));
    }
    if text.chars().count() > MAX_TEXT_CHARS {
        return Err(AppError::Validation(
            "長すぎます（800文字以内にしてください）。".to_string(),
        ));
    }

    let style = ConversionStyle::from_label(dto.style.as_deref());

    let outcome = state.conversion.convert(text, style).await?;
    Ok(Json(outcome.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(
                axum::http::HeaderName::try_from(*name).unwrap(),
                HeaderValue::from_str(value).unwrap(),
            );
        }
        map
    }

    #[test]
    fn test_client_key_takes_first_forwarded_entry() {
        let map = headers(&[("x-forwarded-for", "203.0.113.7, 10.0.0.1, 10.0.0.2")]);
        assert_eq!(client_key(&map), "203.0.113.7");
    }

    #[test]
    fn test_client_key_empty_forwarded_is_unknown() {
        let map = headers(&[("x-forwarded-for", " , 10.0.0.1")]);
        assert_eq!(client_key(&map), "unknown");
    }

    #[test]
    fn test_client_key_falls_back_to_real_ip() {
        let map = headers(&[("x-real-ip", "198.51.100.9")]);
        assert_eq!(client_key(&map), "198.51.100.9");
    }

    #[test]
    fn test_client_key_without_headers_is_unknown() {
        assert_eq!(client_key(&HeaderMap::new()), "unknown");
    }
}
