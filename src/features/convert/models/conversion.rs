use serde::Serialize;
use utoipa::ToSchema;

/// Requested rewriting tone.
///
/// Unrecognized or missing labels coerce to the business-polite default
/// instead of failing; the field exists mostly for future extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionStyle {
    /// 前向き
    Positive,
    /// やわらかく
    Soft,
    /// ビジネス丁寧
    BusinessPolite,
}

impl ConversionStyle {
    pub fn from_label(label: Option<&str>) -> Self {
        match label {
            Some("前向き") => Self::Positive,
            Some("やわらかく") => Self::Soft,
            Some("ビジネス丁寧") => Self::BusinessPolite,
            _ => Self::BusinessPolite,
        }
    }

    /// The Japanese tone label used in prompts and on the wire.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Positive => "前向き",
            Self::Soft => "やわらかく",
            Self::BusinessPolite => "ビジネス丁寧",
        }
    }
}

/// A finished rewrite: the main phrasing plus up to two nuance variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionResult {
    pub converted: String,
    pub alternatives: Vec<String>,
}

/// Which strategy served a conversion; reported to the client for
/// transparency, never used for behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UsedStrategy {
    Remote,
    Fallback,
}

#[derive(Debug, Clone)]
pub struct ConversionOutcome {
    pub result: ConversionResult,
    pub used: UsedStrategy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_from_recognized_labels() {
        assert_eq!(
            ConversionStyle::from_label(Some("前向き")),
            ConversionStyle::Positive
        );
        assert_eq!(
            ConversionStyle::from_label(Some("やわらかく")),
            ConversionStyle::Soft
        );
        assert_eq!(
            ConversionStyle::from_label(Some("ビジネス丁寧")),
            ConversionStyle::BusinessPolite
        );
    }

    #[test]
    fn test_style_defaults_on_missing_or_unrecognized() {
        assert_eq!(
            ConversionStyle::from_label(None),
            ConversionStyle::BusinessPolite
        );
        assert_eq!(
            ConversionStyle::from_label(Some("casual")),
            ConversionStyle::BusinessPolite
        );
        assert_eq!(
            ConversionStyle::from_label(Some("")),
            ConversionStyle::BusinessPolite
        );
    }

    #[test]
    fn test_used_strategy_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&UsedStrategy::Remote).unwrap(),
            "\"remote\""
        );
        assert_eq!(
            serde_json::to_string(&UsedStrategy::Fallback).unwrap(),
            "\"fallback\""
        );
    }
}
