use lazy_static::lazy_static;
use regex::Regex;
use serde::de::DeserializeOwned;

use crate::shared::text::truncate_chars;

lazy_static! {
    /// Fenced Markdown block with an optional language tag, e.g. ```json ... ```
    static ref CODE_FENCE_RE: Regex = Regex::new(r"(?s)```[a-zA-Z]*\s*(.*?)```").unwrap();

    /// Trailing comma before a closing brace or bracket
    static ref TRAILING_COMMA_RE: Regex = Regex::new(r",(\s*[}\]])").unwrap();

    /// JavaScript-style string concatenation, `"a" + "b"`
    static ref STRING_CONCAT_RE: Regex = Regex::new(r#""\s*\+\s*""#).unwrap();
}

/// Locate the JSON object inside a completion.
///
/// The model is instructed to answer with bare JSON, but replies regularly
/// arrive wrapped in a Markdown fence or padded with prose. A fenced block
/// wins; otherwise the outermost `{ ... }` span is taken.
pub fn extract_json(text: &str) -> Result<String, String> {
    if let Some(fenced) = CODE_FENCE_RE.captures(text) {
        return Ok(fenced[1].trim().to_string());
    }

    let trimmed = text.trim();
    if trimmed.starts_with('{') {
        return Ok(trimmed.to_string());
    }

    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if start < end => Ok(text[start..=end].to_string()),
        _ => Err("no JSON object found in completion".to_string()),
    }
}

/// The defects cheap enough to patch with a regex before retrying serde.
fn apply_quick_fixes(payload: &str) -> String {
    let joined = STRING_CONCAT_RE.replace_all(payload, "");
    TRAILING_COMMA_RE.replace_all(&joined, "$1").into_owned()
}

/// Structural repair via llm_json, as a last resort. The repairer can panic
/// on pathological input, so the call is fenced with `catch_unwind`.
fn repair(payload: &str) -> Option<String> {
    let options = llm_json::RepairOptions::default();
    let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        llm_json::repair_json(payload, &options)
    }));

    match outcome {
        Ok(Ok(repaired)) => Some(repaired),
        Ok(Err(e)) => {
            tracing::debug!("JSON repair failed: {:?}", e);
            None
        }
        Err(_) => {
            tracing::warn!("JSON repair panicked");
            None
        }
    }
}

/// Parse completion text into `T`, tolerating common LLM output defects.
///
/// The extracted payload is tried as-is, then after the quick regex fixes,
/// then after llm_json repair. The first candidate serde accepts wins; a
/// payload that survives none of them is an error for the caller to surface.
pub fn parse_json<T>(text: &str) -> Result<T, String>
where
    T: DeserializeOwned,
{
    let payload = extract_json(text)?;

    if let Ok(parsed) = serde_json::from_str(&payload) {
        return Ok(parsed);
    }

    let patched = apply_quick_fixes(&payload);
    if let Ok(parsed) = serde_json::from_str(&patched) {
        tracing::debug!("completion JSON accepted after quick fixes");
        return Ok(parsed);
    }

    if let Some(repaired) = repair(&payload) {
        if let Ok(parsed) = serde_json::from_str(&repaired) {
            tracing::debug!("completion JSON accepted after repair");
            return Ok(parsed);
        }
    }

    Err(format!(
        "completion is not valid JSON: {}",
        truncate_chars(&payload, 200)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::Value;

    #[derive(Debug, Deserialize)]
    struct Rewrite {
        converted: String,
        #[serde(default)]
        alternatives: Vec<String>,
    }

    #[test]
    fn test_extract_json_fenced_with_language_tag() {
        let reply = "結果はこちらです。\n```json\n{\"converted\": \"前向きな一言\"}\n```\n以上です。";

        let payload = extract_json(reply).unwrap();
        assert_eq!(payload, r#"{"converted": "前向きな一言"}"#);
    }

    #[test]
    fn test_extract_json_generic_fence() {
        let reply = "```\n{\"converted\": \"前向きな一言\", \"alternatives\": []}\n```";

        let payload = extract_json(reply).unwrap();
        assert!(payload.starts_with('{'));
        assert!(payload.ends_with('}'));
    }

    #[test]
    fn test_extract_json_bare_object_passes_through() {
        let reply = r#"  {"converted": "前向きな一言", "alternatives": ["a"]}  "#;

        assert_eq!(
            extract_json(reply).unwrap(),
            r#"{"converted": "前向きな一言", "alternatives": ["a"]}"#
        );
    }

    #[test]
    fn test_extract_json_embedded_in_prose() {
        let reply = "はい、変換しました: {\"converted\": \"ok\"} ご確認ください。";

        assert_eq!(extract_json(reply).unwrap(), r#"{"converted": "ok"}"#);
    }

    #[test]
    fn test_extract_json_plain_text_is_error() {
        assert!(extract_json("すみません、JSONでは返せません。").is_err());
    }

    #[test]
    fn test_parse_json_fenced_equals_bare() {
        let bare = r#"{"converted": "前向きな一言", "alternatives": ["a", "b"]}"#;
        let fenced = format!("```json\n{}\n```", bare);

        let from_bare: Value = parse_json(bare).unwrap();
        let from_fenced: Value = parse_json(&fenced).unwrap();
        assert_eq!(from_bare, from_fenced);
    }

    #[test]
    fn test_parse_json_tolerates_trailing_commas() {
        let reply = r#"{"converted": "ok", "alternatives": ["a",],}"#;

        let rewrite: Rewrite = parse_json(reply).unwrap();
        assert_eq!(rewrite.converted, "ok");
        assert_eq!(rewrite.alternatives, vec!["a"]);
    }

    #[test]
    fn test_parse_json_tolerates_string_concatenation() {
        let reply = r#"{"converted": "前半" + "後半"}"#;

        let rewrite: Rewrite = parse_json(reply).unwrap();
        assert_eq!(rewrite.converted, "前半後半");
    }

    #[test]
    fn test_parse_json_repairs_unquoted_keys() {
        let reply = r#"{converted: "ok", alternatives: ["a"]}"#;

        let rewrite: Rewrite = parse_json(reply).unwrap();
        assert_eq!(rewrite.converted, "ok");
    }

    #[test]
    fn test_parse_json_gibberish_is_error() {
        let result: Result<Rewrite, String> = parse_json("変換できませんでした、ごめんなさい");
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_json_schema_mismatch_is_error() {
        // Valid JSON, wrong shape: `converted` must be a string
        let result: Result<Rewrite, String> = parse_json(r#"{"converted": [1, 2]}"#);
        assert!(result.is_err());
    }
}
