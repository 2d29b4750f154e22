//! Tolerant parsing of LLM completion text into typed JSON.
//!
//! Chat models are instructed to answer with bare JSON but routinely wrap it
//! in Markdown fences or produce small syntax defects. The parser extracts
//! the JSON payload and repairs the common defects before handing the result
//! to serde; anything still unparseable is an error for the caller.

mod parser;

pub use parser::{extract_json, parse_json};
