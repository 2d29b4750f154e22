//! Prompt template management module.
//!
//! Templates are stored in `templates/prompts/` (Jinja2 syntax) and embedded
//! into the binary at build time. The helpers below render the prompts the
//! conversion and image services send to their respective models.

pub mod engine;

pub use engine::{render_template, TemplateError};

use minijinja::Value;
use std::collections::HashMap;

/// Render the fixed system prompt for the text conversion model.
///
/// The prompt pins the editor persona, the tone constraints and the strict
/// JSON-only output format.
pub fn render_convert_system_prompt() -> Result<String, TemplateError> {
    render_template("convert/system.jinja", &HashMap::new())
}

/// Render the user message for the text conversion model.
///
/// # Arguments
/// * `style` - The requested tone label (e.g. "前向き")
/// * `text` - The raw input text to rewrite
pub fn render_convert_user_prompt(style: &str, text: &str) -> Result<String, TemplateError> {
    let mut ctx: HashMap<&str, Value> = HashMap::new();
    ctx.insert("style", Value::from(style));
    ctx.insert("text", Value::from(text));

    render_template("convert/user.jinja", &ctx)
}

/// Render the image-generation prompt for the share flow.
///
/// # Arguments
/// * `before_text` - The original self-deprecating text
/// * `after_text` - The positive rewrite
pub fn render_image_prompt(before_text: &str, after_text: &str) -> Result<String, TemplateError> {
    let mut ctx: HashMap<&str, Value> = HashMap::new();
    ctx.insert("before_text", Value::from(before_text));
    ctx.insert("after_text", Value::from(after_text));

    render_template("image/generate.jinja", &ctx)
}
