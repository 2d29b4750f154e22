//! Template engine for prompt management using Jinja2 syntax.
//!
//! Prompt templates live in `templates/prompts/` and are embedded into the
//! binary at compile time, so rendering never depends on the working
//! directory of the deployed process.

use minijinja::{Environment, Value};
use std::collections::HashMap;
use std::sync::OnceLock;
use thiserror::Error;

/// Global template environment
static TEMPLATE_ENV: OnceLock<Environment<'static>> = OnceLock::new();

/// Templates compiled into the binary, keyed by their path relative to
/// `templates/prompts/`.
const EMBEDDED_TEMPLATES: &[(&str, &str)] = &[
    (
        "convert/system.jinja",
        include_str!("../../../templates/prompts/convert/system.jinja"),
    ),
    (
        "convert/user.jinja",
        include_str!("../../../templates/prompts/convert/user.jinja"),
    ),
    (
        "image/generate.jinja",
        include_str!("../../../templates/prompts/image/generate.jinja"),
    ),
];

/// Errors that can occur during template operations
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template '{0}' not found")]
    NotFound(String),

    #[error("Failed to render template: {0}")]
    RenderError(String),
}

/// Initialize the template environment with the embedded templates.
fn init_environment() -> Environment<'static> {
    let mut env = Environment::new();

    for &(name, content) in EMBEDDED_TEMPLATES {
        if let Err(e) = env.add_template(name, content) {
            tracing::warn!("Failed to load template {}: {}", name, e);
        } else {
            tracing::debug!("Loaded template: {}", name);
        }
    }

    env
}

/// Get the global template environment
fn get_environment() -> &'static Environment<'static> {
    TEMPLATE_ENV.get_or_init(init_environment)
}

/// Render a template with the given context.
///
/// # Arguments
/// * `template_name` - The template path relative to `templates/prompts/` (e.g., "convert/system.jinja")
/// * `ctx` - A HashMap of variable names to values
pub fn render_template(
    template_name: &str,
    ctx: &HashMap<&str, Value>,
) -> Result<String, TemplateError> {
    let env = get_environment();

    let template = env
        .get_template(template_name)
        .map_err(|_| TemplateError::NotFound(template_name.to_string()))?;

    let render_ctx = Value::from_iter(ctx.iter().map(|(k, v)| (*k, v.clone())));

    template
        .render(render_ctx)
        .map_err(|e| TemplateError::RenderError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_template_unknown_is_not_found() {
        let ctx = HashMap::new();
        let result = render_template("nonexistent.jinja", &ctx);
        assert!(matches!(result, Err(TemplateError::NotFound(_))));
    }

    #[test]
    fn test_render_template_substitutes_variables() {
        let mut ctx = HashMap::new();
        ctx.insert("style", Value::from("前向き"));
        ctx.insert("text", Value::from("食べて飲んでばっかりだわ"));

        let rendered = render_template("convert/user.jinja", &ctx).unwrap();
        assert!(rendered.contains("トーン: 前向き"));
        assert!(rendered.contains("食べて飲んでばっかりだわ"));
    }
}
