//! Template rendering for bogie.
//! Executes template text against a [`Context`] with MiniJinja in strict mode.
use crate::context::Context;
use crate::error::{Error, Result};
use crate::functions;
use minijinja::syntax::SyntaxConfig;
use minijinja::{Environment, UndefinedBehavior};

/// Default variable delimiters
pub const DEFAULT_LEFT_DELIM: &str = "{{";
pub const DEFAULT_RIGHT_DELIM: &str = "}}";

/// Output of a single template execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderResult {
    /// True when the content is empty after trimming whitespace
    pub is_empty: bool,
    pub content: String,
}

impl RenderResult {
    pub fn new(content: String) -> Self {
        Self { is_empty: content.trim().is_empty(), content }
    }
}

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Renders `template` against `context`.
    ///
    /// # Errors
    /// * `Error::TemplateError` on parse failures, undefined context keys
    ///   and failing template functions
    fn render(&self, template: &str, context: &Context) -> Result<RenderResult>;
}

/// MiniJinja-based template rendering engine.
pub struct MiniJinjaRenderer {
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    /// Creates a renderer with the default `{{ }}` delimiters.
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_keep_trailing_newline(true);
        functions::register(&mut env);
        Self { env }
    }

    /// Creates a renderer using `left`/`right` as variable delimiters.
    ///
    /// # Errors
    /// * `Error::ConfigError` if the delimiters are empty or clash with the
    ///   block and comment delimiters
    pub fn with_delimiters(left: &str, right: &str) -> Result<Self> {
        let mut renderer = Self::new();
        if left == DEFAULT_LEFT_DELIM && right == DEFAULT_RIGHT_DELIM {
            return Ok(renderer);
        }

        let syntax = SyntaxConfig::builder()
            .block_delimiters("{%", "%}")
            .variable_delimiters(left.to_string(), right.to_string())
            .comment_delimiters("{#", "#}")
            .build()
            .map_err(|e| {
                Error::ConfigError(format!("invalid delimiters '{left}' '{right}': {e}"))
            })?;
        renderer.env.set_syntax(syntax);
        Ok(renderer)
    }
}

impl Default for MiniJinjaRenderer {
    fn default() -> Self {
        MiniJinjaRenderer::new()
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    fn render(&self, template: &str, context: &Context) -> Result<RenderResult> {
        let content = self.env.render_str(template, context)?;
        Ok(RenderResult::new(content))
    }
}
