//! Compiled template sets.
//!
//! A [`CompiledTemplate`] wraps a MiniJinja [`Environment`] holding every
//! source of one template set, bound to the cache's [`FuncMap`]. Once built it
//! is never mutated; a re-parse builds a new one.

use minijinja::{AutoEscape, Environment, UndefinedBehavior};
use serde::Serialize;

use super::loader::TemplateSource;
use crate::config::RendererConfig;
use crate::error::{ParseError, RenderError};
use crate::funcs::FuncMap;

/// A parsed template set ready for repeated execution.
pub struct CompiledTemplate {
    name: String,
    env: Environment<'static>,
    templates: Vec<String>,
}

impl CompiledTemplate {
    /// Creates an empty set with the given root name, bound to `funcs`.
    pub fn new(name: impl Into<String>, funcs: &FuncMap, config: &RendererConfig) -> Self {
        let mut env = Environment::new();
        if config.strict_undefined {
            env.set_undefined_behavior(UndefinedBehavior::Strict);
        }
        if config.autoescape {
            env.set_auto_escape_callback(|_| AutoEscape::Html);
        } else {
            env.set_auto_escape_callback(|_| AutoEscape::None);
        }
        funcs.bind(&mut env);

        Self {
            name: name.into(),
            env,
            templates: Vec::new(),
        }
    }

    /// Compiles `source` and registers it as `name`.
    ///
    /// A template already registered under `name` is replaced.
    pub fn add_source(&mut self, name: &str, source: String) -> Result<(), ParseError> {
        self.env
            .add_template_owned(name.to_string(), source)
            .map_err(|source| ParseError::Syntax {
                name: name.to_string(),
                source,
            })?;
        if !self.templates.iter().any(|t| t == name) {
            self.templates.push(name.to_string());
        }
        Ok(())
    }

    /// Reads and compiles a template file.
    pub fn add_file(&mut self, file: &TemplateSource) -> Result<(), ParseError> {
        let content = file.read()?;
        self.add_source(&file.name, content)
    }

    /// Root template name this set was parsed for.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Names of every template in the set, in registration order.
    pub fn template_names(&self) -> &[String] {
        &self.templates
    }

    pub fn has_template(&self, name: &str) -> bool {
        self.templates.iter().any(|t| t == name)
    }

    /// Renders the template registered as `name`, appending to `out`.
    pub fn render_to<T: Serialize + ?Sized>(
        &self,
        name: &str,
        data: &T,
        out: &mut Vec<u8>,
    ) -> Result<(), RenderError> {
        let execution = |source: minijinja::Error| RenderError::Execution {
            name: name.to_string(),
            source,
        };
        let tmpl = self.env.get_template(name).map_err(execution)?;
        tmpl.render_to_write(data, &mut *out).map_err(execution)?;
        Ok(())
    }
}

impl std::fmt::Debug for CompiledTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompiledTemplate")
            .field("name", &self.name)
            .field("templates", &self.templates)
            .finish_non_exhaustive()
    }
}
