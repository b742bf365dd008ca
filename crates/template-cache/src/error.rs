//! Error types for template parsing, lookup, and execution.
//!
//! [`RenderError`] is returned by every [`TemplateCache`](crate::TemplateCache)
//! operation. Parse failures keep their own type, [`ParseError`], so callers
//! can tell a broken template source apart from a missing cache entry.

use std::path::PathBuf;

use thiserror::Error;

use crate::template::CacheKey;

/// Failure while loading or compiling the sources of a template set.
#[derive(Debug, Error)]
pub enum ParseError {
    /// A template file could not be read.
    #[error("failed to read template {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A directory pattern matched no template files.
    #[error("pattern matches no files: {}", pattern.display())]
    NoMatch { pattern: PathBuf },

    /// A template body failed to compile.
    #[error("syntax error in template {name}: {source}")]
    Syntax {
        name: String,
        #[source]
        source: minijinja::Error,
    },
}

/// Error type for template cache operations.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Loading or compiling the template set failed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// No template set has been parsed for this key.
    #[error("uncached template set requested: {0}")]
    NotFound(CacheKey),

    /// Rendering failed, or the named template is not part of the set.
    #[error("failed to execute template {name}: {source}")]
    Execution {
        name: String,
        #[source]
        source: minijinja::Error,
    },
}

impl RenderError {
    /// Returns `true` if this error was caused by a missing cache entry.
    pub fn is_not_found(&self) -> bool {
        matches!(self, RenderError::NotFound(_))
    }
}

/// Error type for building a [`RendererConfig`](crate::RendererConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(String),

    #[error("unknown environment: {0}")]
    InvalidEnvironment(String),

    #[error("invalid config: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = RenderError::NotFound(CacheKey::new("site", "home"));
        assert_eq!(err.to_string(), "uncached template set requested: site:home");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_parse_error_is_transparent() {
        let err: RenderError = ParseError::NoMatch {
            pattern: PathBuf::from("/t/partials/*.jinja"),
        }
        .into();
        assert_eq!(err.to_string(), "pattern matches no files: /t/partials/*.jinja");
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_read_error_keeps_source() {
        use std::error::Error as _;

        let err = ParseError::Read {
            path: PathBuf::from("/t/index.jinja"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert!(err.to_string().contains("/t/index.jinja"));
        assert!(err.source().is_some());
    }
}
