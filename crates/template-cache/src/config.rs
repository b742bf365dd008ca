//! Renderer configuration.
//!
//! [`RendererConfig`] carries the settings the cache reads: the deployment
//! [`Environment`] (which decides hot-reload), the templates root, and the
//! template file extension. It can be built in code, from YAML, or from the
//! process environment.
//!
//! ```rust
//! use template_cache::{Environment, RendererConfig};
//!
//! let config = RendererConfig::from_yaml(r#"
//! environment: local
//! templates_root: /srv/app/templates
//! extension: .html
//! "#).unwrap();
//!
//! assert_eq!(config.environment, Environment::Local);
//! assert!(config.is_hot_reload());
//! ```
//!
//! In a deployed process the same settings come from environment variables:
//!
//! ```rust,no_run
//! use template_cache::{RealEnv, RendererConfig};
//!
//! let config = RendererConfig::from_env(&RealEnv)?;
//! # Ok::<(), template_cache::ConfigError>(())
//! ```

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default template file extension.
pub const DEFAULT_EXTENSION: &str = ".jinja";

/// Environment variable holding the deployment environment.
pub const ENV_ENVIRONMENT: &str = "APP_ENVIRONMENT";
/// Environment variable holding the templates root directory.
pub const ENV_TEMPLATE_ROOT: &str = "TEMPLATE_ROOT";
/// Environment variable holding the template file extension.
pub const ENV_TEMPLATE_EXT: &str = "TEMPLATE_EXT";

/// Deployment environment of the running application.
///
/// Parsed case-insensitively, from YAML as well as from strings; `dev` and
/// `prod` are accepted as short forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Environment {
    /// Developer machine. Template sets are re-parsed on every request.
    Local,
    Test,
    Develop,
    Staging,
    #[default]
    Production,
}

impl Environment {
    /// Whether template sets are re-parsed on every request.
    pub fn is_hot_reload(self) -> bool {
        self == Environment::Local
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Test => "test",
            Environment::Develop => "develop",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Environment {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Environment> for String {
    fn from(env: Environment) -> Self {
        env.as_str().to_string()
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(Environment::Local),
            "test" => Ok(Environment::Test),
            "develop" | "dev" => Ok(Environment::Develop),
            "staging" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(ConfigError::InvalidEnvironment(s.to_string())),
        }
    }
}

/// Settings read by [`TemplateCache`](crate::TemplateCache).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RendererConfig {
    /// Deployment environment; `local` enables hot-reload.
    #[serde(default)]
    pub environment: Environment,

    /// Directory that file and directory fragments are resolved against.
    pub templates_root: PathBuf,

    /// Template file extension, including the leading dot.
    #[serde(default = "default_extension")]
    extension: String,

    /// HTML-escape interpolated values.
    #[serde(default = "default_true")]
    pub autoescape: bool,

    /// Treat access to undefined values as a render error.
    #[serde(default = "default_true")]
    pub strict_undefined: bool,
}

fn default_extension() -> String {
    DEFAULT_EXTENSION.to_string()
}

fn default_true() -> bool {
    true
}

impl RendererConfig {
    /// Creates a production config rooted at `templates_root`.
    pub fn new(templates_root: impl Into<PathBuf>) -> Self {
        Self {
            environment: Environment::default(),
            templates_root: templates_root.into(),
            extension: default_extension(),
            autoescape: true,
            strict_undefined: true,
        }
    }

    pub fn environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Sets the template extension. A leading dot is added if missing.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = normalize_extension(extension.into());
        self
    }

    pub fn autoescape(mut self, enabled: bool) -> Self {
        self.autoescape = enabled;
        self
    }

    pub fn strict_undefined(mut self, enabled: bool) -> Self {
        self.strict_undefined = enabled;
        self
    }

    /// Parses a config from YAML. Only `templates_root` is required.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: RendererConfig = serde_yaml::from_str(yaml)?;
        config.extension = normalize_extension(config.extension);
        Ok(config)
    }

    /// Builds a config from environment variables.
    ///
    /// Reads [`ENV_ENVIRONMENT`], [`ENV_TEMPLATE_ROOT`] (required) and
    /// [`ENV_TEMPLATE_EXT`].
    pub fn from_env(env: &dyn EnvReader) -> Result<Self, ConfigError> {
        let root = env
            .var(ENV_TEMPLATE_ROOT)
            .ok_or_else(|| ConfigError::MissingVar(ENV_TEMPLATE_ROOT.to_string()))?;

        let mut config = RendererConfig::new(root);
        if let Some(value) = env.var(ENV_ENVIRONMENT) {
            config.environment = value.parse()?;
        }
        if let Some(ext) = env.var(ENV_TEMPLATE_EXT) {
            config = config.with_extension(ext);
        }
        Ok(config)
    }

    /// Template file extension, including the leading dot.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn templates_root(&self) -> &Path {
        &self.templates_root
    }

    pub fn is_hot_reload(&self) -> bool {
        self.environment.is_hot_reload()
    }
}

fn normalize_extension(ext: String) -> String {
    if ext.is_empty() || ext.starts_with('.') {
        ext
    } else {
        format!(".{ext}")
    }
}

/// Abstraction over environment variables.
pub trait EnvReader: Send + Sync {
    /// Get an environment variable value.
    fn var(&self, name: &str) -> Option<String>;
}

/// Real environment variable reader.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealEnv;

impl EnvReader for RealEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// Mock environment variable reader for testing.
#[derive(Debug, Clone, Default)]
pub struct MockEnv {
    vars: HashMap<String, String>,
}

impl MockEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }
}

impl EnvReader for MockEnv {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RendererConfig::new("/srv/templates");
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.extension(), ".jinja");
        assert!(config.autoescape);
        assert!(config.strict_undefined);
        assert!(!config.is_hot_reload());
    }

    #[test]
    fn test_only_local_is_hot_reload() {
        assert!(Environment::Local.is_hot_reload());
        for env in [
            Environment::Test,
            Environment::Develop,
            Environment::Staging,
            Environment::Production,
        ] {
            assert!(!env.is_hot_reload(), "{env} should cache");
        }
    }

    #[test]
    fn test_environment_from_str() {
        assert_eq!("LOCAL".parse::<Environment>().unwrap(), Environment::Local);
        assert_eq!("prod".parse::<Environment>().unwrap(), Environment::Production);
        assert_eq!(" dev ".parse::<Environment>().unwrap(), Environment::Develop);
        assert!(matches!(
            "qa".parse::<Environment>(),
            Err(ConfigError::InvalidEnvironment(v)) if v == "qa"
        ));
    }

    #[test]
    fn test_extension_normalized() {
        let config = RendererConfig::new("/t").with_extension("html");
        assert_eq!(config.extension(), ".html");
        let config = RendererConfig::new("/t").with_extension(".gohtml");
        assert_eq!(config.extension(), ".gohtml");
    }

    #[test]
    fn test_from_yaml_defaults() {
        let config = RendererConfig::from_yaml("templates_root: /srv/t\n").unwrap();
        assert_eq!(config, RendererConfig::new("/srv/t"));
    }

    #[test]
    fn test_from_yaml_full() {
        let config = RendererConfig::from_yaml(
            r#"
environment: prod
templates_root: /srv/t
extension: html
autoescape: false
strict_undefined: false
"#,
        )
        .unwrap();
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.extension(), ".html");
        assert!(!config.autoescape);
        assert!(!config.strict_undefined);
    }

    #[test]
    fn test_from_yaml_environment_case_insensitive() {
        for (value, expected) in [
            ("Local", Environment::Local),
            ("PROD", Environment::Production),
            ("Dev", Environment::Develop),
            ("staging", Environment::Staging),
        ] {
            let yaml = format!("environment: {value}\ntemplates_root: /t\n");
            let config = RendererConfig::from_yaml(&yaml).unwrap();
            assert_eq!(config.environment, expected, "{value}");
        }
    }

    #[test]
    fn test_from_yaml_and_env_agree() {
        let env = MockEnv::new()
            .with_var(ENV_ENVIRONMENT, "Local")
            .with_var(ENV_TEMPLATE_ROOT, "/t");
        let from_env = RendererConfig::from_env(&env).unwrap();
        let from_yaml =
            RendererConfig::from_yaml("environment: Local\ntemplates_root: /t\n").unwrap();
        assert_eq!(from_env, from_yaml);
    }

    #[test]
    fn test_from_yaml_unknown_environment() {
        let result = RendererConfig::from_yaml("environment: moon\ntemplates_root: /t\n");
        assert!(matches!(result, Err(ConfigError::Yaml(_))));
    }

    #[test]
    fn test_environment_serializes_lowercase() {
        let yaml = serde_yaml::to_string(&RendererConfig::new("/t")).unwrap();
        assert!(yaml.contains("environment: production"));
    }

    #[test]
    fn test_from_yaml_requires_root() {
        let result = RendererConfig::from_yaml("environment: local\n");
        assert!(matches!(result, Err(ConfigError::Yaml(_))));
    }

    #[test]
    fn test_from_env() {
        let env = MockEnv::new()
            .with_var(ENV_ENVIRONMENT, "local")
            .with_var(ENV_TEMPLATE_ROOT, "/srv/t")
            .with_var(ENV_TEMPLATE_EXT, "gohtml");
        let config = RendererConfig::from_env(&env).unwrap();
        assert!(config.is_hot_reload());
        assert_eq!(config.templates_root(), Path::new("/srv/t"));
        assert_eq!(config.extension(), ".gohtml");
    }

    #[test]
    fn test_from_env_missing_root() {
        let env = MockEnv::new().with_var(ENV_ENVIRONMENT, "local");
        let result = RendererConfig::from_env(&env);
        assert!(matches!(result, Err(ConfigError::MissingVar(v)) if v == ENV_TEMPLATE_ROOT));
    }

    #[test]
    fn test_from_env_invalid_environment() {
        let env = MockEnv::new()
            .with_var(ENV_ENVIRONMENT, "moon")
            .with_var(ENV_TEMPLATE_ROOT, "/srv/t");
        assert!(matches!(
            RendererConfig::from_env(&env),
            Err(ConfigError::InvalidEnvironment(_))
        ));
    }
}
