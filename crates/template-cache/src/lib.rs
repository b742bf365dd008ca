//! # Template Cache - Cached Template Sets for Request Rendering
//!
//! `template-cache` parses named sets of MiniJinja templates from disk, keeps
//! the compiled result per `(group, id)` key, and renders them into byte
//! buffers. In the local environment every parse re-reads the sources, so
//! template edits show up without a restart.
//!
//! ## Core Concepts
//!
//! - [`TemplateCache`]: the keyed cache and its four operations
//!   (`parse`, `execute`, `parse_and_execute`, `load`)
//! - [`CompiledTemplate`]: one parsed set, shared out as `Arc`
//! - [`RendererConfig`]: environment, templates root, and extension
//! - [`FuncMap`]: functions bound into every parsed set
//!
//! ## Quick Start
//!
//! ```rust
//! use serde::Serialize;
//! use template_cache::{FuncMap, RendererConfig, TemplateCache};
//!
//! #[derive(Serialize)]
//! struct Page {
//!     #[serde(rename = "Title")]
//!     title: String,
//! }
//!
//! let dir = tempfile::tempdir().unwrap();
//! std::fs::write(dir.path().join("index.jinja"), "<h1>{{ Title }}</h1>").unwrap();
//!
//! let cache = TemplateCache::new(RendererConfig::new(dir.path()), FuncMap::new());
//! let buf = cache
//!     .parse_and_execute("site", "home", "index", &["index"], &[], &Page { title: "Hi".into() })
//!     .unwrap();
//!
//! assert_eq!(buf, b"<h1>Hi</h1>");
//! ```

pub mod config;
mod error;
mod funcs;
pub mod template;

pub use config::{EnvReader, Environment, MockEnv, RealEnv, RendererConfig};
pub use error::{ConfigError, ParseError, RenderError};
pub use funcs::FuncMap;
pub use template::{CacheKey, CompiledTemplate, TemplateCache};
