//! Template set parsing, caching, and execution.
//!
//! - [`loader`]: resolves file and directory fragments to template sources
//! - [`CompiledTemplate`]: one parsed set, bound to a function mapping
//! - [`TemplateCache`]: `(group, id)` keyed cache of compiled sets
//!
//! ## Naming
//!
//! Every source is registered under its file name, extension included, and
//! [`TemplateCache::execute`] appends the configured extension to the name it
//! is given. With the default `.jinja` extension, executing `"home"` renders
//! the source loaded from `pages/home.jinja`, and sources in the same set
//! include each other as `{% include "nav.jinja" %}`.

mod cache;
mod compiled;
pub mod loader;

pub use cache::{CacheKey, TemplateCache};
pub use compiled::CompiledTemplate;
pub use loader::{collect_sources, glob_dir, resolve_file, TemplateSource};
