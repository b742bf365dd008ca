//! Keyed cache of compiled template sets.
//!
//! [`TemplateCache`] maps a `(group, id)` [`CacheKey`] to a
//! [`CompiledTemplate`]. Sets are parsed lazily on the first
//! [`parse`](TemplateCache::parse) for a key and reused afterwards.
//!
//! # Hot Reloading (Local)
//!
//! When the configured environment is [`Environment::Local`], every `parse`
//! re-reads and re-compiles the set, so edits to template files show up on the
//! next request without a restart. In every other environment a parsed set is
//! kept for the lifetime of the cache.
//!
//! # Concurrency
//!
//! The cache is `Send + Sync` and is meant to be shared by reference (or in an
//! `Arc`) between request handlers. Lookups hand out an
//! `Arc<CompiledTemplate>`, so rendering never holds a map lock and a
//! concurrent re-parse of the same key does not disturb a render in progress.
//! Concurrent re-parses of one key resolve as last store wins.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use dashmap::DashMap;
use serde::Serialize;
use tracing::{debug, trace};

use super::compiled::CompiledTemplate;
use super::loader::collect_sources;
use crate::config::{Environment, RendererConfig};
use crate::error::RenderError;
use crate::funcs::FuncMap;

/// Composite cache key: a caller-defined group and an id within it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub group: String,
    pub id: String,
}

impl CacheKey {
    pub fn new(group: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            id: id.into(),
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group, self.id)
    }
}

/// Caches parsed template sets and renders them by name.
///
/// # Example
///
/// ```rust,ignore
/// use serde_json::json;
/// use template_cache::{FuncMap, RendererConfig, TemplateCache};
///
/// let cache = TemplateCache::new(RendererConfig::new("./templates"), FuncMap::new());
///
/// // Parses templates/layouts/main.jinja, templates/pages/home.jinja and
/// // every templates/partials/*.jinja, then renders home.jinja.
/// let buf = cache.parse_and_execute(
///     "page",
///     "home",
///     "home",
///     &["layouts/main", "pages/home"],
///     &["partials"],
///     &json!({ "Title": "Welcome" }),
/// )?;
/// ```
pub struct TemplateCache {
    cache: DashMap<CacheKey, Arc<CompiledTemplate>>,
    funcs: FuncMap,
    config: RendererConfig,
}

impl TemplateCache {
    /// Creates an empty cache.
    pub fn new(config: RendererConfig, funcs: FuncMap) -> Self {
        Self {
            cache: DashMap::new(),
            funcs,
            config,
        }
    }

    /// Parses a template set and stores it under `(group, id)`.
    ///
    /// Each entry of `files` is resolved to `<root>/<file><ext>`. Each entry
    /// of `directories` contributes every `<root>/<dir>/*<ext>` file, in
    /// lexical order. Templates are registered under their file names.
    ///
    /// Does nothing if the key is already cached, unless the environment is
    /// local. On failure the previous entry, if any, is kept.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Parse`] if a file cannot be read, a directory
    /// matches no files, or a template fails to compile.
    pub fn parse(
        &self,
        group: &str,
        id: &str,
        name: &str,
        files: &[&str],
        directories: &[&str],
    ) -> Result<(), RenderError> {
        let key = CacheKey::new(group, id);
        let hot_reload = self.is_hot_reload();

        if !hot_reload && self.cache.contains_key(&key) {
            trace!(key = %key, "template set cached, skipping parse");
            return Ok(());
        }

        let ext = self.extension();
        let sources = collect_sources(self.templates_path(), files, directories, ext)?;

        let mut parsed = CompiledTemplate::new(format!("{name}{ext}"), &self.funcs, &self.config);
        for source in &sources {
            parsed.add_file(source)?;
        }

        debug!(
            key = %key,
            name = parsed.name(),
            sources = sources.len(),
            hot_reload,
            "parsed template set"
        );
        self.cache.insert(key, Arc::new(parsed));
        Ok(())
    }

    /// Renders the template `name` of the set cached under `(group, id)`.
    ///
    /// `data` may be any serializable value; template fields are resolved by
    /// name at render time.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::NotFound`] if the key was never parsed, and
    /// [`RenderError::Execution`] if `name` is not in the set or rendering
    /// fails.
    pub fn execute<T: Serialize + ?Sized>(
        &self,
        group: &str,
        id: &str,
        name: &str,
        data: &T,
    ) -> Result<Vec<u8>, RenderError> {
        let tmpl = self.load(group, id)?;
        let template_name = format!("{name}{}", self.extension());

        trace!(group, id, template = %template_name, "executing template");
        let mut buf = Vec::new();
        tmpl.render_to(&template_name, data, &mut buf)?;
        Ok(buf)
    }

    /// [`parse`](Self::parse) followed by [`execute`](Self::execute).
    pub fn parse_and_execute<T: Serialize + ?Sized>(
        &self,
        group: &str,
        id: &str,
        name: &str,
        files: &[&str],
        directories: &[&str],
        data: &T,
    ) -> Result<Vec<u8>, RenderError> {
        self.parse(group, id, name, files, directories)?;
        self.execute(group, id, name, data)
    }

    /// Returns the compiled set cached under `(group, id)`.
    pub fn load(&self, group: &str, id: &str) -> Result<Arc<CompiledTemplate>, RenderError> {
        let key = CacheKey::new(group, id);
        match self.cache.get(&key) {
            Some(entry) => Ok(Arc::clone(entry.value())),
            None => Err(RenderError::NotFound(key)),
        }
    }

    /// Root directory template fragments are resolved against.
    pub fn templates_path(&self) -> &Path {
        self.config.templates_root()
    }

    pub fn extension(&self) -> &str {
        self.config.extension()
    }

    pub fn environment(&self) -> Environment {
        self.config.environment
    }

    pub fn is_hot_reload(&self) -> bool {
        self.config.is_hot_reload()
    }

    pub fn contains(&self, group: &str, id: &str) -> bool {
        self.cache.contains_key(&CacheKey::new(group, id))
    }

    /// Number of cached template sets.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

impl fmt::Debug for TemplateCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplateCache")
            .field("entries", &self.cache.len())
            .field("funcs", &self.funcs.len())
            .field("config", &self.config)
            .finish()
    }
}
