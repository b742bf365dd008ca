//! Function mapping bound into every parsed template set.
//!
//! The cache treats the mapping as opaque: each entry is a MiniJinja value,
//! usually built with [`Value::from_function`], and is registered as a global
//! in every freshly constructed template environment.
//!
//! ```rust
//! use minijinja::Value;
//! use template_cache::FuncMap;
//!
//! let funcs = FuncMap::new()
//!     .with("shout", Value::from_function(|s: String| s.to_uppercase()));
//! assert!(funcs.get("shout").is_some());
//! ```

use std::collections::BTreeMap;

use minijinja::{Environment, Value};

#[derive(Debug, Clone, Default)]
pub struct FuncMap {
    funcs: BTreeMap<String, Value>,
}

impl FuncMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a function, replacing any previous entry with the same name.
    pub fn insert(&mut self, name: impl Into<String>, func: Value) -> &mut Self {
        self.funcs.insert(name.into(), func);
        self
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, func: Value) -> Self {
        self.insert(name, func);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.funcs.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.funcs.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.funcs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.funcs.is_empty()
    }

    /// Registers every function as a global of `env`.
    pub(crate) fn bind(&self, env: &mut Environment<'static>) {
        for (name, func) in &self.funcs {
            env.add_global(name.clone(), func.clone());
        }
    }
}
