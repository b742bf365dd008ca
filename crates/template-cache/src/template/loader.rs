//! Template source discovery and reading.
//!
//! Sources are named by their file name (extension included), so a set built
//! from `["layouts/main", "pages/home"]` with extension `.jinja` contains the
//! templates `main.jinja` and `home.jinja`. Templates in the same set refer to
//! each other by those names (`{% extends "main.jinja" %}`).

use std::path::{Path, PathBuf};

use crate::error::ParseError;

/// A template file selected for parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSource {
    /// Name the template is registered under (file name with extension).
    pub name: String,
    /// Absolute path to the template file.
    pub path: PathBuf,
}

impl TemplateSource {
    pub fn from_path(path: PathBuf) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { name, path }
    }

    /// Reads the source text from disk.
    pub fn read(&self) -> Result<String, ParseError> {
        std::fs::read_to_string(&self.path).map_err(|source| ParseError::Read {
            path: self.path.clone(),
            source,
        })
    }
}

/// Resolves a file fragment to `root/fragment<ext>`.
///
/// The extension is appended to the last component rather than replacing an
/// existing one, so `"emails/v1.2"` resolves to `emails/v1.2.jinja`.
pub fn resolve_file(root: &Path, fragment: &str, ext: &str) -> PathBuf {
    let mut path = root.join(fragment).into_os_string();
    path.push(ext);
    PathBuf::from(path)
}

/// Lists the files directly inside `root/dir` whose name ends with `ext`.
///
/// Results are sorted by path. A missing directory and a directory with no
/// matching files both fail with [`ParseError::NoMatch`].
pub fn glob_dir(root: &Path, dir: &str, ext: &str) -> Result<Vec<TemplateSource>, ParseError> {
    let dir_path = root.join(dir);
    let pattern = dir_path.join(format!("*{ext}"));

    let entries = match std::fs::read_dir(&dir_path) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ParseError::NoMatch { pattern });
        }
        Err(source) => {
            return Err(ParseError::Read {
                path: dir_path,
                source,
            })
        }
    };

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| ParseError::Read {
            path: dir_path.clone(),
            source,
        })?;
        let path = entry.path();
        if path.is_file() && path.to_string_lossy().ends_with(ext) {
            paths.push(path);
        }
    }

    if paths.is_empty() {
        return Err(ParseError::NoMatch { pattern });
    }

    paths.sort();
    Ok(paths.into_iter().map(TemplateSource::from_path).collect())
}

/// Collects every source of a template set in parse order: listed files
/// first, then each directory's matches.
pub fn collect_sources(
    root: &Path,
    files: &[&str],
    directories: &[&str],
    ext: &str,
) -> Result<Vec<TemplateSource>, ParseError> {
    let mut sources: Vec<TemplateSource> = files
        .iter()
        .map(|f| TemplateSource::from_path(resolve_file(root, f, ext)))
        .collect();

    for dir in directories {
        sources.extend(glob_dir(root, dir, ext)?);
    }
    Ok(sources)
}
