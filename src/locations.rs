//! Resource location resolution
//!
//! Schema files are identified by absolute, lexically normalized paths.
//! `schemaLocation` values are resolved against the directory of the file
//! that contains the `include`, never against the entry file.

use crate::error::{Error, Result};
use std::path::{Component, Path, PathBuf};
use url::Url;

/// Resource location - a file path or a URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// File system path (possibly relative)
    Path(PathBuf),
    /// URL (file, http, https, ...)
    Url(Url),
}

impl Location {
    /// Classify a `schemaLocation` value
    pub fn parse(s: &str) -> Self {
        // A single-letter scheme is a Windows drive, not a URL
        match Url::parse(s) {
            Ok(url) if url.scheme().len() > 1 => Location::Url(url),
            _ => Location::Path(PathBuf::from(s)),
        }
    }

    /// Resolve this location against a base directory into an absolute file path
    pub fn resolve(&self, base_dir: &Path) -> Result<PathBuf> {
        match self {
            Location::Path(path) => Ok(normalize(&base_dir.join(path))),
            Location::Url(url) if url.scheme() == "file" => url
                .to_file_path()
                .map(|path| normalize(&path))
                .map_err(|_| Error::UnsupportedLocation(url.to_string())),
            Location::Url(url) => Err(Error::UnsupportedLocation(url.to_string())),
        }
    }
}

/// Resolve an included `schemaLocation` relative to the including file's directory
pub fn resolve_include(including_file: &Path, schema_location: &str) -> Result<PathBuf> {
    let base_dir = including_file.parent().unwrap_or_else(|| Path::new(""));
    Location::parse(schema_location).resolve(base_dir)
}

/// Make a path absolute against the current working directory and normalize it
pub fn absolute_path(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(normalize(path));
    }

    let cwd = std::env::current_dir().map_err(|e| Error::file_read(path, e))?;
    Ok(normalize(&cwd.join(path)))
}

/// Lexically remove `.` and `..` components without touching the file system
pub fn normalize(path: &Path) -> PathBuf {
    let mut components: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match components.last() {
                Some(Component::Normal(_)) => {
                    components.pop();
                }
                // `..` at the root stays at the root
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => components.push(component),
            },
            other => components.push(other),
        }
    }

    if components.is_empty() {
        return PathBuf::from(".");
    }

    components.iter().collect()
}
