//! Resource loading utilities
//!
//! Reads schema files from the local file system under configured [`Limits`].

use crate::error::{Error, Result};
use crate::limits::Limits;
use std::fs;
use std::path::Path;

/// Resource loader for schema files
#[derive(Debug, Clone, Default)]
pub struct Loader {
    /// Resource limits
    limits: Limits,
}

impl Loader {
    /// Create a new loader with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the limits
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Load a file as raw bytes
    pub fn load_bytes(&self, path: &Path) -> Result<Vec<u8>> {
        let content = fs::read(path).map_err(|e| Error::file_read(path, e))?;

        self.limits.check_file_size(content.len())?;

        Ok(content)
    }
}
