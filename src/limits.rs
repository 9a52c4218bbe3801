//! Limits and constraints for schema processing
//!
//! These bound the work done for a single run so that a hostile or broken
//! schema set (huge files, runaway nesting, endless include chains) fails
//! with an error instead of exhausting memory or the stack.

use crate::error::{Error, Result};

/// Resource limits for loading and parsing a schema set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum schema file size in bytes
    pub max_file_size: usize,

    /// Maximum element nesting depth inside one document
    pub max_xml_depth: usize,

    /// Maximum length of an include chain starting at the entry file
    pub max_include_depth: usize,

    /// Maximum number of distinct schema files
    pub max_files: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_file_size: 100 * 1024 * 1024, // 100 MB
            max_xml_depth: 1000,
            max_include_depth: 100,
            max_files: 10000,
        }
    }
}

impl Limits {
    /// Create a new Limits with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Create strict limits (more restrictive)
    pub fn strict() -> Self {
        Self {
            max_file_size: 10 * 1024 * 1024, // 10 MB
            max_xml_depth: 100,
            max_include_depth: 20,
            max_files: 500,
        }
    }

    /// Create permissive limits (less restrictive, use with caution)
    pub fn permissive() -> Self {
        Self {
            max_file_size: 1024 * 1024 * 1024, // 1 GB
            max_xml_depth: 10000,
            max_include_depth: 1000,
            max_files: 1_000_000,
        }
    }

    /// Look up a preset by name: `default`, `strict` or `permissive`
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "default" => Some(Self::default()),
            "strict" => Some(Self::strict()),
            "permissive" => Some(Self::permissive()),
            _ => None,
        }
    }

    /// Check if a file size is within limits
    pub fn check_file_size(&self, size: usize) -> Result<()> {
        if size > self.max_file_size {
            Err(Error::LimitExceeded(format!(
                "file size {} bytes exceeds maximum {} bytes",
                size, self.max_file_size
            )))
        } else {
            Ok(())
        }
    }

    /// Check if XML nesting depth is within limits
    pub fn check_xml_depth(&self, depth: usize) -> Result<()> {
        if depth > self.max_xml_depth {
            Err(Error::LimitExceeded(format!(
                "XML depth {} exceeds maximum {}",
                depth, self.max_xml_depth
            )))
        } else {
            Ok(())
        }
    }

    /// Check if an include chain is within limits
    pub fn check_include_depth(&self, depth: usize) -> Result<()> {
        if depth > self.max_include_depth {
            Err(Error::LimitExceeded(format!(
                "include depth {} exceeds maximum {}",
                depth, self.max_include_depth
            )))
        } else {
            Ok(())
        }
    }

    /// Check if the number of loaded files is within limits
    pub fn check_files(&self, count: usize) -> Result<()> {
        if count > self.max_files {
            Err(Error::LimitExceeded(format!(
                "file count {} exceeds maximum {}",
                count, self.max_files
            )))
        } else {
            Ok(())
        }
    }
}
