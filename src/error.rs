//! Error types for xt
//!
//! Every fatal condition raised while resolving includes, parsing schema
//! documents or building the element graph is a variant of [`Error`].
//! Non-fatal conditions (duplicate files, duplicate elements, unresolved
//! references) are never errors; they are reported through
//! [`crate::events::EventSink`] instead.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using xt Error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for xt operations
#[derive(Error, Debug)]
pub enum Error {
    /// Entry or included schema file could not be opened or read
    #[error("failed to read file '{}': {source}", path.display())]
    FileRead {
        /// Path of the file that failed to load
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Schema document is not well-formed XML
    #[error("malformed XML: {0}")]
    MalformedXml(#[from] ParseError),

    /// A structural query over a parsed document could not be evaluated
    #[error("query error: {0}")]
    Query(String),

    /// A schema location that cannot be loaded from the local file system
    #[error("unsupported schema location: {0}")]
    UnsupportedLocation(String),

    /// Limit exceeded error
    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    /// Element graph invariant violated
    #[error("graph error: {0}")]
    Graph(String),
}

impl Error {
    /// Create a file read error for the given path
    pub fn file_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::FileRead {
            path: path.into(),
            source,
        }
    }

    /// Attach the originating file to a malformed XML error
    pub fn with_location(self, location: impl Into<String>) -> Self {
        match self {
            Error::MalformedXml(parse) => Error::MalformedXml(parse.with_location(location)),
            other => other,
        }
    }
}

/// XML parsing error with context
#[derive(Debug, Clone)]
pub struct ParseError {
    /// Error message
    pub message: String,
    /// File the document was loaded from
    pub location: Option<String>,
    /// Byte offset into the document
    pub position: Option<u64>,
}

impl ParseError {
    /// Create a new parse error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            location: None,
            position: None,
        }
    }

    /// Set the location
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Set the byte position
    pub fn with_position(mut self, position: u64) -> Self {
        self.position = Some(position);
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;

        if let Some(position) = self.position {
            write!(f, " (at byte {})", position)?;
        }

        if let Some(ref loc) = self.location {
            write!(f, "\n\nLocation: {}", loc)?;
        }

        Ok(())
    }
}

impl std::error::Error for ParseError {}
