//! Error types for pomedit-core

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using pomedit-core Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading, editing or saving a manifest
#[derive(Debug, Error)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Manifest file not found
    #[error("Manifest not found: {0}")]
    FileNotFound(PathBuf),

    /// Malformed XML
    #[error("Malformed XML at byte {position}: {message}")]
    Xml {
        /// Byte offset reported by the reader
        position: u64,
        /// Reader message
        message: String,
    },

    /// Well-formed XML that is not a project manifest
    #[error("Invalid manifest {0}: {1}")]
    InvalidFormat(PathBuf, String),

    /// Existing manifest could not be moved to its backup path
    #[error("Failed to back up {from} to {to}: {source}")]
    Backup {
        /// Manifest path
        from: PathBuf,
        /// Backup path
        to: PathBuf,
        /// Underlying rename failure
        source: std::io::Error,
    },

    /// Invalid combination of parameters
    #[error("{0}")]
    Usage(String),

    /// Inline property entry without a `key=value` shape
    #[error("Invalid property entry '{0}': expected key=value")]
    InvalidProperty(String),

    /// Property name that cannot be written as an XML element
    #[error("Property name '{0}' is not a valid XML element name")]
    InvalidPropertyName(String),

    /// Properties text with a malformed `\uXXXX` escape
    #[error("Malformed \\uxxxx encoding in '{0}'")]
    MalformedProperties(String),

    /// Property file encoding that cannot be decoded
    #[error("Unsupported properties encoding: {0}")]
    UnsupportedEncoding(String),
}

/// Coarse classification of [`Error`] for callers that branch on failure type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input manifest missing
    NotFound,
    /// Malformed manifest
    Parse,
    /// Read, write or rename failure
    Io,
    /// Required-parameter combination violated
    Usage,
}

impl Error {
    /// Create a usage error
    pub fn usage(msg: impl Into<String>) -> Self {
        Self::Usage(msg.into())
    }

    pub(crate) fn xml(position: u64, message: impl std::fmt::Display) -> Self {
        Self::Xml {
            position,
            message: message.to_string(),
        }
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::FileNotFound(_) => ErrorKind::NotFound,
            Error::Xml { .. } | Error::InvalidFormat(..) => ErrorKind::Parse,
            Error::Io(_) | Error::Backup { .. } => ErrorKind::Io,
            Error::Usage(_)
            | Error::InvalidProperty(_)
            | Error::InvalidPropertyName(_)
            | Error::MalformedProperties(_)
            | Error::UnsupportedEncoding(_) => ErrorKind::Usage,
        }
    }
}
