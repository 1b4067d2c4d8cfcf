//! Error types for the docpeek-core library.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Main error type for the docpeek library.
#[derive(Error, Debug)]
pub enum DocpeekError {
    /// Document extraction error.
    #[error(transparent)]
    Extract(#[from] ExtractError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised while reading text out of a document.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// The document does not exist.
    #[error("No such file or directory: '{}'", .path.display())]
    NotFound { path: PathBuf },

    /// The document exists but cannot be opened for reading.
    #[error("Permission denied: '{}'", .path.display())]
    PermissionDenied { path: PathBuf },

    /// The file is not a readable DOCX container.
    #[error("malformed document: {0}")]
    MalformedDocument(String),

    /// Any other I/O failure.
    #[error("extraction failed: {0}")]
    Unknown(#[from] io::Error),
}

impl ExtractError {
    /// Classify an I/O error raised while opening `path`.
    pub fn from_open(path: &Path, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Self::NotFound {
                path: path.to_path_buf(),
            },
            io::ErrorKind::PermissionDenied => Self::PermissionDenied {
                path: path.to_path_buf(),
            },
            _ => Self::Unknown(err),
        }
    }
}

impl From<zip::result::ZipError> for ExtractError {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(e) => Self::Unknown(e),
            other => Self::MalformedDocument(other.to_string()),
        }
    }
}

impl From<quick_xml::Error> for ExtractError {
    fn from(err: quick_xml::Error) -> Self {
        Self::MalformedDocument(format!("invalid XML: {}", err))
    }
}

impl From<quick_xml::escape::EscapeError> for ExtractError {
    fn from(err: quick_xml::escape::EscapeError) -> Self {
        Self::MalformedDocument(format!("invalid XML escape: {}", err))
    }
}

/// Result type for the docpeek library.
pub type Result<T> = std::result::Result<T, DocpeekError>;
