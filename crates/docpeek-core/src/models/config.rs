//! Configuration for the document preview.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{DocpeekError, Result};

/// Document read when neither an argument nor a config file names one.
pub const DEFAULT_DOCUMENT_PATH: &str = "/srv/docpeek/SDET_Tech_Interview_Question_Paper_Set_A.docx";

/// Main configuration for docpeek.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PeekConfig {
    /// Path of the DOCX document to preview.
    pub document: PathBuf,
}

impl Default for PeekConfig {
    fn default() -> Self {
        Self {
            document: PathBuf::from(DEFAULT_DOCUMENT_PATH),
        }
    }
}

impl PeekConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            DocpeekError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            DocpeekError::Config(format!("failed to parse {}: {}", path.display(), e))
        })
    }

    /// Replace the document path when one was given explicitly.
    pub fn with_document(mut self, document: Option<PathBuf>) -> Self {
        if let Some(document) = document {
            self.document = document;
        }
        self
    }
}
