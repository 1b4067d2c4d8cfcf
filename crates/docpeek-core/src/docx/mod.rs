//! DOCX processing module.

mod extractor;
mod rels;

pub use extractor::DocxExtractor;
pub use rels::DEFAULT_MAIN_PART;

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use tracing::debug;

use crate::error::ExtractError;
use crate::models::extraction::ExtractionResult;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractError>;

/// Trait for document text extractors.
pub trait RawTextExtractor {
    /// Extract the raw text of a document from a seekable byte source.
    fn extract_raw_text<R: Read + Seek>(&self, reader: R) -> Result<ExtractionResult>;

    /// Open `path` read-only and extract its raw text.
    ///
    /// The file handle lives only for the duration of this call.
    fn extract_file(&self, path: &Path) -> Result<ExtractionResult> {
        let file = File::open(path).map_err(|e| ExtractError::from_open(path, e))?;
        debug!("Opened {}", path.display());
        self.extract_raw_text(BufReader::new(file))
    }
}
