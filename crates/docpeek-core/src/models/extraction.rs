//! Extraction result returned by document extractors.

/// Plain text pulled out of a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionResult {
    /// Document text with formatting, images and markup stripped.
    pub text: String,

    /// Number of paragraphs encountered in the body.
    pub paragraphs: usize,

    /// Name of the package part the text was read from.
    pub part: String,
}

impl ExtractionResult {
    /// Number of characters in the extracted text.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}
