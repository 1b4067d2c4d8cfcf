//! Core library for docpeek.
//!
//! This crate provides:
//! - DOCX raw text extraction (package relationships, body text)
//! - Preview rendering with a fixed character budget
//! - Configuration for the document to preview

pub mod docx;
pub mod error;
pub mod models;
pub mod preview;

pub use docx::{DocxExtractor, RawTextExtractor};
pub use error::{DocpeekError, ExtractError, Result};
pub use models::config::{DEFAULT_DOCUMENT_PATH, PeekConfig};
pub use models::extraction::ExtractionResult;
pub use preview::{PREVIEW_CHARS, prefix, render_error, render_preview};
