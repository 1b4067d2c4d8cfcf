//! Preview rendering: a bounded prefix of the document text between fixed
//! header and footer lines.

use std::fmt::Display;

/// Number of characters shown in a preview.
pub const PREVIEW_CHARS: usize = 6000;

const HEADER: &str = "=== DOCUMENT CONTENT (first 6000 chars) ===";
const FOOTER: &str = "=== END ===";

/// The first `limit` characters of `text`, or all of it when shorter.
pub fn prefix(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

/// Render the success output for `text`.
pub fn render_preview(text: &str) -> String {
    let shown = prefix(text, PREVIEW_CHARS);
    format!("{}\n{}\n\n{}\n", HEADER, shown, FOOTER)
}

/// Render the failure output for `err`.
pub fn render_error(err: &dyn Display) -> String {
    format!("Error: {}\n", err)
}
