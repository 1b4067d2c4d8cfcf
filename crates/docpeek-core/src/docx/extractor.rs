//! DOCX raw text extraction using zip and quick-xml.

use std::io::{BufRead, BufReader, Read, Seek};

use quick_xml::events::Event;
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::reader::NsReader;
use tracing::{debug, trace};
use zip::ZipArchive;
use zip::result::ZipError;

use super::rels::main_document_part;
use super::{RawTextExtractor, Result};
use crate::error::ExtractError;
use crate::models::extraction::ExtractionResult;

const PARAGRAPH_END: &str = "\n\n";

/// Raw text extractor for Office Open XML word-processing documents.
///
/// Only the main document part is read. Formatting, images and structure
/// are dropped; each paragraph ends with a blank line.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocxExtractor;

impl DocxExtractor {
    /// Create a new DOCX extractor.
    pub fn new() -> Self {
        Self
    }
}

impl RawTextExtractor for DocxExtractor {
    fn extract_raw_text<R: Read + Seek>(&self, reader: R) -> Result<ExtractionResult> {
        let mut archive = ZipArchive::new(reader)?;
        debug!("Opened package with {} entries", archive.len());

        let part = main_document_part(&mut archive)?;
        let document = match archive.by_name(&part) {
            Ok(document) => document,
            Err(ZipError::FileNotFound) => {
                return Err(ExtractError::MalformedDocument(format!(
                    "missing main document part {}",
                    part
                )));
            }
            Err(e) => return Err(e.into()),
        };

        let body = read_body_text(BufReader::new(document))?;

        debug!(
            "Extracted {} paragraphs, {} chars from {}",
            body.paragraphs,
            body.text.chars().count(),
            part
        );

        Ok(ExtractionResult {
            text: body.text,
            paragraphs: body.paragraphs,
            part,
        })
    }
}

struct BodyText {
    text: String,
    paragraphs: usize,
}

const WORDML_NAMESPACES: &[&[u8]] = &[
    b"http://schemas.openxmlformats.org/wordprocessingml/2006/main",
    b"http://purl.oclc.org/ooxml/wordprocessingml/main",
];
const MARKUP_COMPATIBILITY_NAMESPACE: &[u8] =
    b"http://schemas.openxmlformats.org/markup-compatibility/2006";

/// Body elements that affect the extracted text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyElement {
    Paragraph,
    Run,
    Text,
    Tab,
    NoBreakHyphen,
    SoftHyphen,
    Choice,
    Other,
}

impl BodyElement {
    fn classify(ns: &ResolveResult, local_name: &[u8]) -> Self {
        match ns {
            ResolveResult::Bound(Namespace(uri)) if WORDML_NAMESPACES.contains(uri) => {
                match local_name {
                    b"p" => Self::Paragraph,
                    b"r" => Self::Run,
                    b"t" => Self::Text,
                    b"tab" => Self::Tab,
                    b"noBreakHyphen" => Self::NoBreakHyphen,
                    b"softHyphen" => Self::SoftHyphen,
                    _ => Self::Other,
                }
            }
            ResolveResult::Bound(Namespace(uri))
                if *uri == MARKUP_COMPATIBILITY_NAMESPACE && local_name == b"Choice" =>
            {
                Self::Choice
            }
            _ => Self::Other,
        }
    }
}

/// Stream the main document XML and collect its text.
///
/// Only WordprocessingML elements contribute; math and DrawingML text are
/// skipped.
fn read_body_text<R: BufRead>(reader: R) -> Result<BodyText> {
    let mut xml = NsReader::from_reader(reader);
    let mut buf = Vec::with_capacity(1024);

    let mut text = String::with_capacity(8192);
    let mut paragraphs = 0;

    // Runs nest inside text boxes.
    let mut run_depth = 0usize;
    let mut in_text = false;
    // Depth inside an mc:Choice subtree; only mc:Fallback is read.
    let mut skip_depth = 0usize;

    loop {
        let (ns, event) = xml.read_resolved_event_into(&mut buf)?;
        match event {
            Event::Start(e) => {
                if skip_depth > 0 {
                    skip_depth += 1;
                } else {
                    match BodyElement::classify(&ns, e.local_name().as_ref()) {
                        BodyElement::Choice => {
                            trace!("Skipping alternate content choice");
                            skip_depth = 1;
                        }
                        BodyElement::Run => run_depth += 1,
                        BodyElement::Text => in_text = true,
                        _ => {}
                    }
                }
            }
            Event::Empty(e) if skip_depth == 0 => {
                match BodyElement::classify(&ns, e.local_name().as_ref()) {
                    BodyElement::Paragraph => {
                        text.push_str(PARAGRAPH_END);
                        paragraphs += 1;
                    }
                    BodyElement::Tab if run_depth > 0 => text.push('\t'),
                    BodyElement::NoBreakHyphen if run_depth > 0 => text.push('\u{2011}'),
                    BodyElement::SoftHyphen if run_depth > 0 => text.push('\u{00AD}'),
                    _ => {}
                }
            }
            Event::Text(e) if in_text && skip_depth == 0 => {
                text.push_str(&e.unescape()?);
            }
            Event::End(e) => {
                if skip_depth > 0 {
                    skip_depth -= 1;
                } else {
                    match BodyElement::classify(&ns, e.local_name().as_ref()) {
                        BodyElement::Paragraph => {
                            text.push_str(PARAGRAPH_END);
                            paragraphs += 1;
                        }
                        BodyElement::Run => run_depth = run_depth.saturating_sub(1),
                        BodyElement::Text => in_text = false,
                        _ => {}
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(BodyText { text, paragraphs })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::{Cursor, Write};
    use std::path::Path;
    use zip::ZipWriter;
    use zip::write::FileOptions;

    fn build_package(parts: &[(&str, &str)]) -> Cursor<Vec<u8>> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = FileOptions::default();
        for (name, content) in parts {
            zip.start_file(*name, options).unwrap();
            zip.write_all(content.as_bytes()).unwrap();
        }
        let mut cursor = zip.finish().unwrap();
        cursor.set_position(0);
        cursor
    }

    fn document(body: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" xmlns:mc="http://schemas.openxmlformats.org/markup-compatibility/2006" xmlns:m="http://schemas.openxmlformats.org/officeDocument/2006/math" xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:wp="http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing"><w:body>{}</w:body></w:document>"#,
            body
        )
    }

    fn extract_body(body: &str) -> ExtractionResult {
        let package = build_package(&[("word/document.xml", &document(body))]);
        DocxExtractor::new().extract_raw_text(package).unwrap()
    }

    #[test]
    fn test_paragraphs_end_with_blank_line() {
        let result = extract_body(
            "<w:p><w:r><w:t>Hello</w:t></w:r></w:p><w:p><w:r><w:t>World</w:t></w:r></w:p>",
        );
        assert_eq!(result.text, "Hello\n\nWorld\n\n");
        assert_eq!(result.paragraphs, 2);
        assert_eq!(result.part, "word/document.xml");
    }

    #[test]
    fn test_runs_concatenate_and_keep_spaces() {
        let result = extract_body(
            r#"<w:p><w:r><w:t xml:space="preserve">Question </w:t></w:r><w:r><w:rPr><w:b/></w:rPr><w:t>1:</w:t></w:r><w:r><w:t xml:space="preserve">  What is Selenium?</w:t></w:r></w:p>"#,
        );
        assert_eq!(result.text, "Question 1:  What is Selenium?\n\n");
    }

    #[test]
    fn test_entities_are_unescaped() {
        let result = extract_body("<w:p><w:r><w:t>Q&amp;A &lt;tags&gt; &quot;x&quot;</w:t></w:r></w:p>");
        assert_eq!(result.text, "Q&A <tags> \"x\"\n\n");
    }

    #[test]
    fn test_tab_in_run_but_not_tab_stop() {
        let result = extract_body(
            r#"<w:p><w:pPr><w:tabs><w:tab w:val="left" w:pos="720"/></w:tabs></w:pPr><w:r><w:t>a</w:t><w:tab/><w:t>b</w:t></w:r></w:p>"#,
        );
        assert_eq!(result.text, "a\tb\n\n");
    }

    #[test]
    fn test_empty_paragraphs_count() {
        let result = extract_body("<w:p/><w:p></w:p><w:p><w:r><w:t>x</w:t></w:r></w:p>");
        assert_eq!(result.text, "\n\n\n\nx\n\n");
        assert_eq!(result.paragraphs, 3);
    }

    #[test]
    fn test_table_cells_are_paragraphs() {
        let result = extract_body(
            "<w:tbl><w:tr><w:tc><w:p><w:r><w:t>A</w:t></w:r></w:p></w:tc><w:tc><w:p><w:r><w:t>B</w:t></w:r></w:p></w:tc></w:tr></w:tbl>",
        );
        assert_eq!(result.text, "A\n\nB\n\n");
    }

    #[test]
    fn test_breaks_deleted_text_and_fields_are_dropped() {
        let result = extract_body(
            r#"<w:p><w:r><w:delText>old</w:delText></w:r><w:r><w:instrText xml:space="preserve"> PAGE </w:instrText></w:r><w:r><w:t>new</w:t><w:br/><w:t>line</w:t></w:r></w:p>"#,
        );
        assert_eq!(result.text, "newline\n\n");
    }

    #[test]
    fn test_hyphen_elements() {
        let result = extract_body(
            "<w:p><w:r><w:t>co</w:t><w:noBreakHyphen/><w:t>op</w:t><w:softHyphen/><w:t>x</w:t></w:r></w:p>",
        );
        assert_eq!(result.text, "co\u{2011}op\u{00AD}x\n\n");
    }

    #[test]
    fn test_alternate_content_reads_fallback_only() {
        let result = extract_body(
            r#"<w:p><w:r><mc:AlternateContent><mc:Choice Requires="wps"><w:drawing><w:txbxContent><w:p><w:r><w:t>Box</w:t></w:r></w:p></w:txbxContent></w:drawing></mc:Choice><mc:Fallback><w:pict><w:txbxContent><w:p><w:r><w:t>Box</w:t></w:r></w:p></w:txbxContent></w:pict></mc:Fallback></mc:AlternateContent><w:tab/><w:t>after</w:t></w:r></w:p>"#,
        );
        assert_eq!(result.text, "Box\n\n\tafter\n\n");
        assert_eq!(result.paragraphs, 2);
    }

    #[test]
    fn test_math_text_is_skipped() {
        let result = extract_body(
            "<w:p><w:r><w:t>x=</w:t></w:r><m:oMath><m:r><m:t>y</m:t></m:r></m:oMath></w:p>",
        );
        assert_eq!(result.text, "x=\n\n");
        assert_eq!(result.paragraphs, 1);
    }

    #[test]
    fn test_drawing_paragraphs_are_skipped() {
        let result = extract_body(
            "<w:p><w:r><w:drawing><wp:inline><a:graphic><a:p><a:r><a:t>shape</a:t></a:r></a:p></a:graphic></wp:inline></w:drawing></w:r></w:p>",
        );
        assert_eq!(result.text, "\n\n");
        assert_eq!(result.paragraphs, 1);
    }

    #[test]
    fn test_strict_namespace_document() {
        let xml = r#"<w:document xmlns:w="http://purl.oclc.org/ooxml/wordprocessingml/main"><w:body><w:p><w:r><w:t>strict</w:t></w:r></w:p></w:body></w:document>"#;
        let package = build_package(&[("word/document.xml", xml)]);
        let result = DocxExtractor::new().extract_raw_text(package).unwrap();
        assert_eq!(result.text, "strict\n\n");
    }

    #[test]
    fn test_main_part_from_relationships() {
        let rels = r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="/word/document2.xml"/></Relationships>"#;
        let package = build_package(&[
            ("_rels/.rels", rels),
            ("word/document.xml", &document("<w:p><w:r><w:t>stale</w:t></w:r></w:p>")),
            ("word/document2.xml", &document("<w:p><w:r><w:t>current</w:t></w:r></w:p>")),
        ]);

        let result = DocxExtractor::new().extract_raw_text(package).unwrap();
        assert_eq!(result.text, "current\n\n");
        assert_eq!(result.part, "word/document2.xml");
    }

    #[test]
    fn test_missing_main_part() {
        let package = build_package(&[("[Content_Types].xml", "<Types/>")]);
        let err = DocxExtractor::new().extract_raw_text(package).unwrap_err();
        assert!(matches!(err, ExtractError::MalformedDocument(ref msg) if msg.contains("word/document.xml")));
    }

    #[test]
    fn test_not_a_zip_container() {
        let data = Cursor::new(b"just some plain text, not a document".to_vec());
        let err = DocxExtractor::new().extract_raw_text(data).unwrap_err();
        assert!(matches!(err, ExtractError::MalformedDocument(_)));
    }

    #[test]
    fn test_invalid_xml() {
        let package = build_package(&[(
            "word/document.xml",
            "<w:document><w:body><w:p></w:body></w:document>",
        )]);
        let err = DocxExtractor::new().extract_raw_text(package).unwrap_err();
        assert!(matches!(err, ExtractError::MalformedDocument(_)));
    }

    #[test]
    fn test_extract_nonexistent_file() {
        let err = DocxExtractor::new()
            .extract_file(Path::new("/nonexistent/file.docx"))
            .unwrap_err();
        assert!(matches!(err, ExtractError::NotFound { .. }));
    }

    #[test]
    fn test_extract_file_from_disk() {
        let package = build_package(&[(
            "word/document.xml",
            &document("<w:p><w:r><w:t>on disk</w:t></w:r></w:p>"),
        )]);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.docx");
        std::fs::write(&path, package.into_inner()).unwrap();

        let first = DocxExtractor::new().extract_file(&path).unwrap();
        let second = DocxExtractor::new().extract_file(&path).unwrap();
        assert_eq!(first.text, "on disk\n\n");
        assert_eq!(first, second);
    }
}
