//! Package relationship lookup for the main document part.

use std::io::{BufRead, BufReader, Read, Seek};

use quick_xml::events::Event;
use quick_xml::reader::Reader;
use tracing::debug;
use zip::ZipArchive;
use zip::result::ZipError;

use super::Result;

/// Main document part used when the package does not name one.
pub const DEFAULT_MAIN_PART: &str = "word/document.xml";

const RELATIONSHIPS_PART: &str = "_rels/.rels";
const OFFICE_DOCUMENT_SUFFIX: &str = "/officeDocument";

/// Resolve the name of the main document part of a package.
pub(crate) fn main_document_part<R: Read + Seek>(archive: &mut ZipArchive<R>) -> Result<String> {
    let rels = match archive.by_name(RELATIONSHIPS_PART) {
        Ok(rels) => rels,
        Err(ZipError::FileNotFound) => {
            debug!("No {} in package, using {}", RELATIONSHIPS_PART, DEFAULT_MAIN_PART);
            return Ok(DEFAULT_MAIN_PART.to_string());
        }
        Err(e) => return Err(e.into()),
    };

    match office_document_target(BufReader::new(rels))? {
        Some(target) => {
            debug!("Main document part: {}", target);
            Ok(target)
        }
        None => {
            debug!("No officeDocument relationship, using {}", DEFAULT_MAIN_PART);
            Ok(DEFAULT_MAIN_PART.to_string())
        }
    }
}

/// Find the target of the officeDocument relationship, if any.
fn office_document_target<R: BufRead>(reader: R) -> Result<Option<String>> {
    let mut xml = Reader::from_reader(reader);
    let mut buf = Vec::with_capacity(512);

    loop {
        match xml.read_event_into(&mut buf)? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"Relationship" => {
                let mut rel_type = None;
                let mut target = None;

                for attr in e.attributes().filter_map(|a| a.ok()) {
                    match attr.key.local_name().as_ref() {
                        b"Type" => rel_type = Some(String::from_utf8_lossy(&attr.value).to_string()),
                        b"Target" => target = Some(String::from_utf8_lossy(&attr.value).to_string()),
                        _ => {}
                    }
                }

                if let (Some(rel_type), Some(target)) = (rel_type, target) {
                    if rel_type.ends_with(OFFICE_DOCUMENT_SUFFIX) {
                        return Ok(Some(target.trim_start_matches('/').to_string()));
                    }
                }
            }
            Event::Eof => return Ok(None),
            _ => {}
        }
        buf.clear();
    }
}
