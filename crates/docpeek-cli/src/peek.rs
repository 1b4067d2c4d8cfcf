//! Read the configured document and print its preview.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, info};

use docpeek_core::{DocxExtractor, ExtractionResult, PeekConfig, RawTextExtractor, render_preview};

pub fn run(config_path: Option<&Path>, document: Option<PathBuf>) -> anyhow::Result<()> {
    let start = Instant::now();

    // Load configuration
    let config = if let Some(path) = config_path {
        PeekConfig::from_file(path)?
    } else {
        PeekConfig::default()
    }
    .with_document(document);

    info!("Reading document: {}", config.document.display());

    let result = read_document(&config.document)?;

    debug!(
        "Read {} paragraphs ({} chars) from {}",
        result.paragraphs,
        result.char_count(),
        result.part
    );

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(render_preview(&result.text).as_bytes())?;
    stdout.flush()?;

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn read_document(path: &Path) -> docpeek_core::Result<ExtractionResult> {
    Ok(DocxExtractor::new().extract_file(path)?)
}
