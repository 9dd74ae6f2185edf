//! CLI subcommands.

pub mod batch;
pub mod config;
pub mod process;

use std::path::Path;

use tracing::debug;

use reckon_core::{PdfExtractor, ReckonConfig};

/// Load configuration from `--config`, or fall back to defaults.
pub fn load_config(path: Option<&str>) -> anyhow::Result<ReckonConfig> {
    match path {
        Some(p) => Ok(ReckonConfig::from_file(Path::new(p))?),
        None => Ok(ReckonConfig::default()),
    }
}

/// Read a document's linearized text: PDFs through the extractor, `.txt`
/// files (pre-rendered circulars) directly.
pub fn read_document_text(path: &Path) -> anyhow::Result<String> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "pdf" => {
            let extractor = PdfExtractor::load_file(path)?;
            debug!("PDF has {} pages", extractor.page_count());
            Ok(extractor.extract_text()?)
        }
        "txt" => Ok(std::fs::read_to_string(path)?),
        _ => anyhow::bail!("Unsupported file format: {}", extension),
    }
}
