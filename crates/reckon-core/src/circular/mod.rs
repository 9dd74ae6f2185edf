//! Price circular extraction module.

pub mod cleaner;
pub mod dates;
mod table;

pub use table::TableExtractor;

use std::time::Instant;

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::models::config::{ExtractionConfig, ExtractionMode};
use crate::models::record::PriceRecord;

/// Result of parsing one circular document.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Date the prices take effect.
    pub effective_date: NaiveDate,
    /// Extracted records, in document order.
    pub records: Vec<PriceRecord>,
    /// Extraction warnings.
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Parser combining date resolution and table extraction.
pub struct CircularParser {
    extractor: TableExtractor,
}

impl CircularParser {
    /// Create a parser with the given extraction configuration.
    pub fn new(config: ExtractionConfig) -> Self {
        Self {
            extractor: TableExtractor::new(config),
        }
    }

    /// Create a parser with the default configuration for `mode`.
    pub fn with_mode(mode: ExtractionMode) -> Self {
        Self {
            extractor: TableExtractor::with_mode(mode),
        }
    }

    /// Parse one circular's full text. `filename` feeds the date fallback.
    ///
    /// Never fails: a document without a recognizable table yields zero
    /// records and a warning, which callers should surface instead of
    /// treating as an error.
    pub fn parse(&self, text: &str, filename: &str) -> ExtractionResult {
        let start = Instant::now();
        info!("parsing circular from {} characters of text", text.len());

        let effective_date = dates::resolve_effective_date(text, filename);
        debug!("effective date: {}", effective_date);

        let records = self.extractor.extract(text, effective_date);

        let mut warnings = Vec::new();
        if records.is_empty() {
            warnings.push("no price rows recognized in document".to_string());
        }

        ExtractionResult {
            effective_date,
            records,
            warnings,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }
}

impl Default for CircularParser {
    fn default() -> Self {
        Self::new(ExtractionConfig::default())
    }
}
