//! Product table scanning and price row extraction.

use std::collections::HashSet;

use chrono::NaiveDate;
use tracing::{debug, trace};

use super::cleaner::clean_description;
use crate::models::config::{ExtractionConfig, ExtractionMode};
use crate::models::record::PriceRecord;

/// Scanner state over the document's line stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Before the table header line.
    Seeking,
    /// Inside the table, rows are being recognized.
    InTable,
    /// Past a section-end marker; no further lines are examined.
    Done,
}

/// Extracts (date, description, price) records from circular text.
pub struct TableExtractor {
    config: ExtractionConfig,
}

impl TableExtractor {
    /// Create an extractor with the given configuration.
    pub fn new(config: ExtractionConfig) -> Self {
        Self { config }
    }

    /// Create an extractor with the default configuration for `mode`.
    pub fn with_mode(mode: ExtractionMode) -> Self {
        Self::new(ExtractionConfig {
            mode,
            ..ExtractionConfig::default()
        })
    }

    /// Scan `text` and extract every recognizable price row.
    ///
    /// Records come out in document order of first occurrence. Rows that
    /// fail recognition are skipped, never errors. The ordinal ledger and
    /// the dedupe set are freshly allocated here and live only for this
    /// call, so documents processed in one run stay independent.
    pub fn extract(&self, text: &str, effective_date: NaiveDate) -> Vec<PriceRecord> {
        let lines: Vec<&str> = text.lines().collect();
        let mut records: Vec<PriceRecord> = Vec::new();
        let mut seen_keys: HashSet<String> = HashSet::new();
        let mut seen_ordinals: HashSet<u32> = HashSet::new();
        let mut state = ScanState::Seeking;

        for (i, raw) in lines.iter().enumerate() {
            let line = raw.trim();

            match state {
                ScanState::Seeking => {
                    if self.is_table_header(line) {
                        debug!("table header found at line {}", i);
                        state = ScanState::InTable;
                    }
                }
                ScanState::InTable => {
                    if self.is_section_end(line) {
                        debug!("section end at line {}", i);
                        state = ScanState::Done;
                        continue;
                    }

                    let Some((ordinal, rest)) = split_row_start(line) else {
                        continue;
                    };
                    if !seen_ordinals.insert(ordinal) {
                        trace!("duplicate ordinal {}, skipping line", ordinal);
                        continue;
                    }

                    let tokens: Vec<&str> = rest.split_whitespace().collect();
                    if tokens.len() < 2 {
                        continue;
                    }

                    if let Some((idx, price)) = self.rightmost_price(&tokens) {
                        // Tokens at or right of the price are price/unit noise
                        let desc = clean_description(&tokens[..idx].join(" "));
                        self.push_record(&mut records, &mut seen_keys, effective_date, desc, price);
                    } else if self.config.mode.two_line_fallback() {
                        if let Some(price) = lines
                            .get(i + 1)
                            .and_then(|next| self.next_line_price(next.trim()))
                        {
                            let desc = clean_description(&tokens.join(" "));
                            self.push_record(&mut records, &mut seen_keys, effective_date, desc, price);
                        }
                    }
                }
                ScanState::Done => break,
            }
        }

        debug!("extracted {} records", records.len());
        records
    }

    fn is_table_header(&self, line: &str) -> bool {
        let upper = line.to_uppercase();
        upper.contains(&self.config.table_marker.to_uppercase())
            && upper.contains(&self.config.price_marker.to_uppercase())
    }

    fn is_section_end(&self, line: &str) -> bool {
        let upper = line.to_uppercase();
        self.config
            .end_markers
            .iter()
            .any(|marker| upper.contains(&marker.to_uppercase()))
    }

    /// Right-to-left scan for the first token that parses as a price above
    /// the threshold. Returns the token index and the parsed value.
    fn rightmost_price(&self, tokens: &[&str]) -> Option<(usize, u64)> {
        for (idx, token) in tokens.iter().enumerate().rev() {
            if let Some(value) = self.price_candidate(token) {
                if value > self.config.price_threshold() {
                    return Some((idx, value));
                }
            }
        }
        None
    }

    /// Parse one token as a candidate price: strip thousands separators and
    /// unit suffixes, then keep only the digits.
    fn price_candidate(&self, token: &str) -> Option<u64> {
        let mut stripped = token.replace(',', "");
        for suffix in &self.config.unit_suffixes {
            stripped = stripped.replace(suffix.as_str(), "");
        }

        let digits: String = stripped.chars().filter(char::is_ascii_digit).collect();
        if digits.is_empty() {
            return None;
        }
        digits.parse().ok()
    }

    /// Two-line fallback: a price standing alone at the start of the next
    /// line, at least `fallback_min_digits` digits long.
    fn next_line_price(&self, next_line: &str) -> Option<u64> {
        let stripped = next_line.replace(',', "");
        let run_end = stripped
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(stripped.len());
        if run_end < self.config.fallback_min_digits {
            return None;
        }
        stripped[..run_end].parse().ok()
    }

    /// Apply description acceptance and key dedup, then emit the record.
    fn push_record(
        &self,
        records: &mut Vec<PriceRecord>,
        seen_keys: &mut HashSet<String>,
        effective_date: NaiveDate,
        description: String,
        price: u64,
    ) {
        if description.chars().count() <= self.config.min_description_len() {
            trace!("description too short, dropping row: {:?}", description);
            return;
        }
        if is_purely_numeric(&description) {
            trace!("purely numeric description, dropping row: {:?}", description);
            return;
        }

        let record = PriceRecord::new(effective_date, description, price);
        if !seen_keys.insert(record.dedupe_key()) {
            trace!("duplicate record {:?}, dropping", record.dedupe_key());
            return;
        }
        records.push(record);
    }
}

impl Default for TableExtractor {
    fn default() -> Self {
        Self::new(ExtractionConfig::default())
    }
}

/// Split a numbered row line into its ordinal and the remainder.
///
/// A row starts with a digit run, a period, and at least one whitespace
/// character before a non-empty remainder.
fn split_row_start(line: &str) -> Option<(u32, &str)> {
    let digits_end = line.find(|c: char| !c.is_ascii_digit())?;
    if digits_end == 0 {
        return None;
    }

    let rest = line[digits_end..].strip_prefix('.')?;
    let trimmed = rest.trim_start();
    if trimmed.len() == rest.len() || trimmed.is_empty() {
        return None;
    }

    let ordinal = line[..digits_end].parse().ok()?;
    Some((ordinal, trimmed))
}

fn is_purely_numeric(text: &str) -> bool {
    text.chars().all(|c| c.is_ascii_digit() || c.is_whitespace())
}
