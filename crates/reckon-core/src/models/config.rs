//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};

/// Main configuration for the reckon pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReckonConfig {
    /// PDF processing configuration.
    pub pdf: PdfConfig,

    /// Table extraction configuration.
    pub extraction: ExtractionConfig,
}

impl Default for ReckonConfig {
    fn default() -> Self {
        Self {
            pdf: PdfConfig::default(),
            extraction: ExtractionConfig::default(),
        }
    }
}

/// PDF processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Minimum text length to consider the document readable.
    pub min_text_length: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self { min_text_length: 50 }
    }
}

/// Row extraction behavior.
///
/// The two modes reflect the two historical extraction variants: `Strict`
/// is the daily-update path (high price floor, longer descriptions, a
/// second-line price fallback), `Simple` is the single-pass bulk path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMode {
    /// Strict dedup with the two-line price fallback.
    Strict,
    /// Single pass, no fallback, lower acceptance floors.
    Simple,
}

impl Default for ExtractionMode {
    fn default() -> Self {
        Self::Strict
    }
}

impl ExtractionMode {
    /// Exclusive lower bound for a token to count as a price.
    pub fn price_threshold(self) -> u64 {
        match self {
            Self::Strict => 100_000,
            Self::Simple => 1_000,
        }
    }

    /// Exclusive lower bound on cleaned description length.
    pub fn min_description_len(self) -> usize {
        match self {
            Self::Strict => 5,
            Self::Simple => 3,
        }
    }

    /// Whether a row without an inline price may take its price from the
    /// following line.
    pub fn two_line_fallback(self) -> bool {
        matches!(self, Self::Strict)
    }
}

/// Table extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Extraction mode.
    pub mode: ExtractionMode,

    /// Override the mode's price threshold (exclusive).
    pub price_threshold: Option<u64>,

    /// Override the mode's minimum description length (exclusive).
    pub min_description_len: Option<usize>,

    /// Marker that must appear in the table header line.
    pub table_marker: String,

    /// Price column marker that must appear in the same header line.
    pub price_marker: String,

    /// Section markers that terminate table scanning.
    pub end_markers: Vec<String>,

    /// Unit suffixes stripped from candidate price tokens.
    pub unit_suffixes: Vec<String>,

    /// Minimum digit count for the two-line fallback price.
    pub fallback_min_digits: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            mode: ExtractionMode::default(),
            price_threshold: None,
            min_description_len: None,
            table_marker: "PRODUCTS".to_string(),
            price_marker: "BASIC PRICE".to_string(),
            end_markers: vec![
                "NOTE".to_string(),
                "QUANTITY DISCOUNT".to_string(),
                "FREIGHT CHARGES".to_string(),
                "TAXES".to_string(),
            ],
            unit_suffixes: vec!["Rs/".to_string(), "MT".to_string()],
            fallback_min_digits: 6,
        }
    }
}

impl ExtractionConfig {
    /// Effective price threshold (override or mode default).
    pub fn price_threshold(&self) -> u64 {
        self.price_threshold.unwrap_or(self.mode.price_threshold())
    }

    /// Effective minimum description length (override or mode default).
    pub fn min_description_len(&self) -> usize {
        self.min_description_len
            .unwrap_or(self.mode.min_description_len())
    }
}

impl ReckonConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_defaults() {
        assert_eq!(ExtractionMode::Strict.price_threshold(), 100_000);
        assert_eq!(ExtractionMode::Simple.price_threshold(), 1_000);
        assert_eq!(ExtractionMode::Strict.min_description_len(), 5);
        assert_eq!(ExtractionMode::Simple.min_description_len(), 3);
        assert!(ExtractionMode::Strict.two_line_fallback());
        assert!(!ExtractionMode::Simple.two_line_fallback());
    }

    #[test]
    fn test_config_overrides() {
        let config = ExtractionConfig {
            price_threshold: Some(50_000),
            min_description_len: Some(8),
            ..ExtractionConfig::default()
        };

        assert_eq!(config.price_threshold(), 50_000);
        assert_eq!(config.min_description_len(), 8);
    }

    #[test]
    fn test_config_round_trip() {
        let config = ReckonConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: ReckonConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.extraction.mode, ExtractionMode::Strict);
        assert_eq!(parsed.extraction.table_marker, "PRODUCTS");
    }
}
