//! Core library for price circular processing.
//!
//! This crate provides:
//! - PDF text extraction (linearized page text)
//! - Effective-date resolution from circular text and filenames
//! - Product table scanning and price row extraction
//! - Price history record models

pub mod circular;
pub mod error;
pub mod models;
pub mod pdf;

pub use error::{ReckonError, Result};
pub use models::config::{ExtractionConfig, ExtractionMode, PdfConfig, ReckonConfig};
pub use models::record::PriceRecord;
pub use pdf::PdfExtractor;
pub use circular::{CircularParser, ExtractionResult, TableExtractor};
pub use circular::cleaner::clean_description;
pub use circular::dates::{date_from_filename, resolve_effective_date};
