//! Error types for the reckon-core library.

use thiserror::Error;

/// Main error type for the reckon library.
///
/// Only input-level failures cross the core boundary: a document whose text
/// cannot be obtained fails here, while unparseable rows, unresolved dates,
/// and duplicate entries degrade to "fewer records" inside the extractor.
#[derive(Error, Debug)]
pub enum ReckonError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Result type for the reckon library.
pub type Result<T> = std::result::Result<T, ReckonError>;
