//! PDF text extraction using lopdf and pdf-extract.

use lopdf::Document;
use tracing::debug;

use super::Result;
use crate::error::PdfError;

/// Text extractor for price circular PDFs.
///
/// Circulars are text PDFs; only the linearized page text is needed, in
/// page order, with no layout information.
pub struct PdfExtractor {
    raw_data: Vec<u8>,
    page_count: u32,
}

impl PdfExtractor {
    /// Load a PDF from bytes.
    pub fn load(data: &[u8]) -> Result<Self> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Handle PDFs with empty password encryption
        let raw_data = if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            let mut decrypted = Vec::new();
            doc.save_to(&mut decrypted)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            decrypted
        } else {
            data.to_vec()
        };

        let page_count = doc.get_pages().len() as u32;
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        Ok(Self { raw_data, page_count })
    }

    /// Load a PDF from a file path.
    pub fn load_file(path: &std::path::Path) -> crate::Result<Self> {
        let data = std::fs::read(path)?;
        Ok(Self::load(&data)?)
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    /// Extract the full document text, pages concatenated in order.
    pub fn extract_text(&self) -> Result<String> {
        let text = pdf_extract::extract_text_from_mem(&self.raw_data)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))?;
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_rejects_garbage() {
        let result = PdfExtractor::load(b"not a pdf at all");
        assert!(matches!(result, Err(PdfError::Parse(_))));
    }
}
