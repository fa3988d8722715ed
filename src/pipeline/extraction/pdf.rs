use std::path::Path;

use super::types::{ExtractorStrategy, PdfExtractor};
use super::ExtractionError;
use crate::pipeline::import::DocumentFormat;

/// PDF text extractor using the pdf-extract crate.
/// Handles digital PDFs with embedded text layers.
pub struct PdfTextExtractor;

impl PdfExtractor for PdfTextExtractor {
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<String>, ExtractionError> {
        pdf_extract::extract_text_from_mem_by_pages(pdf_bytes)
            .map_err(|e| ExtractionError::failed(DocumentFormat::Pdf, e))
    }
}

/// PDF strategy: every page's text followed by a newline, in page order, then trimmed.
/// A page without a text layer contributes an empty segment.
pub struct PdfStrategy {
    pages: Box<dyn PdfExtractor>,
}

impl PdfStrategy {
    pub fn new(pages: Box<dyn PdfExtractor>) -> Self {
        Self { pages }
    }
}

impl Default for PdfStrategy {
    fn default() -> Self {
        Self::new(Box::new(PdfTextExtractor))
    }
}

impl ExtractorStrategy for PdfStrategy {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Pdf
    }

    fn extract_text(&self, path: &Path) -> Result<String, ExtractionError> {
        let bytes =
            std::fs::read(path).map_err(|e| ExtractionError::failed(DocumentFormat::Pdf, e))?;
        let pages = self.pages.extract_pages(&bytes)?;

        tracing::debug!(page_count = pages.len(), "PDF text layer read");

        Ok(join_pages(&pages))
    }
}

fn join_pages(pages: &[String]) -> String {
    let mut text = String::new();
    for page in pages {
        text.push_str(page);
        text.push('\n');
    }
    text.trim().to_string()
}
