use std::path::Path;

use serde::{Deserialize, Serialize};

use super::ExtractionError;
use crate::pipeline::import::DocumentFormat;

/// Text pulled out of one document. Never persisted past the call that produced it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExtractionResult {
    pub text: String,
    pub source_format: DocumentFormat,
}

impl ExtractionResult {
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// One way of turning a stored document into plain text.
pub trait ExtractorStrategy: Send + Sync {
    fn format(&self) -> DocumentFormat;

    fn extract_text(&self, path: &Path) -> Result<String, ExtractionError>;
}

/// Raw OCR result from the engine
#[derive(Debug)]
pub struct OcrPageResult {
    pub text: String,
    pub confidence: f32,
}

/// OCR engine abstraction (allows mocking for tests)
pub trait OcrEngine: Send + Sync {
    fn ocr_image(&self, image_bytes: &[u8]) -> Result<OcrPageResult, ExtractionError>;
}

/// PDF text-layer extraction abstraction. Returns one string per page, in page order.
pub trait PdfExtractor: Send + Sync {
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<String>, ExtractionError>;
}
