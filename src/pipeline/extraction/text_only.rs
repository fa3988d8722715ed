use std::path::Path;

use super::types::ExtractorStrategy;
use super::ExtractionError;
use crate::pipeline::import::DocumentFormat;

/// Plain `.txt` uploads: the whole file decoded as UTF-8, returned verbatim.
/// No trimming here; blank-text rejection happens in the processor.
pub struct PlainTextStrategy;

impl ExtractorStrategy for PlainTextStrategy {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::PlainText
    }

    fn extract_text(&self, path: &Path) -> Result<String, ExtractionError> {
        let bytes = std::fs::read(path)
            .map_err(|e| ExtractionError::failed(DocumentFormat::PlainText, e))?;

        String::from_utf8(bytes).map_err(|e| ExtractionError::failed(DocumentFormat::PlainText, e))
    }
}
