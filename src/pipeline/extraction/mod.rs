pub mod types;
pub mod pdf;
pub mod docx;
pub mod ocr;
pub mod text_only;
pub mod registry;

pub use types::*;
pub use pdf::*;
pub use docx::*;
pub use ocr::*;
pub use text_only::*;
pub use registry::*;

use thiserror::Error;

use crate::pipeline::import::DocumentFormat;

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),

    #[error("Error extracting text from {format}: {cause}")]
    Failed {
        format: DocumentFormat,
        cause: String,
    },

    #[error("No text could be extracted from the document")]
    Empty,

    #[error("OCR engine unavailable: {0}")]
    OcrUnavailable(String),
}

impl ExtractionError {
    pub fn failed(format: DocumentFormat, cause: impl std::fmt::Display) -> Self {
        Self::Failed {
            format,
            cause: cause.to_string(),
        }
    }
}
