use serde::{Deserialize, Serialize};

use super::format::{accepted_extensions_list, file_extension, DocumentFormat};
use super::ImportError;
use crate::config::DEFAULT_MAX_FILE_SIZE;

/// One uploaded document, as received from the boundary.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub raw_bytes: Vec<u8>,
    pub declared_filename: String,
    /// None when the extension is not one we can extract.
    pub declared_format: Option<DocumentFormat>,
    pub size_bytes: u64,
}

impl UploadedDocument {
    pub fn new(raw_bytes: Vec<u8>, declared_filename: &str) -> Self {
        let size_bytes = raw_bytes.len() as u64;
        Self {
            raw_bytes,
            declared_filename: declared_filename.to_string(),
            declared_format: DocumentFormat::from_filename(declared_filename),
            size_bytes,
        }
    }
}

/// Checks a host applies before handing an upload to the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadPolicy {
    pub max_file_size: u64,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

impl UploadPolicy {
    pub fn new(max_file_size: u64) -> Self {
        Self { max_file_size }
    }

    /// Filename present, size within the ceiling, extension on the allow-list.
    pub fn validate(&self, filename: &str, size_bytes: u64) -> Result<DocumentFormat, ImportError> {
        if filename.trim().is_empty() {
            return Err(ImportError::MissingFilename);
        }

        if size_bytes > self.max_file_size {
            return Err(ImportError::FileTooLarge {
                size: size_bytes,
                max: self.max_file_size,
            });
        }

        DocumentFormat::from_filename(filename).ok_or_else(|| ImportError::UnsupportedFormat {
            extension: file_extension(filename),
            allowed: accepted_extensions_list(),
        })
    }

    pub fn validate_document(&self, document: &UploadedDocument) -> Result<DocumentFormat, ImportError> {
        self.validate(&document.declared_filename, document.size_bytes)
    }
}
