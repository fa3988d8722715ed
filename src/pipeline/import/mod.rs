pub mod format;
pub mod staging;
pub mod upload;

pub use format::*;
pub use staging::*;
pub use upload::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No file provided")]
    MissingFilename,

    #[error("Unsupported file type '{extension}'. Allowed: {allowed}")]
    UnsupportedFormat { extension: String, allowed: String },

    #[error("File size too large: {size} bytes exceeds the {max} byte limit")]
    FileTooLarge { size: u64, max: u64 },

    #[error("Could not stage upload at {path}: {source}")]
    StagingWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
