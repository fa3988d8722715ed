pub mod types;
pub mod prompt;
pub mod parser;
pub mod groq;

pub use types::*;
pub use prompt::*;
pub use parser::*;
pub use groq::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StructuringError {
    #[error("Model backend is not reachable at {0}")]
    Connection(String),

    #[error("Model backend timed out after {0}s")]
    Timeout(u64),

    #[error("Model backend returned error (status {status}): {body}")]
    UpstreamStatus { status: u16, body: String },

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Response parsing error: {0}")]
    ResponseParsing(String),

    #[error("Model backend returned no completion")]
    EmptyCompletion,

    #[error("No JSON object found in the response")]
    NoStructuredPayload,

    #[error("Failed to decode the structured response: {0}")]
    MalformedPayload(String),

    #[error("Failed to encode the request: {0}")]
    RequestEncoding(String),
}

impl StructuringError {
    /// True for failures of the backend call itself, as opposed to its content.
    pub fn is_upstream(&self) -> bool {
        !matches!(
            self,
            Self::NoStructuredPayload | Self::MalformedPayload(_) | Self::RequestEncoding(_)
        )
    }
}
