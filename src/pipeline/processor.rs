//! Document analysis orchestrator.
//!
//! Drives one upload through the pipeline:
//! resolve → stage → extract → cleanup → document analysis → legal summary → actions.
//!
//! Engines are injected (extractor registry, LLM client) so the orchestrator
//! stays testable with mock implementations.

use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use crate::models::{AnalysisOutcome, ANALYSIS_CONFIDENCE};
use crate::pipeline::actions::derive_actions;
use crate::pipeline::cancel::CancellationToken;
use crate::pipeline::extraction::{ExtractionError, ExtractionResult, ExtractorRegistry};
use crate::pipeline::import::{ImportError, StagingArea};
use crate::pipeline::structuring::{
    build_document_analysis_prompt, build_legal_summary_prompt, max_tokens, LlmClient,
    StructuringError, DEFAULT_TEMPERATURE, DOCUMENT_ANALYSIS_SYSTEM_PROMPT,
    LEGAL_SUMMARY_SYSTEM_PROMPT,
};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur during document processing.
#[derive(Debug, thiserror::Error)]
pub enum ProcessingError {
    #[error("Upload failed: {0}")]
    Import(#[from] ImportError),

    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Model call failed: {0}")]
    Structuring(#[from] StructuringError),

    #[error("Processing cancelled")]
    Cancelled,
}

/// Stable failure discriminant for the host layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    MissingFilename,
    FileTooLarge,
    UnsupportedFormat,
    Staging,
    ExtractionFailure,
    EmptyExtraction,
    OcrUnavailable,
    NoStructuredPayload,
    MalformedPayload,
    UpstreamModel,
    Cancelled,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingFilename => "missing_filename",
            Self::FileTooLarge => "file_too_large",
            Self::UnsupportedFormat => "unsupported_format",
            Self::Staging => "staging",
            Self::ExtractionFailure => "extraction_failure",
            Self::EmptyExtraction => "empty_extraction",
            Self::OcrUnavailable => "ocr_unavailable",
            Self::NoStructuredPayload => "no_structured_payload",
            Self::MalformedPayload => "malformed_payload",
            Self::UpstreamModel => "upstream_model",
            Self::Cancelled => "cancelled",
        }
    }
}

impl ProcessingError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Import(e) => match e {
                ImportError::MissingFilename => ErrorKind::MissingFilename,
                ImportError::FileTooLarge { .. } => ErrorKind::FileTooLarge,
                ImportError::UnsupportedFormat { .. } => ErrorKind::UnsupportedFormat,
                ImportError::Io(_) | ImportError::StagingWrite { .. } => ErrorKind::Staging,
            },
            Self::Extraction(e) => match e {
                ExtractionError::UnsupportedFormat(_) => ErrorKind::UnsupportedFormat,
                ExtractionError::Failed { .. } => ErrorKind::ExtractionFailure,
                ExtractionError::Empty => ErrorKind::EmptyExtraction,
                ExtractionError::OcrUnavailable(_) => ErrorKind::OcrUnavailable,
            },
            Self::Structuring(e) if e.is_upstream() => ErrorKind::UpstreamModel,
            Self::Structuring(StructuringError::NoStructuredPayload) => {
                ErrorKind::NoStructuredPayload
            }
            Self::Structuring(_) => ErrorKind::MalformedPayload,
            Self::Cancelled => ErrorKind::Cancelled,
        }
    }
}

fn checkpoint(cancel: &CancellationToken) -> Result<(), ProcessingError> {
    if cancel.is_cancelled() {
        return Err(ProcessingError::Cancelled);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Orchestrator
// ---------------------------------------------------------------------------

/// Orchestrates document analysis: stage → extract → analyze → summarize.
///
/// Holds no per-request state; one instance serves concurrent uploads.
pub struct DocumentProcessor {
    registry: ExtractorRegistry,
    llm: Arc<dyn LlmClient>,
    staging: StagingArea,
}

impl DocumentProcessor {
    pub fn new(registry: ExtractorRegistry, llm: Arc<dyn LlmClient>, staging: StagingArea) -> Self {
        Self {
            registry,
            llm,
            staging,
        }
    }

    pub fn staging(&self) -> &StagingArea {
        &self.staging
    }

    /// Full pipeline for one uploaded document.
    ///
    /// `case_id` is carried for log correlation only.
    pub fn process(
        &self,
        bytes: &[u8],
        filename: &str,
        case_id: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<AnalysisOutcome, ProcessingError> {
        let document_id = Uuid::new_v4();
        tracing::info!(
            document_id = %document_id,
            filename,
            case_id = case_id.unwrap_or("-"),
            bytes = bytes.len(),
            "Processing document"
        );

        let result = self.run(bytes, filename, cancel);
        match &result {
            Ok(outcome) => tracing::info!(
                document_id = %document_id,
                actions = outcome.actions.len(),
                "Document processed"
            ),
            Err(e) => tracing::warn!(
                document_id = %document_id,
                kind = e.kind().as_str(),
                error = %e,
                "Document processing failed"
            ),
        }
        result
    }

    fn run(
        &self,
        bytes: &[u8],
        filename: &str,
        cancel: &CancellationToken,
    ) -> Result<AnalysisOutcome, ProcessingError> {
        let extraction = self.extract_text(bytes, filename, cancel)?;

        checkpoint(cancel)?;
        let analysis = self.llm.generate(
            &build_document_analysis_prompt(&extraction.text),
            DOCUMENT_ANALYSIS_SYSTEM_PROMPT,
            max_tokens::DOCUMENT_ANALYSIS,
            DEFAULT_TEMPERATURE,
        )?;
        tracing::info!(chars = analysis.len(), "Document analysis received");

        checkpoint(cancel)?;
        let legal_summary = self.llm.generate(
            &build_legal_summary_prompt(&analysis, &extraction.text),
            LEGAL_SUMMARY_SYSTEM_PROMPT,
            max_tokens::LEGAL_SUMMARY,
            DEFAULT_TEMPERATURE,
        )?;
        tracing::info!(chars = legal_summary.len(), "Legal summary received");

        let actions = derive_actions(&legal_summary);

        Ok(AnalysisOutcome {
            extracted_text: extraction.text,
            legal_summary,
            actions,
            confidence_score: ANALYSIS_CONFIDENCE,
        })
    }

    /// Stage the upload, extract its text and remove the staged copy.
    ///
    /// The staged file is gone when this returns, whatever the outcome.
    /// Blank text is rejected as `ExtractionError::Empty`.
    pub fn extract_text(
        &self,
        bytes: &[u8],
        filename: &str,
        cancel: &CancellationToken,
    ) -> Result<ExtractionResult, ProcessingError> {
        checkpoint(cancel)?;
        let format = self.registry.resolve_filename(filename)?.format();

        let staged = self.staging.store(bytes, filename)?;
        let extracted = self.registry.extract(staged.path(), format);
        staged.cleanup();

        let extraction = extracted?;
        if extraction.is_blank() {
            return Err(ExtractionError::Empty.into());
        }
        Ok(extraction)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
