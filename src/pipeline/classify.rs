use std::sync::Arc;

use chrono::Local;

use crate::models::DocumentTypeAnalysis;
use crate::pipeline::structuring::{
    build_document_type_prompt, max_tokens, LlmClient, StructuringError, DEFAULT_TEMPERATURE,
    DOCUMENT_TYPE_SYSTEM_PROMPT,
};

/// Label attached to every classification; the model's own verdict lives in `analysis`.
pub const GENERIC_DOCUMENT_TYPE: &str = "Legal Document";

/// Quick type/urgency read over the opening of a document.
pub struct DocumentTypeClassifier {
    llm: Arc<dyn LlmClient>,
}

impl DocumentTypeClassifier {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }

    pub fn classify(&self, text: &str) -> Result<DocumentTypeAnalysis, StructuringError> {
        let analysis = self.llm.generate(
            &build_document_type_prompt(text),
            DOCUMENT_TYPE_SYSTEM_PROMPT,
            max_tokens::DOCUMENT_TYPE,
            DEFAULT_TEMPERATURE,
        )?;

        tracing::info!(chars = analysis.len(), "Document type analysis received");

        Ok(DocumentTypeAnalysis {
            document_type: GENERIC_DOCUMENT_TYPE.to_string(),
            analysis,
            processed_at: Local::now().to_rfc3339(),
        })
    }
}
