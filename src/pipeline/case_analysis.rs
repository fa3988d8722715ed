use std::sync::Arc;

use crate::models::{CaseAnalysis, CaseInput};
use crate::pipeline::structuring::{
    build_case_prompt, decode_payload, extract_with, max_tokens, BraceSpanExtractor, LlmClient,
    PayloadExtractor, StructuringError, CASE_ANALYSIS_SYSTEM_PROMPT, DEFAULT_TEMPERATURE,
};

/// Case assessment: one model call, JSON payload carved out of the reply.
pub struct CaseAnalyzer {
    llm: Arc<dyn LlmClient>,
    extractor: Box<dyn PayloadExtractor>,
}

impl CaseAnalyzer {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self::with_extractor(llm, Box::new(BraceSpanExtractor))
    }

    pub fn with_extractor(llm: Arc<dyn LlmClient>, extractor: Box<dyn PayloadExtractor>) -> Self {
        Self { llm, extractor }
    }

    pub fn analyze(&self, input: &CaseInput) -> Result<CaseAnalysis, StructuringError> {
        tracing::info!(
            state = %input.legal_profile.state,
            case_type = %input.legal_profile.case_type,
            has_document = input.doc_text.is_some(),
            "Running case analysis"
        );

        let prompt = build_case_prompt(input)?;
        let reply = self.llm.generate(
            &prompt,
            CASE_ANALYSIS_SYSTEM_PROMPT,
            max_tokens::CASE_ANALYSIS,
            DEFAULT_TEMPERATURE,
        )?;

        let payload = extract_with(self.extractor.as_ref(), &reply)?;
        let analysis: CaseAnalysis = decode_payload(payload)?;

        tracing::info!(
            score = analysis.score,
            timeline_steps = analysis.timeline.len(),
            "Case analysis decoded"
        );
        Ok(analysis)
    }
}
