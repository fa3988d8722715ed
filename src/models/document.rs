use serde::{Deserialize, Serialize};

/// Fixed confidence attached to every document analysis.
pub const ANALYSIS_CONFIDENCE: u8 = 85;

/// Result of one uploaded document going through the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisOutcome {
    pub extracted_text: String,
    pub legal_summary: String,
    pub actions: Vec<String>,
    pub confidence_score: u8,
}

/// Quick classification over the start of a document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentTypeAnalysis {
    pub document_type: String,
    pub analysis: String,
    /// RFC 3339 timestamp.
    pub processed_at: String,
}
