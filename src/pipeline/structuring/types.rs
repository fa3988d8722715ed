use super::StructuringError;

/// Sampling temperature used for every model call.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Text-completion backend abstraction (allows mocking for tests).
///
/// One request, one reply: no streaming, no retry. An empty `system` means
/// no system message is sent.
pub trait LlmClient: Send + Sync {
    fn generate(
        &self,
        prompt: &str,
        system: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<String, StructuringError>;
}

/// Token ceilings per workflow step.
pub mod max_tokens {
    pub const DOCUMENT_ANALYSIS: u32 = 1500;
    pub const LEGAL_SUMMARY: u32 = 1000;
    pub const DOCUMENT_TYPE: u32 = 800;
    pub const CASE_ANALYSIS: u32 = 2000;
    pub const DRAFT: u32 = 2000;
}
