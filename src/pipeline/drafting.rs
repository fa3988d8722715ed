use std::sync::Arc;

use crate::models::{DocumentTemplate, DraftRequest, DraftedDocument};
use crate::pipeline::structuring::{
    build_draft_prompt, draft_system_prompt, max_tokens, LlmClient, StructuringError,
    DEFAULT_TEMPERATURE,
};

pub const DRAFT_FORMAT: &str = "docx";

/// Drafts legal documents from case details. Content only; no file is written.
pub struct DocumentDrafter {
    llm: Arc<dyn LlmClient>,
}

impl DocumentDrafter {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }

    pub fn draft(&self, request: &DraftRequest) -> Result<DraftedDocument, StructuringError> {
        tracing::info!(document_type = %request.document_type, "Drafting document");

        let content = self.llm.generate(
            &build_draft_prompt(request),
            &draft_system_prompt(&request.document_type),
            max_tokens::DRAFT,
            DEFAULT_TEMPERATURE,
        )?;

        Ok(DraftedDocument {
            title: format!("{} - {}", request.document_type, request.user_details.name),
            content,
            format: DRAFT_FORMAT.to_string(),
            download_url: None,
        })
    }
}

/// The fixed catalog of supported document templates.
pub fn templates() -> Vec<DocumentTemplate> {
    let template = |name: &str, description: &str, fields: [&str; 3], typical_use: &str| {
        DocumentTemplate {
            name: name.to_string(),
            description: description.to_string(),
            required_fields: fields.iter().map(|f| f.to_string()).collect(),
            typical_use: typical_use.to_string(),
        }
    };

    vec![
        template(
            "Demand Letter",
            "Formal demand for payment or action",
            ["opposing_party", "amount_owed", "deadline"],
            "Debt collection, contract disputes",
        ),
        template(
            "Cease and Desist",
            "Request to stop specific behavior",
            ["opposing_party", "behavior_to_stop", "legal_basis"],
            "Harassment, copyright infringement",
        ),
        template(
            "Notice to Quit",
            "Eviction notice for tenants",
            ["tenant_name", "property_address", "violation_reason"],
            "Landlord-tenant disputes",
        ),
        template(
            "Small Claims Petition",
            "Filing for small claims court",
            ["defendant_name", "claim_amount", "claim_basis"],
            "Small monetary disputes",
        ),
        template(
            "Contract",
            "Basic service or agreement contract",
            ["parties", "terms", "payment_details"],
            "Service agreements, sales contracts",
        ),
    ]
}
