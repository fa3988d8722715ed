use super::StructuringError;
use crate::models::{CaseInput, DraftRequest};

/// Characters of extracted text carried into the legal-summary prompt.
pub const SUMMARY_EXCERPT_CHARS: usize = 2000;

/// Characters of text the document-type classifier looks at.
pub const CLASSIFY_EXCERPT_CHARS: usize = 1500;

pub const DOCUMENT_ANALYSIS_SYSTEM_PROMPT: &str = "\
You are a legal document analyzer. Analyze the provided text and extract:
1. Document type (lease, notice, contract, etc.)
2. Key parties involved
3. Important dates
4. Legal issues or concerns
5. Recommended actions

Return your analysis in a structured format.";

pub const LEGAL_SUMMARY_SYSTEM_PROMPT: &str = "\
You are a legal document analyzer. Based on the document text, provide:
1. A clear legal summary of what this document contains
2. A list of recommended actions the user should take
3. Important deadlines or dates mentioned
4. Key legal issues or concerns

Be practical and actionable in your recommendations.";

pub const DOCUMENT_TYPE_SYSTEM_PROMPT: &str = "\
Analyze this legal document and determine:
1. Document type (lease, notice, contract, summons, etc.)
2. Key parties involved
3. Important dates and deadlines
4. Legal significance
5. Urgency level (Low/Medium/High)

Return analysis in a structured format.";

pub const CASE_ANALYSIS_SYSTEM_PROMPT: &str = r#"
You are a legal AI assistant. Based on the user's prompt, legal profile,
and any provided document text, generate a comprehensive case analysis.
The output should be a JSON object with the following structure:
{
    "summary": "A brief summary of the case.",
    "score": "An integer score from 1-100 representing the case's strength.",
    "strengths": ["List of strengths of the case."],
    "weaknesses": ["List of weaknesses of the case."],
    "followup_questions": ["List of questions to ask the user for more information."],
    "recommended_court": "The recommended court for this case.",
    "gameplan": ["A list of steps to take."],
    "timeline": [
        {"step": "Step 1", "due_date": "YYYY-MM-DD"},
        {"step": "Step 2", "due_date": "YYYY-MM-DD"}
    ],
    "chat_response": "A response to the user's message, if provided."
}
"#;

/// First `max_chars` characters of `text`, never splitting a character.
pub fn excerpt(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

pub fn build_document_analysis_prompt(text: &str) -> String {
    format!("Analyze this legal document:\n\n{text}")
}

/// Second-pass prompt: the first analysis plus the opening of the document.
pub fn build_legal_summary_prompt(analysis: &str, extracted_text: &str) -> String {
    let opening = excerpt(extracted_text, SUMMARY_EXCERPT_CHARS);
    format!(
        "Document Analysis:\n{analysis}\n\n\
         Extracted Text:\n{opening}...\n\n\
         Provide a legal summary and recommended actions."
    )
}

pub fn build_document_type_prompt(text: &str) -> String {
    format!(
        "Analyze this document:\n\n{}",
        excerpt(text, CLASSIFY_EXCERPT_CHARS)
    )
}

pub fn build_case_prompt(input: &CaseInput) -> Result<String, StructuringError> {
    let profile = serde_json::to_string(&input.legal_profile)
        .map_err(|e| StructuringError::RequestEncoding(e.to_string()))?;
    Ok(format!(
        "User Prompt: {}\n\
         Legal Profile: {}\n\
         Document Text: {}\n\
         User Message: {}",
        input.prompt,
        profile,
        input.doc_text.as_deref().unwrap_or("Not provided"),
        input.message.as_deref().unwrap_or("Not provided"),
    ))
}

pub fn draft_system_prompt(document_type: &str) -> String {
    format!(
        "You are a legal document generator. Create a professional {document_type} \
         based on the provided information. The document should be:
1. Professionally formatted
2. Include all necessary legal language
3. Be specific to the case details
4. Include proper sender/recipient information
5. Be actionable and clear

Do not include placeholder text - use the actual information provided."
    )
}

pub fn build_draft_prompt(request: &DraftRequest) -> String {
    let details = &request.user_details;
    format!(
        "Document Type: {}\n\
         Case Summary: {}\n\n\
         Client Information:\n\
         Name: {}\n\
         Address: {}\n\n\
         Opposing Party: {}\n\
         Case Facts: {}\n\
         Additional Info: {}\n\n\
         Generate a complete, professional legal document.",
        request.document_type,
        request.case_summary,
        details.name,
        details.address,
        details.opposing_party,
        details.facts,
        details.additional_info.as_deref().unwrap_or("None"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LegalProfile, UserDetails};

    #[test]
    fn excerpt_counts_characters_not_bytes() {
        let text = "é".repeat(10);
        assert_eq!(excerpt(&text, 3), "ééé");
        assert_eq!(excerpt(&text, 3).len(), 6);
    }

    #[test]
    fn excerpt_shorter_text_returned_whole() {
        assert_eq!(excerpt("short", 2000), "short");
        assert_eq!(excerpt("", 10), "");
    }

    #[test]
    fn summary_prompt_carries_analysis_and_capped_excerpt() {
        let text = format!("{}{}", "a".repeat(SUMMARY_EXCERPT_CHARS), "TAIL");
        let prompt = build_legal_summary_prompt("Lease dispute", &text);

        assert!(prompt.contains("Document Analysis:\nLease dispute"));
        assert!(prompt.contains(&format!("{}...", "a".repeat(SUMMARY_EXCERPT_CHARS))));
        assert!(!prompt.contains("TAIL"));
    }

    #[test]
    fn document_type_prompt_uses_first_1500_chars() {
        let text = format!("{}{}", "b".repeat(CLASSIFY_EXCERPT_CHARS), "HIDDEN");
        let prompt = build_document_type_prompt(&text);
        assert!(prompt.starts_with("Analyze this document:\n\n"));
        assert!(!prompt.contains("HIDDEN"));
    }

    #[test]
    fn case_prompt_fills_missing_fields() {
        let input = CaseInput {
            prompt: "Landlord kept my deposit".into(),
            legal_profile: LegalProfile {
                name: "Jane Doe".into(),
                state: "CA".into(),
                case_type: "landlord_tenant".into(),
            },
            doc_text: None,
            message: None,
        };
        let prompt = build_case_prompt(&input).unwrap();

        assert!(prompt.contains("User Prompt: Landlord kept my deposit"));
        assert!(prompt.contains(r#""state":"CA""#));
        assert!(prompt.contains("Document Text: Not provided"));
        assert!(prompt.contains("User Message: Not provided"));
    }

    #[test]
    fn draft_prompts_name_document_type_and_parties() {
        let request = DraftRequest {
            document_type: "Demand Letter".into(),
            case_summary: "Unpaid invoice".into(),
            user_details: UserDetails {
                name: "Acme LLC".into(),
                address: "1 Main St".into(),
                opposing_party: "Beta Corp".into(),
                facts: "Invoice 42 unpaid for 90 days".into(),
                additional_info: None,
                tenant_name: None,
                landlord_name: None,
                amount: None,
                issue: None,
            },
        };

        assert!(draft_system_prompt(&request.document_type).contains("professional Demand Letter"));
        let prompt = build_draft_prompt(&request);
        assert!(prompt.contains("Opposing Party: Beta Corp"));
        assert!(prompt.contains("Additional Info: None"));
    }
}
