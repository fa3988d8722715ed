use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserDetails {
    pub name: String,
    pub address: String,
    pub opposing_party: String,
    pub facts: String,
    #[serde(default)]
    pub additional_info: Option<String>,
    #[serde(default)]
    pub tenant_name: Option<String>,
    #[serde(default)]
    pub landlord_name: Option<String>,
    #[serde(default)]
    pub amount: Option<String>,
    #[serde(default)]
    pub issue: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DraftRequest {
    pub document_type: String,
    pub case_summary: String,
    pub user_details: UserDetails,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DraftedDocument {
    #[serde(rename = "doc_title")]
    pub title: String,
    #[serde(rename = "doc_content")]
    pub content: String,
    pub format: String,
    pub download_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentTemplate {
    pub name: String,
    pub description: String,
    pub required_fields: Vec<String>,
    pub typical_use: String,
}
