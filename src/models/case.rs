use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LegalProfile {
    pub name: String,
    pub state: String,
    pub case_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CaseInput {
    pub prompt: String,
    pub legal_profile: LegalProfile,
    pub doc_text: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimelineStep {
    pub step: String,
    pub due_date: String,
    #[serde(default = "default_step_status")]
    pub status: String,
    #[serde(default)]
    pub description: Option<String>,
}

fn default_step_status() -> String {
    "pending".to_string()
}

/// Structured case assessment decoded from the model's JSON reply.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CaseAnalysis {
    pub summary: String,
    #[serde(deserialize_with = "deserialize_score")]
    pub score: i64,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub followup_questions: Vec<String>,
    pub recommended_court: String,
    pub gameplan: Vec<String>,
    pub timeline: Vec<TimelineStep>,
    #[serde(default)]
    pub chat_response: Option<String>,
}

/// Models often quote the score ("72"); accept both forms.
fn deserialize_score<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawScore {
        Int(i64),
        Text(String),
    }

    match RawScore::deserialize(deserializer)? {
        RawScore::Int(n) => Ok(n),
        RawScore::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("score is not an integer: {s:?}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analysis_json(score: &str) -> String {
        format!(
            r#"{{
                "summary": "Security deposit withheld",
                "score": {score},
                "strengths": ["Written lease"],
                "weaknesses": ["No move-out photos"],
                "followup_questions": ["When did you move out?"],
                "recommended_court": "Small Claims",
                "gameplan": ["Send demand letter"],
                "timeline": [{{"step": "Demand letter", "due_date": "2025-02-01"}}]
            }}"#
        )
    }

    #[test]
    fn integer_score_accepted() {
        let analysis: CaseAnalysis = serde_json::from_str(&analysis_json("72")).unwrap();
        assert_eq!(analysis.score, 72);
        assert_eq!(analysis.chat_response, None);
    }

    #[test]
    fn quoted_score_accepted() {
        let analysis: CaseAnalysis = serde_json::from_str(&analysis_json(r#"" 64 ""#)).unwrap();
        assert_eq!(analysis.score, 64);
    }

    #[test]
    fn non_numeric_score_rejected() {
        let result = serde_json::from_str::<CaseAnalysis>(&analysis_json(r#""high""#));
        assert!(result.is_err());
    }

    #[test]
    fn timeline_step_defaults_to_pending() {
        let analysis: CaseAnalysis = serde_json::from_str(&analysis_json("50")).unwrap();
        assert_eq!(analysis.timeline[0].status, "pending");
        assert_eq!(analysis.timeline[0].description, None);
    }
}
