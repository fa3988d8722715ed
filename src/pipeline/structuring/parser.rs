use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::StructuringError;

/// A decoded JSON object carved out of a model reply.
pub type ParsedAnalysis = Map<String, Value>;

/// Locates the structured payload inside a free-form model reply.
pub trait PayloadExtractor: Send + Sync {
    /// The candidate payload text, or `None` when the reply carries none.
    fn locate<'a>(&self, reply: &'a str) -> Option<&'a str>;
}

/// Span from the first `{` to the last `}` in the reply.
///
/// Nested objects stay whole. Two separate objects in one reply produce a
/// span that does not decode (`MalformedPayload`).
pub struct BraceSpanExtractor;

impl PayloadExtractor for BraceSpanExtractor {
    fn locate<'a>(&self, reply: &'a str) -> Option<&'a str> {
        let start = reply.find('{')?;
        let end = reply.rfind('}')?;
        if end < start {
            return None;
        }
        Some(&reply[start..=end])
    }
}

/// Body of the first ```` ```json ```` fenced block.
pub struct FencedJsonExtractor;

impl PayloadExtractor for FencedJsonExtractor {
    fn locate<'a>(&self, reply: &'a str) -> Option<&'a str> {
        let fence_start = reply.find("```json")?;
        let content_start = fence_start + "```json".len();
        let content_len = reply[content_start..].find("```")?;
        Some(reply[content_start..content_start + content_len].trim())
    }
}

/// Carve the structured payload out of `reply` with the brace-span rule.
pub fn extract_structured(reply: &str) -> Result<ParsedAnalysis, StructuringError> {
    extract_with(&BraceSpanExtractor, reply)
}

pub fn extract_with(
    extractor: &dyn PayloadExtractor,
    reply: &str,
) -> Result<ParsedAnalysis, StructuringError> {
    let span = extractor
        .locate(reply)
        .ok_or(StructuringError::NoStructuredPayload)?;

    match serde_json::from_str::<Value>(span) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(StructuringError::MalformedPayload(format!(
            "expected a JSON object, found {}",
            json_kind(&other)
        ))),
        Err(e) => Err(StructuringError::MalformedPayload(e.to_string())),
    }
}

/// Decode a parsed payload into a typed record; shape mismatches are `MalformedPayload`.
pub fn decode_payload<T: DeserializeOwned>(payload: ParsedAnalysis) -> Result<T, StructuringError> {
    serde_json::from_value(Value::Object(payload))
        .map_err(|e| StructuringError::MalformedPayload(e.to_string()))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[test]
    fn object_embedded_in_prose() {
        let reply = r#"Here is the analysis you asked for:
{"summary": "Tenant dispute", "score": 72}
Let me know if you need more."#;

        let parsed = extract_structured(reply).unwrap();
        assert_eq!(parsed["summary"], "Tenant dispute");
        assert_eq!(parsed["score"], 72);
    }

    #[test]
    fn nested_objects_kept_whole() {
        let reply = r#"{"timeline": [{"step": "File", "due_date": "2025-01-01"}], "meta": {"a": 1}}"#;
        let parsed = extract_structured(reply).unwrap();
        assert_eq!(parsed["timeline"][0]["step"], "File");
        assert_eq!(parsed["meta"]["a"], 1);
    }

    #[test]
    fn no_braces_is_no_payload() {
        let err = extract_structured("I cannot help with that.").unwrap_err();
        assert!(matches!(err, StructuringError::NoStructuredPayload));
    }

    #[test]
    fn only_opening_brace_is_no_payload() {
        let err = extract_structured("Result: { incomplete").unwrap_err();
        assert!(matches!(err, StructuringError::NoStructuredPayload));
    }

    #[test]
    fn closing_before_opening_is_no_payload() {
        let err = extract_structured("} backwards {").unwrap_err();
        assert!(matches!(err, StructuringError::NoStructuredPayload));
    }

    #[test]
    fn invalid_json_in_span_is_malformed() {
        let err = extract_structured("{summary: 'single quotes'}").unwrap_err();
        assert!(matches!(err, StructuringError::MalformedPayload(_)));
    }

    #[test]
    fn two_objects_yield_malformed_span() {
        let err = extract_structured(r#"{"a": 1} and also {"b": 2}"#).unwrap_err();
        assert!(matches!(err, StructuringError::MalformedPayload(_)));
    }

    #[test]
    fn empty_object_is_valid() {
        let parsed = extract_structured("Nothing found: {}").unwrap();
        assert!(parsed.is_empty());
    }

    #[test]
    fn fenced_extractor_reads_json_block() {
        let reply = "Intro {not this}\n```json\n{\"summary\": \"fenced\"}\n```\nOutro";
        let parsed = extract_with(&FencedJsonExtractor, reply).unwrap();
        assert_eq!(parsed["summary"], "fenced");
    }

    #[test]
    fn fenced_extractor_without_block_is_no_payload() {
        let err = extract_with(&FencedJsonExtractor, r#"{"summary": "bare"}"#).unwrap_err();
        assert!(matches!(err, StructuringError::NoStructuredPayload));
    }

    #[test]
    fn fenced_array_is_malformed_not_object() {
        let err = extract_with(&FencedJsonExtractor, "```json\n[1, 2]\n```").unwrap_err();
        match err {
            StructuringError::MalformedPayload(msg) => assert!(msg.contains("an array")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn decode_payload_into_typed_record() {
        #[derive(Deserialize)]
        struct Finding {
            summary: String,
        }

        let parsed = extract_structured(r#"{"summary": "ok", "extra": true}"#).unwrap();
        let finding: Finding = decode_payload(parsed).unwrap();
        assert_eq!(finding.summary, "ok");
    }

    #[test]
    fn decode_payload_shape_mismatch_is_malformed() {
        #[derive(Debug, Deserialize)]
        #[allow(dead_code)]
        struct Finding {
            summary: String,
        }

        let parsed = extract_structured(r#"{"summary": 5}"#).unwrap();
        let err = decode_payload::<Finding>(parsed).unwrap_err();
        assert!(matches!(err, StructuringError::MalformedPayload(_)));
    }
}
