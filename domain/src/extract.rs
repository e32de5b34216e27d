//! JSON payload extraction from model responses.
//!
//! Model text arrives as prose wrapped around a JSON document, either inside
//! a fenced ```json block or as a bare top-level object. [`extract_json_payload`]
//! is the single place where that text becomes a [`serde_json::Value`]; role
//! parsing and permission parsing both go through it, so a malformed response
//! fails the same way everywhere.

use serde_json::Value;
use thiserror::Error;

/// Errors raised while locating or decoding the JSON payload
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("response carries no JSON payload")]
    NoPayload,

    #[error("JSON payload is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Extract and decode the JSON document embedded in a model response.
///
/// A fenced ```json block takes precedence. Without one, the span from the
/// first `{` to the last `}` is decoded. There is no second attempt: a fenced
/// block that fails to decode is an error, not a fallback to the brace scan.
pub fn extract_json_payload(response: &str) -> Result<Value, ExtractError> {
    if let Some(block) = fenced_json_block(response) {
        return Ok(serde_json::from_str(block)?);
    }
    match brace_span(response) {
        Some(span) => Ok(serde_json::from_str(span)?),
        None => Err(ExtractError::NoPayload),
    }
}

/// The contents of the first closed ```json fence, if any.
fn fenced_json_block(response: &str) -> Option<&str> {
    let start = response.find("```json")? + "```json".len();
    let rest = &response[start..];
    let end = rest.find("```")?;
    Some(rest[..end].trim())
}

/// The span from the first `{` to the last `}`.
fn brace_span(response: &str) -> Option<&str> {
    let start = response.find('{')?;
    let end = response.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&response[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_fenced_block() {
        let response = "Here you go:\n```json\n{\"roles\": []}\n```\nDone.";
        let value = extract_json_payload(response).unwrap();
        assert!(value.get("roles").is_some());
    }

    #[test]
    fn extracts_bare_object() {
        let response = r#"{"permissions": {"a": ["b"]}}"#;
        let value = extract_json_payload(response).unwrap();
        assert!(value.get("permissions").is_some());
    }

    #[test]
    fn extracts_object_surrounded_by_prose() {
        let response = "Sure, here is the plan: {\"score\": 7} hope that helps";
        let value = extract_json_payload(response).unwrap();
        assert_eq!(value["score"], 7);
    }

    #[test]
    fn fence_takes_precedence_over_outer_braces() {
        let response = "{not json} ```json\n{\"inner\": true}\n``` {also not}";
        let value = extract_json_payload(response).unwrap();
        assert_eq!(value["inner"], true);
    }

    #[test]
    fn no_payload_is_an_error() {
        let err = extract_json_payload("no structured content here").unwrap_err();
        assert!(matches!(err, ExtractError::NoPayload));
    }

    #[test]
    fn malformed_fenced_block_is_an_error() {
        let response = "```json\n{\"roles\": [,]}\n```";
        let err = extract_json_payload(response).unwrap_err();
        assert!(matches!(err, ExtractError::Malformed(_)));
    }

    #[test]
    fn unclosed_fence_falls_back_to_brace_scan() {
        let response = "```json\n{\"roles\": []}";
        let value = extract_json_payload(response).unwrap();
        assert!(value["roles"].as_array().is_some_and(|a| a.is_empty()));
    }
}
