//! Structured-output parsing for model text.
//!
//! Models asked for JSON frequently wrap it in markdown fences or surround it
//! with prose. Parsing is an explicit fence-strip + deserialize step that
//! returns a tagged Result; callers decide whether a failure is fatal
//! (persona generation) or degraded (tactic analysis).

use crate::error::StructuredOutputError;
use serde::de::DeserializeOwned;

/// Strip a markdown code fence (with optional `json` language tag) from
/// around a structured payload. Text before the opening fence and after the
/// closing fence is discarded; unfenced input is returned trimmed.
pub fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(start) = trimmed.find("```") else {
        return trimmed;
    };

    let body = &trimmed[start + 3..];
    let body = body.strip_prefix("json").unwrap_or(body);
    let body = body.find("```").map_or(body, |end| &body[..end]);
    body.trim()
}

/// Fence-strip and deserialize model text into `T`.
pub fn parse_structured<T: DeserializeOwned>(raw: &str) -> Result<T, StructuredOutputError> {
    let payload = strip_code_fences(raw);
    serde_json::from_str(payload).map_err(|e| StructuredOutputError::new(e.to_string(), payload))
}
