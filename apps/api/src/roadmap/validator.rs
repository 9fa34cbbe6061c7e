//! Response Validator — extracts the embedded roadmap JSON from a provider envelope.
//!
//! The envelope walk is sequential and stops at the first missing link:
//! `candidates[0]` → `.content` → `.parts[0]` → non-empty `.text`. Only that path
//! is inspected; sibling candidates and parts may hold anything.
//!
//! The text must be syntactically valid JSON. Its fields are then decoded
//! leniently, so a mistyped activity degrades to defaults instead of failing
//! the roadmap.
//!
//! Day count and tag count are NOT enforced here. `shape_warnings` only reports
//! mismatches so the generator can log them.

use serde_json::Value;
use thiserror::Error;
use tracing::{error, warn};

use crate::roadmap::models::{GenerationRequest, RoadmapDocument, PUBLISHED_STATUS};
use crate::roadmap::prompts::REQUIRED_TAG_COUNT;

/// Upper bound on the envelope dump carried in errors and logs.
const DUMP_LIMIT: usize = 2048;

/// Contract violations by the provider. Never retried.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("malformed provider envelope, missing {missing}: {dump}")]
    MalformedEnvelope { missing: &'static str, dump: String },

    #[error("provider text is not valid roadmap JSON: {0}")]
    MalformedJson(#[source] serde_json::Error),
}

/// Validates a raw 2xx response body. A body that is not JSON at all is a
/// malformed envelope.
pub fn validate_body(body: &str) -> Result<RoadmapDocument, ValidationError> {
    match serde_json::from_str::<Value>(body) {
        Ok(envelope) => validate(&envelope),
        Err(_) => Err(malformed_envelope("a JSON body", truncate(body))),
    }
}

pub fn validate(envelope: &Value) -> Result<RoadmapDocument, ValidationError> {
    let text = extract_text(envelope)?;

    let value = serde_json::from_str::<Value>(text).map_err(|e| {
        error!("Provider text failed to parse as roadmap JSON: {e}");
        ValidationError::MalformedJson(e)
    })?;

    if !value.is_object() {
        warn!("Provider text is JSON but not an object; returning an empty roadmap");
    }
    Ok(RoadmapDocument::from_value_lenient(value))
}

fn extract_text(envelope: &Value) -> Result<&str, ValidationError> {
    let dump = || truncate(&envelope.to_string());

    let candidate = envelope
        .get("candidates")
        .and_then(Value::as_array)
        .and_then(|candidates| candidates.first())
        .ok_or_else(|| malformed_envelope("candidates[0]", dump()))?;

    let content = candidate
        .get("content")
        .filter(|content| !content.is_null())
        .ok_or_else(|| malformed_envelope("candidates[0].content", dump()))?;

    let part = content
        .get("parts")
        .and_then(Value::as_array)
        .and_then(|parts| parts.first())
        .ok_or_else(|| malformed_envelope("candidates[0].content.parts[0]", dump()))?;

    match part.get("text").and_then(Value::as_str) {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(malformed_envelope(
            "candidates[0].content.parts[0].text",
            dump(),
        )),
    }
}

fn malformed_envelope(missing: &'static str, dump: String) -> ValidationError {
    error!("Malformed provider envelope, missing {missing}: {dump}");
    ValidationError::MalformedEnvelope { missing, dump }
}

fn truncate(text: &str) -> String {
    if text.len() <= DUMP_LIMIT {
        return text.to_string();
    }
    let mut end = DUMP_LIMIT;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}… ({} bytes total)", &text[..end], text.len())
}

/// Reports where a document departs from what the provider was instructed to
/// produce. Informational only; the document is returned as-is.
pub fn shape_warnings(document: &RoadmapDocument, request: &GenerationRequest) -> Vec<String> {
    let mut warnings = Vec::new();

    if document.daily_plan.len() != request.duration_days as usize {
        warnings.push(format!(
            "dailyPlan has {} day(s), requested {}",
            document.daily_plan.len(),
            request.duration_days
        ));
    }
    if document.tags.len() != REQUIRED_TAG_COUNT {
        warnings.push(format!(
            "tags has {} entries, expected {}",
            document.tags.len(),
            REQUIRED_TAG_COUNT
        ));
    }
    for (index, day) in document.daily_plan.iter().enumerate() {
        if day.day as usize != index + 1 {
            warnings.push(format!(
                "dailyPlan[{index}] is numbered day {}, expected {}",
                day.day,
                index + 1
            ));
        }
    }
    if !document.is_public {
        warnings.push("isPublic is false, expected true".to_string());
    }
    if document.status != PUBLISHED_STATUS {
        warnings.push(format!(
            "status is {:?}, expected {:?}",
            document.status, PUBLISHED_STATUS
        ));
    }

    warnings
}
