//! Request Builder — turns a `GenerationRequest` into the outbound payload.
//!
//! Pure and deterministic: identical requests produce identical payloads.

use serde_json::{json, Value};

use crate::llm_client::OutboundPayload;
use crate::roadmap::models::GenerationRequest;
use crate::roadmap::prompts::{DIAGRAM_DIRECTIVE_MARKER, REQUIRED_TAG_COUNT, ROADMAP_PROMPT_TEMPLATE};

pub fn build(request: &GenerationRequest) -> OutboundPayload {
    OutboundPayload::new(build_instructions(request), roadmap_schema())
}

/// Natural-language half of the contract.
pub fn build_instructions(request: &GenerationRequest) -> String {
    ROADMAP_PROMPT_TEMPLATE
        .replace("{subject}", request.subject.trim())
        .replace("{level}", &request.proficiency_level.to_string())
        .replace("{days}", &request.duration_days.to_string())
        .replace("{tag_count}", &REQUIRED_TAG_COUNT.to_string())
        .replace("{marker}", DIAGRAM_DIRECTIVE_MARKER)
}

/// Machine-checkable half of the contract, in the provider's OpenAPI-subset
/// schema dialect.
pub fn roadmap_schema() -> Value {
    let activity = json!({
        "type": "OBJECT",
        "properties": {
            "title": { "type": "STRING" },
            "description": { "type": "STRING" },
            "resources": { "type": "ARRAY", "items": { "type": "STRING" } },
            "isCompleted": { "type": "BOOLEAN" }
        },
        "required": ["title", "description", "resources", "isCompleted"]
    });

    let day_plan = json!({
        "type": "OBJECT",
        "properties": {
            "day": { "type": "INTEGER" },
            "activities": { "type": "ARRAY", "items": activity }
        },
        "required": ["day", "activities"]
    });

    json!({
        "type": "OBJECT",
        "properties": {
            "title": { "type": "STRING" },
            "description": { "type": "STRING" },
            "dailyPlan": { "type": "ARRAY", "items": day_plan },
            "tags": { "type": "ARRAY", "items": { "type": "STRING" } },
            "isPublic": { "type": "BOOLEAN" },
            "status": { "type": "STRING" }
        },
        "required": ["title", "description", "dailyPlan", "tags", "isPublic", "status"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roadmap::models::ProficiencyLevel;

    fn react_request() -> GenerationRequest {
        GenerationRequest::new("React", ProficiencyLevel::Beginner, 3)
    }

    fn required(schema: &Value) -> Vec<&str> {
        schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect()
    }

    #[test]
    fn test_instructions_encode_subject_level_and_day_count() {
        let text = build_instructions(&react_request());
        assert!(text.contains("3-day learning roadmap for \"React\""));
        assert!(text.contains("beginner learner"));
        assert!(text.contains("exactly 3 entries"));
    }

    #[test]
    fn test_instructions_carry_mandatory_rules_and_marker() {
        let text = build_instructions(&react_request());
        assert!(text.contains("exactly 5 short, lowercase topic tags"));
        assert!(text.contains("`isPublic` MUST be true"));
        assert!(text.contains("`status` MUST be \"published\""));
        assert!(text.contains("starts with exactly \"DIAGRAM_PROMPT: \""));
        for placeholder in ["{subject}", "{level}", "{days}", "{tag_count}", "{marker}"] {
            assert!(!text.contains(placeholder), "unfilled {placeholder}");
        }
    }

    #[test]
    fn test_build_is_deterministic() {
        assert_eq!(build(&react_request()), build(&react_request()));
    }

    #[test]
    fn test_payload_carries_instructions_and_schema() {
        let payload = build(&react_request());
        assert_eq!(payload.instructions(), build_instructions(&react_request()));
        assert_eq!(payload.generation_config.response_schema, roadmap_schema());
    }

    #[test]
    fn test_schema_requires_every_document_field() {
        let schema = roadmap_schema();
        assert_eq!(
            required(&schema),
            vec!["title", "description", "dailyPlan", "tags", "isPublic", "status"]
        );

        let day = &schema["properties"]["dailyPlan"]["items"];
        assert_eq!(required(day), vec!["day", "activities"]);
        assert_eq!(day["properties"]["day"]["type"], "INTEGER");

        let activity = &day["properties"]["activities"]["items"];
        assert_eq!(
            required(activity),
            vec!["title", "description", "resources", "isCompleted"]
        );
        assert_eq!(activity["properties"]["resources"]["items"]["type"], "STRING");
        assert_eq!(activity["properties"]["isCompleted"]["type"], "BOOLEAN");
    }
}
