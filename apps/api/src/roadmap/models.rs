//! Roadmap data model: the generation request and the document returned to callers.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Learner proficiency. Serialized lowercase on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProficiencyLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl fmt::Display for ProficiencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ProficiencyLevel::Beginner => "beginner",
            ProficiencyLevel::Intermediate => "intermediate",
            ProficiencyLevel::Advanced => "advanced",
        };
        f.write_str(label)
    }
}

/// Input to the pipeline. Built once per call and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub subject: String,
    pub proficiency_level: ProficiencyLevel,
    pub duration_days: u32,
}

#[cfg(test)]
impl GenerationRequest {
    pub fn new(
        subject: impl Into<String>,
        proficiency_level: ProficiencyLevel,
        duration_days: u32,
    ) -> Self {
        Self {
            subject: subject.into(),
            proficiency_level,
            duration_days,
        }
    }
}

/// The finished roadmap. Ownership passes entirely to the caller.
///
/// Decoding is lenient: a field that is missing or of the wrong type takes its
/// default instead of failing the whole document, so one malformed activity
/// never aborts a roadmap. Defaults mirror the values the provider is
/// instructed to emit, so an omitted `isPublic` or `status` decodes to the
/// mandatory value. `validator::shape_warnings` reports what was off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapDocument {
    #[serde(default, deserialize_with = "lenient")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_seq")]
    pub daily_plan: Vec<DayPlan>,
    /// Expected to hold exactly 5 entries; only instructed, not enforced.
    #[serde(default, deserialize_with = "lenient_seq")]
    pub tags: Vec<String>,
    #[serde(default = "default_is_public", deserialize_with = "lenient_is_public")]
    pub is_public: bool,
    #[serde(default = "default_status", deserialize_with = "lenient_status")]
    pub status: String,
}

impl Default for RoadmapDocument {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            daily_plan: Vec::new(),
            tags: Vec::new(),
            is_public: default_is_public(),
            status: default_status(),
        }
    }
}

impl RoadmapDocument {
    /// Builds a document from any JSON value. Never fails; a value that is not
    /// an object yields an empty document.
    pub fn from_value_lenient(value: Value) -> Self {
        if !value.is_object() {
            return Self::default();
        }
        serde_json::from_value(value).unwrap_or_default()
    }
}

pub const PUBLISHED_STATUS: &str = "published";

fn default_is_public() -> bool {
    true
}

fn default_status() -> String {
    PUBLISHED_STATUS.to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayPlan {
    /// 0 when the provider omitted or mistyped it.
    #[serde(default, deserialize_with = "lenient")]
    pub day: u32,
    #[serde(default, deserialize_with = "lenient_seq")]
    pub activities: Vec<Activity>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    #[serde(default, deserialize_with = "lenient")]
    pub title: String,
    /// May embed limited inline markup.
    #[serde(default, deserialize_with = "lenient")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_resources")]
    pub resources: Vec<Resource>,
    #[serde(default, deserialize_with = "lenient")]
    pub is_completed: bool,
}

/// One entry of `Activity::resources`.
///
/// Text entries are citations, URLs, diagram directives or (after transformation)
/// placeholder HTML. Anything else the provider emits is kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Resource {
    Text(String),
    Opaque(Value),
}

impl From<Value> for Resource {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => Resource::Text(text),
            other => Resource::Opaque(other),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Lenient field decoders
// ────────────────────────────────────────────────────────────────────────────

/// Decodes `T`, falling back to `T::default()` when the value has the wrong shape.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Decodes each array element independently; a non-array yields an empty vec.
fn lenient_seq<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let items = match Value::deserialize(deserializer)? {
        Value::Array(items) => items,
        _ => return Ok(Vec::new()),
    };
    Ok(items
        .into_iter()
        .map(|item| serde_json::from_value(item).unwrap_or_default())
        .collect())
}

/// Keeps every resource; a lone non-array value becomes a single entry.
fn lenient_resources<'de, D>(deserializer: D) -> Result<Vec<Resource>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items.into_iter().map(Resource::from).collect(),
        Value::Null => Vec::new(),
        other => vec![Resource::from(other)],
    })
}

fn lenient_is_public<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Value::deserialize(deserializer)?
        .as_bool()
        .unwrap_or_else(default_is_public))
}

fn lenient_status<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(status) => status,
        _ => default_status(),
    })
}

#[cfg(test)]
impl Resource {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Resource::Text(text) => Some(text),
            Resource::Opaque(_) => None,
        }
    }
}

#[cfg(test)]
impl From<&str> for Resource {
    fn from(text: &str) -> Self {
        Resource::Text(text.to_string())
    }
}
