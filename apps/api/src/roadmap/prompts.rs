// All LLM prompt constants for the Roadmap module.
// Reuses the JSON-only system instruction from llm_client::prompts.

/// Prefix that marks a resource entry as a diagram request instead of a citation.
///
/// Shared wire convention between the request builder (which tells the provider
/// to emit it) and the transformer (which rewrites it). Bump
/// `DIRECTIVE_PROTOCOL_VERSION` when either side changes its handling.
pub const DIAGRAM_DIRECTIVE_MARKER: &str = "DIAGRAM_PROMPT: ";
pub const DIRECTIVE_PROTOCOL_VERSION: u32 = 1;

/// Number of tags every roadmap must carry.
pub const REQUIRED_TAG_COUNT: usize = 5;

/// Roadmap generation prompt template.
/// Replace: {subject}, {level}, {days}, {tag_count}, {marker}
pub const ROADMAP_PROMPT_TEMPLATE: &str = r#"Create a detailed {days}-day learning roadmap for "{subject}" aimed at a {level} learner.

Return a JSON object with this EXACT shape (no extra fields):
{
  "title": "Concise roadmap title",
  "description": "Two or three sentences describing what the learner will achieve",
  "dailyPlan": [
    {
      "day": 1,
      "activities": [
        {
          "title": "Activity title",
          "description": "What to do and why. Limited inline markup (<strong>, <em>, <code>) is allowed.",
          "resources": ["https://example.com/official-docs", "Book or article citation"],
          "isCompleted": false
        }
      ]
    }
  ],
  "tags": ["tag1", "tag2", "tag3", "tag4", "tag5"],
  "isPublic": true,
  "status": "published"
}

HARD RULES:
1. `dailyPlan` MUST contain exactly {days} entries, numbered `day` 1 through {days} in order
2. Every day MUST contain at least one activity, and every activity MUST have `title`, `description`, `resources` and `isCompleted`
3. `isCompleted` MUST be false for every activity
4. `tags` MUST contain exactly {tag_count} short, lowercase topic tags
5. `isPublic` MUST be true and `status` MUST be "published"
6. Pitch the depth and pace of every activity at the {level} level
7. Resources are plain strings: URLs to reputable sources or short citations

DIAGRAMS:
If an activity would benefit from a visual diagram, add a resource string that starts with exactly "{marker}" followed by a plain-text description of the diagram to draw, e.g. "{marker}flowchart of the request lifecycle".
Do NOT emit images, image URLs, SVG or diagram markup of any kind."#;
