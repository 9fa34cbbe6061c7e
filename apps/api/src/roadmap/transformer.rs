//! Content Transformer — rewrites diagram directives into static placeholder blocks.
//!
//! Image generation is disabled, so every `DIAGRAM_PROMPT: ...` resource becomes a
//! bordered note asking for the visual to be made by hand. All other resources,
//! including non-string and empty ones, pass through untouched. Never fails.

use tracing::info;

use crate::roadmap::models::{Resource, RoadmapDocument};
use crate::roadmap::prompts::{DIAGRAM_DIRECTIVE_MARKER, DIRECTIVE_PROTOCOL_VERSION};

/// Replace: {version}, {prompt}
const DIAGRAM_PLACEHOLDER_TEMPLATE: &str = concat!(
    r#"<div class="diagram-placeholder" data-directive-version="{version}" "#,
    r#"style="border: 2px dashed #94a3b8; border-radius: 8px; padding: 16px; margin: 12px 0; background: #f8fafc;">"#,
    r#"<p style="margin: 0 0 8px 0;"><strong>Diagram:</strong> {prompt}</p>"#,
    r#"<p style="margin: 0; font-size: 0.875em; color: #64748b;"><em>Automatic image generation is disabled. "#,
    r#"Please create this visual manually.</em></p>"#,
    r#"</div>"#
);

pub fn transform(mut document: RoadmapDocument) -> RoadmapDocument {
    for day in &mut document.daily_plan {
        for activity in &mut day.activities {
            for resource in &mut activity.resources {
                let Resource::Text(text) = resource else {
                    continue;
                };
                let replacement = diagram_prompt(text).map(|prompt| {
                    info!("Replacing diagram directive on day {}: {prompt:?}", day.day);
                    placeholder_html(prompt)
                });
                if let Some(html) = replacement {
                    *text = html;
                }
            }
        }
    }
    document
}

/// The free-text prompt of a diagram directive, or `None` for any other resource.
pub fn diagram_prompt(resource: &str) -> Option<&str> {
    resource.strip_prefix(DIAGRAM_DIRECTIVE_MARKER).map(str::trim)
}

pub fn placeholder_html(prompt: &str) -> String {
    DIAGRAM_PLACEHOLDER_TEMPLATE
        .replace("{version}", &DIRECTIVE_PROTOCOL_VERSION.to_string())
        .replace("{prompt}", &escape_html(prompt))
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roadmap::models::{Activity, DayPlan};
    use serde_json::json;

    fn activity(resources: Vec<Resource>) -> Activity {
        Activity {
            title: "Networking basics".to_string(),
            description: "Learn <strong>TCP</strong>".to_string(),
            resources,
            is_completed: false,
        }
    }

    fn document(days: Vec<DayPlan>) -> RoadmapDocument {
        RoadmapDocument {
            title: "Networks".to_string(),
            description: "Three days of networking".to_string(),
            daily_plan: days,
            tags: vec!["tcp".into(), "ip".into(), "udp".into(), "dns".into(), "http".into()],
            is_public: true,
            status: "published".to_string(),
        }
    }

    #[test]
    fn test_directive_is_replaced_and_everything_else_untouched() {
        let original = document(vec![
            DayPlan {
                day: 1,
                activities: vec![activity(vec!["https://example.com/rfc793".into()])],
            },
            DayPlan {
                day: 2,
                activities: vec![activity(vec![
                    "https://example.com/tcp".into(),
                    "DIAGRAM_PROMPT: flowchart of TCP handshake".into(),
                    "Stevens, TCP/IP Illustrated".into(),
                ])],
            },
        ]);

        let transformed = transform(original.clone());
        let resources = &transformed.daily_plan[1].activities[0].resources;

        assert_eq!(resources.len(), 3);
        assert_eq!(resources[0], original.daily_plan[1].activities[0].resources[0]);
        assert_eq!(resources[2], original.daily_plan[1].activities[0].resources[2]);

        let html = resources[1].as_text().unwrap();
        assert!(html.contains("flowchart of TCP handshake"));
        assert!(html.contains("Automatic image generation is disabled"));
        assert!(!html.contains(DIAGRAM_DIRECTIVE_MARKER));

        // Everything except the one resource is byte-identical.
        let mut expected = original;
        expected.daily_plan[1].activities[0].resources[1] = Resource::Text(html.to_string());
        assert_eq!(transformed, expected);
    }

    #[test]
    fn test_transform_is_idempotent() {
        let original = document(vec![DayPlan {
            day: 1,
            activities: vec![activity(vec![
                "DIAGRAM_PROMPT: OSI layers".into(),
                "DIAGRAM_PROMPT: packet routing".into(),
            ])],
        }]);

        let once = transform(original);
        let twice = transform(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_non_string_and_empty_resources_pass_through() {
        let resources = vec![
            Resource::Opaque(json!({"url": "https://x.dev"})),
            Resource::Opaque(json!(null)),
            Resource::from(""),
            Resource::from("diagram_prompt: lowercase is not a directive"),
            Resource::from(" DIAGRAM_PROMPT: leading space is not a directive"),
        ];
        let original = document(vec![DayPlan {
            day: 1,
            activities: vec![activity(resources)],
        }]);

        assert_eq!(transform(original.clone()), original);
    }

    #[test]
    fn test_diagram_prompt_strips_marker_and_whitespace() {
        assert_eq!(
            diagram_prompt("DIAGRAM_PROMPT:   event loop phases  "),
            Some("event loop phases")
        );
        assert_eq!(diagram_prompt("https://example.com"), None);
    }

    #[test]
    fn test_placeholder_escapes_markup_in_prompt() {
        let html = placeholder_html("a <script> & \"quotes\"");
        assert!(html.contains("a &lt;script&gt; &amp; &quot;quotes&quot;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_placeholder_carries_directive_version() {
        let html = placeholder_html("x");
        assert!(html.contains(&format!(
            "data-directive-version=\"{DIRECTIVE_PROTOCOL_VERSION}\""
        )));
    }

    #[test]
    fn test_empty_document_is_returned_unchanged() {
        let original = document(vec![]);
        assert_eq!(transform(original.clone()), original);
    }
}
