//! Fixtures and a scripted provider transport shared by the roadmap tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::llm_client::{CallFailure, OutboundPayload, ProviderTransport};

pub const FAKE_ENDPOINT: &str = "https://provider.test/v1beta/models/fake:generateContent";

/// Wraps `text` in a minimal well-formed provider envelope.
pub fn envelope_with_text(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": { "parts": [{ "text": text }], "role": "model" },
            "finishReason": "STOP"
        }]
    })
}

/// A roadmap with `days` days, 5 tags and, optionally, one diagram directive on
/// `diagram_day`.
pub fn sample_roadmap_json(days: u32, diagram_day: Option<u32>) -> Value {
    let daily_plan: Vec<Value> = (1..=days)
        .map(|day| {
            let mut resources = vec![json!(format!("https://example.com/day-{day}"))];
            if diagram_day == Some(day) {
                resources.push(json!("DIAGRAM_PROMPT: component tree and props flow"));
            }
            json!({
                "day": day,
                "activities": [{
                    "title": format!("Day {day} activity"),
                    "description": "Work through the <strong>official</strong> tutorial.",
                    "resources": resources,
                    "isCompleted": false
                }]
            })
        })
        .collect();

    json!({
        "title": "React Foundations",
        "description": "A short path into React.",
        "dailyPlan": daily_plan,
        "tags": ["react", "javascript", "frontend", "components", "hooks"],
        "isPublic": true,
        "status": "published"
    })
}

/// Replays a fixed script of outcomes; the last entry repeats once the script
/// runs out. Rejections stand in for every transient failure.
pub struct ScriptedTransport {
    script: Vec<Result<String, (u16, String)>>,
    calls: AtomicUsize,
    payloads: Mutex<Vec<OutboundPayload>>,
}

impl ScriptedTransport {
    pub fn new(script: Vec<Result<String, (u16, String)>>) -> Self {
        assert!(!script.is_empty(), "script needs at least one outcome");
        Self {
            script,
            calls: AtomicUsize::new(0),
            payloads: Mutex::new(Vec::new()),
        }
    }

    pub fn always_ok(body: String) -> Self {
        Self::new(vec![Ok(body)])
    }

    pub fn always_rejecting(status: u16, body: &str) -> Self {
        Self::new(vec![Err((status, body.to_string()))])
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_payload(&self) -> Option<OutboundPayload> {
        self.payloads.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl ProviderTransport for ScriptedTransport {
    fn endpoint(&self) -> &str {
        FAKE_ENDPOINT
    }

    async fn send(&self, payload: &OutboundPayload) -> Result<String, CallFailure> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        self.payloads.lock().unwrap().push(payload.clone());

        match &self.script[call.min(self.script.len() - 1)] {
            Ok(body) => Ok(body.clone()),
            Err((status, body)) => Err(CallFailure::Rejection {
                status: *status,
                body: body.clone(),
            }),
        }
    }
}
