/// LLM Client — the single point of entry for all Gemini API calls.
///
/// ARCHITECTURAL RULE: No other module may call the generation endpoint directly.
/// All provider traffic MUST go through a `ProviderTransport`.
///
/// The API key travels as the `key` query parameter and is never part of a log
/// line, an error message or a `Debug` dump.
use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

pub mod prompts;
pub mod retry;

/// Default `generateContent` endpoint. Overridable through configuration.
pub const DEFAULT_GEMINI_API_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent";
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(120);
const REDACTED: &str = "[REDACTED]";

/// Failure of a single provider call. Both variants are transient and retried.
#[derive(Debug, Error)]
pub enum CallFailure {
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("provider rejected request (status {status}): {body}")]
    Rejection { status: u16, body: String },
}

impl From<reqwest::Error> for CallFailure {
    fn from(error: reqwest::Error) -> Self {
        // The request URL carries the API key.
        CallFailure::Transport(error.without_url())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Outbound wire format
// ────────────────────────────────────────────────────────────────────────────

/// JSON body of a `generateContent` call: instruction text plus response schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundPayload {
    pub system_instruction: Content,
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Content {
    pub parts: Vec<TextPart>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextPart {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_mime_type: String,
    pub response_schema: Value,
}

impl OutboundPayload {
    pub fn new(instructions: String, response_schema: Value) -> Self {
        Self {
            system_instruction: Content {
                parts: vec![TextPart {
                    text: prompts::JSON_ONLY_SYSTEM.to_string(),
                }],
            },
            contents: vec![Content {
                parts: vec![TextPart { text: instructions }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema,
            },
        }
    }

    /// The natural-language instruction block sent as the user turn.
    pub fn instructions(&self) -> &str {
        self.contents
            .first()
            .and_then(|c| c.parts.first())
            .map(|p| p.text.as_str())
            .unwrap_or_default()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Transport
// ────────────────────────────────────────────────────────────────────────────

/// One network round trip to the generation endpoint.
///
/// Returns the raw response body on a 2xx status. Implemented by [`LlmClient`];
/// tests inject scripted transports instead.
#[async_trait]
pub trait ProviderTransport: Send + Sync {
    /// Endpoint without query string, safe to log.
    fn endpoint(&self) -> &str;

    async fn send(&self, payload: &OutboundPayload) -> Result<String, CallFailure>;
}

/// The Gemini client used by the roadmap generator.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl fmt::Debug for LlmClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmClient")
            .field("endpoint", &self.endpoint)
            .field("api_key", &REDACTED)
            .finish()
    }
}

impl LlmClient {
    /// An empty `api_key` is accepted; the provider rejects it and the failure
    /// takes the normal retry path.
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        })
    }

    /// Replaces any occurrence of the API key in provider-supplied text.
    fn redact(&self, text: String) -> String {
        if self.api_key.is_empty() || !text.contains(&self.api_key) {
            return text;
        }
        text.replace(&self.api_key, REDACTED)
    }
}

#[async_trait]
impl ProviderTransport for LlmClient {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn send(&self, payload: &OutboundPayload) -> Result<String, CallFailure> {
        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .header(CONTENT_TYPE, "application/json")
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(CallFailure::Rejection {
                status: status.as_u16(),
                body: self.redact(body),
            });
        }

        debug!(
            "Generation call to {} succeeded: {} bytes",
            self.endpoint,
            body.len()
        );
        Ok(body)
    }
}
