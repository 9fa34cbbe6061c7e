//! Roadmap Generation — orchestrates the full pipeline.
//!
//! Flow: build payload → call provider with retry → validate envelope →
//!       flag shape mismatches → rewrite diagram directives → return document.
//!
//! Nothing is persisted or cached; each call is independent and safe to run
//! concurrently with others.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::llm_client::retry::{self, RetryPolicy};
use crate::llm_client::{CallFailure, ProviderTransport};
use crate::roadmap::models::{GenerationRequest, RoadmapDocument};
use crate::roadmap::request_builder;
use crate::roadmap::transformer;
use crate::roadmap::validator::{self, ValidationError};

/// Every way `generate` can fail. Callers treat all of them as
/// "roadmap generation unavailable right now".
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("generation call to {endpoint} failed after {attempts} attempt(s): {source}")]
    RetriesExhausted {
        endpoint: String,
        attempts: u32,
        #[source]
        source: CallFailure,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Pipeline entry point. Cheap to clone; holds no per-request state.
#[derive(Clone)]
pub struct RoadmapGenerator {
    transport: Arc<dyn ProviderTransport>,
    retry: RetryPolicy,
}

impl RoadmapGenerator {
    pub fn new(transport: Arc<dyn ProviderTransport>, retry: RetryPolicy) -> Self {
        Self { transport, retry }
    }

    /// Generates, validates and transforms a roadmap.
    ///
    /// Transport failures and rejections are retried per the policy; envelope and
    /// JSON failures are returned immediately. Dropping the future cancels any
    /// pending backoff.
    pub async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<RoadmapDocument, GenerationError> {
        let payload = request_builder::build(request);
        let endpoint = self.transport.endpoint();
        debug!(
            "Built roadmap payload: {} instruction chars",
            payload.instructions().len()
        );

        info!(
            "Requesting {}-day {} roadmap for {:?} from {}",
            request.duration_days, request.proficiency_level, request.subject, endpoint
        );

        let body = retry::execute(&self.retry, || self.transport.send(&payload))
            .await
            .map_err(|exhausted| GenerationError::RetriesExhausted {
                endpoint: endpoint.to_string(),
                attempts: exhausted.attempts,
                source: exhausted.last,
            })?;

        let document = validator::validate_body(&body)?;

        for warning in validator::shape_warnings(&document, request) {
            warn!("Roadmap for {:?} departs from instructions: {warning}", request.subject);
        }

        let document = transformer::transform(document);

        info!(
            "Generated roadmap {:?} with {} day(s)",
            document.title,
            document.daily_plan.len()
        );
        Ok(document)
    }
}
