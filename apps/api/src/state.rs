use crate::roadmap::generator::RoadmapGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Stateless pipeline; clones share the same provider transport.
    pub generator: RoadmapGenerator,
}
