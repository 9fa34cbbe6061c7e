//! Axum route handlers for the Roadmap API.

use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::roadmap::models::{GenerationRequest, RoadmapDocument};
use crate::state::AppState;

/// POST /api/v1/roadmaps/generate
///
/// Runs the full generation pipeline and returns the transformed roadmap.
/// The roadmap is NOT persisted; storing it is the caller's job.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerationRequest>,
) -> Result<Json<RoadmapDocument>, AppError> {
    if request.subject.trim().is_empty() {
        return Err(AppError::Validation("subject cannot be empty".to_string()));
    }
    if request.duration_days == 0 {
        return Err(AppError::Validation(
            "durationDays must be at least 1".to_string(),
        ));
    }

    let roadmap = state.generator.generate(&request).await?;

    Ok(Json(roadmap))
}
