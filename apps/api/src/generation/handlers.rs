//! Axum route handlers for the Generation API.
//!
//! Generation results come back in-band as an `ActionOutcome` envelope, even
//! on LLM failure. `AppError` is reserved for infrastructure problems:
//! unknown sessions, invalid input, missing steps.

use axum::{
    extract::{Path, State},
    Json,
};
use std::collections::HashMap;
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::actions::{
    generate_advice_action, generate_roadmap_action, ActionOutcome,
};
use crate::generation::advice::{GenerateAdviceInput, GenerateAdviceOutput};
use crate::generation::roadmap::{GenerateRoadmapInput, GenerateRoadmapOutput};
use crate::state::AppState;

/// POST /api/v1/sessions/:id/roadmap/generate
///
/// Generates a roadmap from the goal and skills description. On success the
/// session switches to display mode with all items unchecked; on failure the
/// current view is left untouched.
pub async fn handle_generate_roadmap(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<GenerateRoadmapInput>,
) -> Result<Json<ActionOutcome<GenerateRoadmapOutput>>, AppError> {
    let session = state.sessions.require(session_id).await?;

    if request.goal.chars().count() < 2 {
        return Err(AppError::Validation(
            "goal must be at least 2 characters".to_string(),
        ));
    }

    let outcome = generate_roadmap_action(&state.llm, &request).await;

    if outcome.success {
        if let Some(output) = &outcome.data {
            let mut view = session.view().lock().await;
            view.enter_display(
                output.roadmap.clone(),
                request.goal.clone(),
                request.current_skills.clone(),
                HashMap::new(),
            );
        }
    }

    Ok(Json(outcome))
}

/// POST /api/v1/sessions/:id/roadmap/steps/:step/advice
///
/// Returns advice for one roadmap step. Successful advice is cached on the
/// session, so asking again for the same step is free until the roadmap
/// changes.
pub async fn handle_step_advice(
    State(state): State<AppState>,
    Path((session_id, step_index)): Path<(Uuid, usize)>,
) -> Result<Json<ActionOutcome<GenerateAdviceOutput>>, AppError> {
    let session = state.sessions.require(session_id).await?;

    let input = {
        let view = session.view().lock().await;
        let display = view.display().ok_or_else(|| {
            AppError::Validation("No active roadmap in this session".to_string())
        })?;

        if let Some(cached) = display.cached_advice(step_index) {
            return Ok(Json(ActionOutcome::ok(cached.clone())));
        }

        let step = display
            .roadmap
            .get(step_index)
            .ok_or_else(|| AppError::NotFound(format!("Step {step_index} not found")))?;

        GenerateAdviceInput {
            roadmap_step: step.title.clone(),
            user_skills: display.current_skills.clone(),
            goal: display.goal.clone(),
        }
    };

    // View lock is released while the LLM call runs.
    let outcome = generate_advice_action(&state.llm, &input).await;

    if outcome.success {
        if let Some(advice) = &outcome.data {
            let mut view = session.view().lock().await;
            if let Some(display) = view.display_mut() {
                // Cache only if the step is still the one the advice was
                // generated for; the roadmap may have been regenerated while
                // the call was in flight.
                if display.roadmap.get(step_index).map(|s| &s.title) == Some(&input.roadmap_step) {
                    display.cache_advice(step_index, advice.clone());
                }
            }
        }
    }

    Ok(Json(outcome))
}
