//! Axum route handlers for saved progress.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::require_user;
use crate::errors::AppError;
use crate::models::roadmap::RoadmapProgressData;
use crate::progress::summary::{calculate_progress, ProgressStats};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ProgressResponse {
    pub progress: Option<RoadmapProgressData>,
    pub stats: ProgressStats,
}

/// GET /api/v1/sessions/:id/progress
///
/// Returns the signed-in user's saved document with completion stats.
/// `progress` is null when nothing is saved.
pub async fn handle_get_progress(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<ProgressResponse>, AppError> {
    let session = state.sessions.require(session_id).await?;
    let user = require_user(&session)?;

    let progress = state.store.load(&user.id).await?;
    let stats = progress
        .as_ref()
        .map(calculate_progress)
        .unwrap_or_default();

    Ok(Json(ProgressResponse { progress, stats }))
}

#[derive(Debug, Deserialize)]
pub struct DeleteProgressParams {
    #[serde(default)]
    pub confirm: bool,
}

/// DELETE /api/v1/sessions/:id/progress?confirm=true
///
/// Deletes the signed-in user's saved document. The session's current view is
/// untouched. Requires explicit confirmation.
pub async fn handle_delete_progress(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Query(params): Query<DeleteProgressParams>,
) -> Result<StatusCode, AppError> {
    let session = state.sessions.require(session_id).await?;
    let user = require_user(&session)?;

    if !params.confirm {
        return Err(AppError::Validation(
            "Progress deletion requires confirm=true".to_string(),
        ));
    }

    state.store.delete(&user.id).await?;
    Ok(StatusCode::NO_CONTENT)
}
