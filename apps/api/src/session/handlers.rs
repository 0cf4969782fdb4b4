//! Axum route handlers for sessions and the roadmap view.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::require_user;
use crate::errors::AppError;
use crate::models::roadmap::{item_id, parse_item_id, RoadmapProgressData};
use crate::session::view::RoadmapView;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionResponse {
    pub session_id: Uuid,
}

/// What the session currently shows. Display mode carries the same document
/// shape the store persists.
#[derive(Debug, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ViewResponse {
    Form,
    Display(RoadmapProgressData),
}

fn view_response(view: &RoadmapView) -> ViewResponse {
    match view.snapshot() {
        Some(data) => ViewResponse::Display(data),
        None => ViewResponse::Form,
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleItemRequest {
    pub item_id: String,
    pub checked: bool,
}

/// POST /api/v1/sessions
///
/// Creates a session starting at the input form, signed out.
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> Json<CreateSessionResponse> {
    let session = state.sessions.create().await;
    Json(CreateSessionResponse {
        session_id: session.id,
    })
}

/// GET /api/v1/sessions/:id/view
pub async fn handle_get_view(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<ViewResponse>, AppError> {
    let session = state.sessions.require(session_id).await?;
    let view = session.view().lock().await;
    Ok(Json(view_response(&view)))
}

/// POST /api/v1/sessions/:id/roadmap/items/toggle
///
/// Records a checkbox change for one task or resource.
pub async fn handle_toggle_item(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<ToggleItemRequest>,
) -> Result<StatusCode, AppError> {
    let session = state.sessions.require(session_id).await?;
    let mut view = session.view().lock().await;
    let display = view.display_mut().ok_or_else(|| {
        AppError::Validation("No active roadmap in this session".to_string())
    })?;

    let (kind, step_index, item_index) = parse_item_id(&request.item_id)
        .ok_or_else(|| AppError::Validation(format!("Invalid item id '{}'", request.item_id)))?;

    if !display.contains_item(kind, step_index, item_index) {
        return Err(AppError::NotFound(format!(
            "No item {} in the current roadmap",
            request.item_id
        )));
    }

    // Store the canonical id so "task-00-1" and "task-0-1" land on one key.
    display.set_checked(item_id(kind, step_index, item_index), request.checked);
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/sessions/:id/roadmap/save
///
/// Persists the displayed roadmap under the signed-in user, replacing any
/// previously saved document.
pub async fn handle_save(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let session = state.sessions.require(session_id).await?;
    let user = require_user(&session)?;

    let snapshot = {
        let view = session.view().lock().await;
        view.snapshot()
            .ok_or_else(|| AppError::Validation("No active roadmap to save".to_string()))?
    };

    state.store.save(&user.id, &snapshot).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/sessions/:id/roadmap/resume
///
/// Loads the signed-in user's saved document into this session's view,
/// replacing whatever it showed before.
pub async fn handle_resume(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<ViewResponse>, AppError> {
    let session = state.sessions.require(session_id).await?;
    let user = require_user(&session)?;

    let saved = state.store.load(&user.id).await?.ok_or_else(|| {
        AppError::NotFound("No saved roadmap progress for this user".to_string())
    })?;

    let mut view = session.view().lock().await;
    view.enter_display(
        saved.roadmap,
        saved.goal,
        saved.current_skills,
        saved.checked_items,
    );
    Ok(Json(view_response(&view)))
}

/// POST /api/v1/sessions/:id/roadmap/reset
///
/// Returns the session to the input form. Saved progress is untouched.
pub async fn handle_reset(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let session = state.sessions.require(session_id).await?;
    session.view().lock().await.reset();
    Ok(StatusCode::NO_CONTENT)
}
