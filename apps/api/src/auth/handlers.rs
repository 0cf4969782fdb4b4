//! Axum route handlers for sign-in state.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::auth::{SignInOutcome, SignInRequest};
use crate::errors::AppError;
use crate::models::user::AuthUser;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SignInResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<AuthUser>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// POST /api/v1/sessions/:id/auth/sign-in
///
/// Settles the provider popup: verifies the ID token, or reports the popup's
/// error code. Cancellation is a normal outcome with no message.
pub async fn handle_sign_in(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<SignInRequest>,
) -> Result<Json<SignInResponse>, AppError> {
    let session = state.sessions.require(session_id).await?;

    let response = match state.auth.sign_in(&session, request).await {
        SignInOutcome::SignedIn(user) => SignInResponse {
            status: "signed_in".to_string(),
            user: Some(user),
            message: None,
        },
        SignInOutcome::Cancelled => SignInResponse {
            status: "cancelled".to_string(),
            user: None,
            message: None,
        },
        SignInOutcome::Failed(message) => SignInResponse {
            status: "error".to_string(),
            user: None,
            message: Some(message),
        },
    };

    Ok(Json(response))
}

/// POST /api/v1/sessions/:id/auth/sign-out
pub async fn handle_sign_out(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let session = state.sessions.require(session_id).await?;
    state.auth.sign_out(&session);
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub authenticated: bool,
    pub user: Option<AuthUser>,
}

/// GET /api/v1/sessions/:id/auth/me
pub async fn handle_me(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<MeResponse>, AppError> {
    let session = state.sessions.require(session_id).await?;
    let user = session.current_user();

    Ok(Json(MeResponse {
        authenticated: user.is_some(),
        user,
    }))
}
