pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::auth::handlers as auth_handlers;
use crate::generation::handlers as generation_handlers;
use crate::progress::handlers as progress_handlers;
use crate::session::handlers as session_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Sessions and the roadmap view
        .route(
            "/api/v1/sessions",
            post(session_handlers::handle_create_session),
        )
        .route(
            "/api/v1/sessions/:id/view",
            get(session_handlers::handle_get_view),
        )
        .route(
            "/api/v1/sessions/:id/roadmap/generate",
            post(generation_handlers::handle_generate_roadmap),
        )
        .route(
            "/api/v1/sessions/:id/roadmap/items/toggle",
            post(session_handlers::handle_toggle_item),
        )
        .route(
            "/api/v1/sessions/:id/roadmap/steps/:step/advice",
            post(generation_handlers::handle_step_advice),
        )
        .route(
            "/api/v1/sessions/:id/roadmap/save",
            post(session_handlers::handle_save),
        )
        .route(
            "/api/v1/sessions/:id/roadmap/resume",
            post(session_handlers::handle_resume),
        )
        .route(
            "/api/v1/sessions/:id/roadmap/reset",
            post(session_handlers::handle_reset),
        )
        // Saved progress
        .route(
            "/api/v1/sessions/:id/progress",
            get(progress_handlers::handle_get_progress)
                .delete(progress_handlers::handle_delete_progress),
        )
        // Sign-in state
        .route(
            "/api/v1/sessions/:id/auth/sign-in",
            post(auth_handlers::handle_sign_in),
        )
        .route(
            "/api/v1/sessions/:id/auth/sign-out",
            post(auth_handlers::handle_sign_out),
        )
        .route(
            "/api/v1/sessions/:id/auth/me",
            get(auth_handlers::handle_me),
        )
        .with_state(state)
}
