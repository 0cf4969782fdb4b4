use std::sync::Arc;

use crate::auth::AuthService;
use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::progress::store::ProgressStore;
use crate::session::SessionRegistry;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub llm: LlmClient,
    /// Pluggable progress store. Production: Postgres; tests swap in memory.
    pub store: Arc<dyn ProgressStore>,
    pub auth: AuthService,
    pub sessions: Arc<SessionRegistry>,
    pub config: Config,
}
