// Sign-in state and the flow that drives it. The client completes the Google
// popup, then posts either an ID token or the provider's error code here.

pub mod google;
pub mod handlers;

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::auth::google::{AuthError, TokenVerifier};
use crate::errors::AppError;
use crate::models::user::AuthUser;
use crate::session::{Session, SessionRegistry};

/// Per-session sign-in state, published through the session's watch channel.
#[derive(Debug, Clone)]
pub enum AuthState {
    SignedOut,
    SignedIn {
        user: AuthUser,
        expires_at: DateTime<Utc>,
    },
}

// Error codes the provider popup reports to the client.
pub const PROVIDER_ERROR_POPUP_CLOSED: &str = "popup_closed_by_user";
pub const PROVIDER_ERROR_POPUP_CANCELLED: &str = "cancelled_popup_request";
pub const PROVIDER_ERROR_UNAUTHORIZED_DOMAIN: &str = "unauthorized_domain";

/// Shown when the app's origin is missing from the OAuth client configuration.
pub const UNAUTHORIZED_DOMAIN_MESSAGE: &str = "This app's domain is not authorized for sign-in. \
    Add it to the authorized origins of the Google OAuth client.";
/// Generic sign-in failure message. Details only go to the logs.
pub const SIGN_IN_FAILED_MESSAGE: &str = "Could not sign in with Google. Please try again.";

/// What the client posts after the provider popup settles: a token on
/// success, or the provider's error code.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInRequest {
    pub id_token: Option<String>,
    pub provider_error: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SignInOutcome {
    SignedIn(AuthUser),
    /// The user dismissed the popup. Not an error; nothing to show.
    Cancelled,
    Failed(String),
}

#[derive(Clone)]
pub struct AuthService {
    verifier: Arc<dyn TokenVerifier>,
}

impl AuthService {
    pub fn new(verifier: Arc<dyn TokenVerifier>) -> Self {
        Self { verifier }
    }

    pub async fn sign_in(&self, session: &Session, request: SignInRequest) -> SignInOutcome {
        if let Some(code) = request.provider_error {
            return classify_provider_error(&code);
        }

        let Some(id_token) = request.id_token else {
            error!("Sign-in request carried neither a token nor a provider error");
            return SignInOutcome::Failed(SIGN_IN_FAILED_MESSAGE.to_string());
        };

        match self.verifier.verify(&id_token).await {
            Ok(verified) => {
                info!("Session {}: user {} signed in", session.id, verified.user.id);
                session.set_auth_state(AuthState::SignedIn {
                    user: verified.user.clone(),
                    expires_at: verified.expires_at,
                });
                SignInOutcome::SignedIn(verified.user)
            }
            Err(AuthError::AudienceMismatch { expected, actual }) => {
                error!("Google token audience mismatch: expected {expected}, got {actual}");
                SignInOutcome::Failed(UNAUTHORIZED_DOMAIN_MESSAGE.to_string())
            }
            Err(e) => {
                error!("Google token verification failed: {e}");
                SignInOutcome::Failed(SIGN_IN_FAILED_MESSAGE.to_string())
            }
        }
    }

    pub fn sign_out(&self, session: &Session) {
        session.set_auth_state(AuthState::SignedOut);
        info!("Session {}: signed out", session.id);
    }
}

/// Maps a provider popup error code to an outcome. Dismissing the popup is
/// silent; a misconfigured OAuth client gets an actionable message.
fn classify_provider_error(code: &str) -> SignInOutcome {
    match code {
        PROVIDER_ERROR_POPUP_CLOSED | PROVIDER_ERROR_POPUP_CANCELLED => {
            debug!("Sign-in popup dismissed: {code}");
            SignInOutcome::Cancelled
        }
        PROVIDER_ERROR_UNAUTHORIZED_DOMAIN => {
            error!("Sign-in failed: this origin is not authorized for the OAuth client");
            SignInOutcome::Failed(UNAUTHORIZED_DOMAIN_MESSAGE.to_string())
        }
        other => {
            error!("Sign-in provider error: {other}");
            SignInOutcome::Failed(SIGN_IN_FAILED_MESSAGE.to_string())
        }
    }
}

/// The signed-in user, or `Unauthorized` for handlers that require one.
pub fn require_user(session: &Session) -> Result<AuthUser, AppError> {
    session.current_user().ok_or(AppError::Unauthorized)
}

const SWEEP_INTERVAL: Duration = Duration::from_secs(60);
const SESSION_IDLE_TTL_SECS: i64 = 24 * 60 * 60;

/// Background task that downgrades expired sign-ins and drops idle sessions.
/// Expiry is also checked lazily on access; the sweep keeps watch subscribers
/// current between requests.
pub fn spawn_expiry_sweep(sessions: Arc<SessionRegistry>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(SWEEP_INTERVAL);
        loop {
            ticker.tick().await;
            let expired = sessions.expire_due_sign_ins().await;
            let pruned = sessions.prune_idle(SESSION_IDLE_TTL_SECS).await;
            if expired > 0 || pruned > 0 {
                debug!("Expiry sweep: {expired} sign-ins expired, {pruned} idle sessions pruned");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::google::StaticTokenVerifier;
    use chrono::Duration;

    fn test_user() -> AuthUser {
        AuthUser {
            id: "google-subject-1".to_string(),
            display_name: Some("Test User".to_string()),
            email: Some("test@example.com".to_string()),
            photo_url: None,
        }
    }

    fn test_service() -> AuthService {
        AuthService::new(Arc::new(StaticTokenVerifier {
            token: "good-token".to_string(),
            user: test_user(),
            expires_at: Utc::now() + Duration::hours(1),
        }))
    }

    #[test]
    fn test_popup_dismissal_is_silent() {
        assert_eq!(
            classify_provider_error(PROVIDER_ERROR_POPUP_CLOSED),
            SignInOutcome::Cancelled
        );
        assert_eq!(
            classify_provider_error(PROVIDER_ERROR_POPUP_CANCELLED),
            SignInOutcome::Cancelled
        );
    }

    #[test]
    fn test_unauthorized_domain_gets_config_message() {
        assert_eq!(
            classify_provider_error(PROVIDER_ERROR_UNAUTHORIZED_DOMAIN),
            SignInOutcome::Failed(UNAUTHORIZED_DOMAIN_MESSAGE.to_string())
        );
    }

    #[test]
    fn test_unknown_provider_error_gets_generic_message() {
        assert_eq!(
            classify_provider_error("network_error"),
            SignInOutcome::Failed(SIGN_IN_FAILED_MESSAGE.to_string())
        );
    }

    #[tokio::test]
    async fn test_sign_in_with_valid_token() {
        let registry = SessionRegistry::new();
        let session = registry.create().await;
        let service = test_service();

        let outcome = service
            .sign_in(
                &session,
                SignInRequest {
                    id_token: Some("good-token".to_string()),
                    provider_error: None,
                },
            )
            .await;

        assert_eq!(outcome, SignInOutcome::SignedIn(test_user()));
        assert_eq!(session.current_user(), Some(test_user()));
        assert!(require_user(&session).is_ok());
    }

    #[tokio::test]
    async fn test_sign_in_with_rejected_token() {
        let registry = SessionRegistry::new();
        let session = registry.create().await;
        let service = test_service();

        let outcome = service
            .sign_in(
                &session,
                SignInRequest {
                    id_token: Some("forged-token".to_string()),
                    provider_error: None,
                },
            )
            .await;

        assert_eq!(
            outcome,
            SignInOutcome::Failed(SIGN_IN_FAILED_MESSAGE.to_string())
        );
        assert!(session.current_user().is_none());
        assert!(matches!(
            require_user(&session),
            Err(AppError::Unauthorized)
        ));
    }

    #[tokio::test]
    async fn test_sign_out_clears_state() {
        let registry = SessionRegistry::new();
        let session = registry.create().await;
        let service = test_service();

        service
            .sign_in(
                &session,
                SignInRequest {
                    id_token: Some("good-token".to_string()),
                    provider_error: None,
                },
            )
            .await;
        service.sign_out(&session);

        assert!(session.current_user().is_none());
    }
}
