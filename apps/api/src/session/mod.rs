// Session layer. Each browser session gets a server-side `Session` holding
// its roadmap view and sign-in state; the registry owns them all and backs
// the periodic expiry sweep.

pub mod handlers;
pub mod view;

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::{watch, Mutex, RwLock};
use tracing::{debug, info};
use uuid::Uuid;

use crate::auth::AuthState;
use crate::errors::AppError;
use crate::models::user::AuthUser;
use crate::session::view::RoadmapView;

pub struct Session {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    auth: watch::Sender<AuthState>,
    view: Mutex<RoadmapView>,
    last_seen: AtomicI64,
}

impl Session {
    fn new(id: Uuid) -> Self {
        let (auth, _) = watch::channel(AuthState::SignedOut);
        Self {
            id,
            created_at: Utc::now(),
            auth,
            view: Mutex::new(RoadmapView::default()),
            last_seen: AtomicI64::new(Utc::now().timestamp()),
        }
    }

    pub fn view(&self) -> &Mutex<RoadmapView> {
        &self.view
    }

    pub fn auth_state(&self) -> AuthState {
        self.auth.borrow().clone()
    }

    pub fn set_auth_state(&self, next: AuthState) {
        self.auth.send_replace(next);
    }

    /// Subscribes to sign-in state changes, including sweep-driven expiry.
    pub fn subscribe_auth(&self) -> watch::Receiver<AuthState> {
        self.auth.subscribe()
    }

    /// Downgrades an expired sign-in to `SignedOut`. Returns whether it fired.
    pub fn expire_if_due(&self) -> bool {
        let expired = match &*self.auth.borrow() {
            AuthState::SignedIn { expires_at, .. } => *expires_at <= Utc::now(),
            AuthState::SignedOut => false,
        };
        if expired {
            self.auth.send_replace(AuthState::SignedOut);
            debug!("Session {}: sign-in expired", self.id);
        }
        expired
    }

    /// The signed-in user, if any. Expiry is checked lazily here so a stale
    /// token never authorizes a request between sweep ticks.
    pub fn current_user(&self) -> Option<AuthUser> {
        if self.expire_if_due() {
            return None;
        }
        match &*self.auth.borrow() {
            AuthState::SignedIn { user, .. } => Some(user.clone()),
            AuthState::SignedOut => None,
        }
    }

    fn touch(&self) {
        self.last_seen.store(Utc::now().timestamp(), Ordering::Relaxed);
    }

    fn idle_secs(&self, now: i64) -> i64 {
        now - self.last_seen.load(Ordering::Relaxed)
    }
}

/// All live sessions, keyed by id.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<Uuid, Arc<Session>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create(&self) -> Arc<Session> {
        let id = Uuid::new_v4();
        let session = Arc::new(Session::new(id));
        self.sessions.write().await.insert(id, session.clone());
        info!("Created session {id}");
        session
    }

    pub async fn get(&self, id: Uuid) -> Option<Arc<Session>> {
        let session = self.sessions.read().await.get(&id).cloned();
        if let Some(session) = &session {
            session.touch();
        }
        session
    }

    /// Fetches a session, mapping its absence to a 404.
    pub async fn require(&self, id: Uuid) -> Result<Arc<Session>, AppError> {
        self.get(id)
            .await
            .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))
    }

    /// Downgrades every session whose sign-in has expired. Returns how many fired.
    pub async fn expire_due_sign_ins(&self) -> usize {
        self.sessions
            .read()
            .await
            .values()
            .filter(|session| session.expire_if_due())
            .count()
    }

    /// Drops sessions that have not been touched for `idle_ttl_secs`.
    /// Returns how many were removed.
    pub async fn prune_idle(&self, idle_ttl_secs: i64) -> usize {
        let now = Utc::now().timestamp();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| session.idle_secs(now) < idle_ttl_secs);
        before - sessions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn test_user() -> AuthUser {
        AuthUser {
            id: "google-subject-1".to_string(),
            display_name: Some("Test User".to_string()),
            email: Some("test@example.com".to_string()),
            photo_url: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_get_session() {
        let registry = SessionRegistry::new();
        let session = registry.create().await;

        let found = registry.get(session.id).await.unwrap();
        assert_eq!(found.id, session.id);
        assert!(registry.get(Uuid::new_v4()).await.is_none());
    }

    #[tokio::test]
    async fn test_prune_removes_idle_sessions() {
        let registry = SessionRegistry::new();
        let idle = registry.create().await;
        let active = registry.create().await;

        idle.last_seen
            .store(Utc::now().timestamp() - 100_000, Ordering::Relaxed);

        let removed = registry.prune_idle(24 * 60 * 60).await;
        assert_eq!(removed, 1);
        assert!(registry.get(idle.id).await.is_none());
        assert!(registry.get(active.id).await.is_some());
    }

    #[tokio::test]
    async fn test_expired_sign_in_is_downgraded() {
        let registry = SessionRegistry::new();
        let session = registry.create().await;

        session.set_auth_state(AuthState::SignedIn {
            user: test_user(),
            expires_at: Utc::now() - Duration::seconds(1),
        });

        let mut receiver = session.subscribe_auth();
        receiver.borrow_and_update();

        assert!(session.current_user().is_none());
        assert!(receiver.has_changed().unwrap());
        assert!(matches!(
            &*receiver.borrow_and_update(),
            AuthState::SignedOut
        ));
    }

    #[tokio::test]
    async fn test_sweep_counts_expired_sign_ins() {
        let registry = SessionRegistry::new();
        let expired = registry.create().await;
        let fresh = registry.create().await;

        expired.set_auth_state(AuthState::SignedIn {
            user: test_user(),
            expires_at: Utc::now() - Duration::seconds(1),
        });
        fresh.set_auth_state(AuthState::SignedIn {
            user: test_user(),
            expires_at: Utc::now() + Duration::hours(1),
        });

        assert_eq!(registry.expire_due_sign_ins().await, 1);
        assert!(expired.current_user().is_none());
        assert!(fresh.current_user().is_some());
    }
}
