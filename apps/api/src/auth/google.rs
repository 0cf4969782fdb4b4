// Google ID token verification against the tokeninfo endpoint.

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::models::user::AuthUser;

const DEFAULT_TOKENINFO_BASE: &str = "https://oauth2.googleapis.com";

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Token rejected (status {status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Token audience mismatch: expected {expected}, got {actual}")]
    AudienceMismatch { expected: String, actual: String },

    #[error("Token expired at {0}")]
    Expired(DateTime<Utc>),

    #[error("Malformed token info: {0}")]
    Malformed(String),
}

#[derive(Debug, Clone)]
pub struct VerifiedToken {
    pub user: AuthUser,
    pub expires_at: DateTime<Utc>,
}

/// Seam between the sign-in flow and the identity provider. Tests swap in a
/// static verifier; production uses Google's tokeninfo endpoint.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify(&self, id_token: &str) -> Result<VerifiedToken, AuthError>;
}

/// Claims of interest from tokeninfo. Numeric claims arrive as strings there.
#[derive(Debug, Deserialize)]
struct TokenInfo {
    aud: String,
    sub: String,
    exp: String,
    email: Option<String>,
    name: Option<String>,
    picture: Option<String>,
}

pub struct GoogleTokenVerifier {
    client: Client,
    client_id: String,
    base_url: String,
}

impl GoogleTokenVerifier {
    pub fn new(client_id: String) -> Self {
        Self::with_base_url(client_id, DEFAULT_TOKENINFO_BASE.to_string())
    }

    /// Points the verifier at a different endpoint. Tests use this to talk to
    /// a local mock server.
    pub fn with_base_url(client_id: String, base_url: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(10))
                .build()
                .expect("Failed to build HTTP client"),
            client_id,
            base_url,
        }
    }
}

#[async_trait]
impl TokenVerifier for GoogleTokenVerifier {
    async fn verify(&self, id_token: &str) -> Result<VerifiedToken, AuthError> {
        let response = self
            .client
            .get(format!("{}/tokeninfo", self.base_url))
            .query(&[("id_token", id_token)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(AuthError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let info: TokenInfo = response.json().await?;

        if info.aud != self.client_id {
            return Err(AuthError::AudienceMismatch {
                expected: self.client_id.clone(),
                actual: info.aud,
            });
        }

        let exp_secs: i64 = info
            .exp
            .parse()
            .map_err(|_| AuthError::Malformed(format!("non-numeric exp claim '{}'", info.exp)))?;
        let expires_at = Utc
            .timestamp_opt(exp_secs, 0)
            .single()
            .ok_or_else(|| AuthError::Malformed(format!("exp claim '{exp_secs}' out of range")))?;

        if expires_at <= Utc::now() {
            return Err(AuthError::Expired(expires_at));
        }

        debug!("Verified Google ID token for subject {}", info.sub);

        Ok(VerifiedToken {
            user: AuthUser {
                id: info.sub,
                display_name: info.name,
                email: info.email,
                photo_url: info.picture,
            },
            expires_at,
        })
    }
}

/// Verifier that accepts exactly one known token. Lets tests drive the
/// sign-in flow without a network.
#[cfg(test)]
pub struct StaticTokenVerifier {
    pub token: String,
    pub user: AuthUser,
    pub expires_at: DateTime<Utc>,
}

#[cfg(test)]
#[async_trait]
impl TokenVerifier for StaticTokenVerifier {
    async fn verify(&self, id_token: &str) -> Result<VerifiedToken, AuthError> {
        if id_token == self.token {
            Ok(VerifiedToken {
                user: self.user.clone(),
                expires_at: self.expires_at,
            })
        } else {
            Err(AuthError::Rejected {
                status: 400,
                message: "invalid_token".to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    const CLIENT_ID: &str = "skillup-client.apps.googleusercontent.com";

    fn tokeninfo_body(aud: &str, exp: i64) -> String {
        serde_json::json!({
            "aud": aud,
            "sub": "108177513467234350001",
            "exp": exp.to_string(),
            "email": "learner@example.com",
            "name": "Learner",
            "picture": "https://example.com/photo.jpg"
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_verify_accepts_valid_token() {
        let mut server = mockito::Server::new_async().await;
        let exp = (Utc::now() + Duration::hours(1)).timestamp();
        let mock = server
            .mock("GET", "/tokeninfo")
            .match_query(mockito::Matcher::UrlEncoded(
                "id_token".to_string(),
                "good-token".to_string(),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(tokeninfo_body(CLIENT_ID, exp))
            .create_async()
            .await;

        let verifier = GoogleTokenVerifier::with_base_url(CLIENT_ID.to_string(), server.url());
        let verified = verifier.verify("good-token").await.unwrap();

        assert_eq!(verified.user.id, "108177513467234350001");
        assert_eq!(verified.user.display_name.as_deref(), Some("Learner"));
        assert_eq!(verified.user.email.as_deref(), Some("learner@example.com"));
        assert_eq!(verified.expires_at.timestamp(), exp);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_verify_rejects_wrong_audience() {
        let mut server = mockito::Server::new_async().await;
        let exp = (Utc::now() + Duration::hours(1)).timestamp();
        let _mock = server
            .mock("GET", "/tokeninfo")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(tokeninfo_body("some-other-app.apps.googleusercontent.com", exp))
            .create_async()
            .await;

        let verifier = GoogleTokenVerifier::with_base_url(CLIENT_ID.to_string(), server.url());
        let err = verifier.verify("good-token").await.unwrap_err();

        match err {
            AuthError::AudienceMismatch { expected, actual } => {
                assert_eq!(expected, CLIENT_ID);
                assert_eq!(actual, "some-other-app.apps.googleusercontent.com");
            }
            other => panic!("expected AudienceMismatch, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_verify_surfaces_endpoint_rejection() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/tokeninfo")
            .match_query(mockito::Matcher::Any)
            .with_status(400)
            .with_body(r#"{"error": "invalid_token"}"#)
            .create_async()
            .await;

        let verifier = GoogleTokenVerifier::with_base_url(CLIENT_ID.to_string(), server.url());
        let err = verifier.verify("garbage").await.unwrap_err();

        match err {
            AuthError::Rejected { status, .. } => assert_eq!(status, 400),
            other => panic!("expected Rejected, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_verify_rejects_expired_token() {
        let mut server = mockito::Server::new_async().await;
        let exp = (Utc::now() - Duration::hours(1)).timestamp();
        let _mock = server
            .mock("GET", "/tokeninfo")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(tokeninfo_body(CLIENT_ID, exp))
            .create_async()
            .await;

        let verifier = GoogleTokenVerifier::with_base_url(CLIENT_ID.to_string(), server.url());
        let err = verifier.verify("stale-token").await.unwrap_err();

        match err {
            AuthError::Expired(at) => assert_eq!(at.timestamp(), exp),
            other => panic!("expected Expired, got {other:?}"),
        }
    }
}
