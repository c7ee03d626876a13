//! Session bootstrap and account sign-in
//!
//! A [`Session`] is created once at startup by calling the backend's
//! `connect` endpoint and is read-only afterwards; controllers receive it
//! explicitly. Sign-in with the identity provider is independent of the
//! backend session.

use std::sync::Arc;

use crate::activity::{ActivityKind, ActivityLog};
use crate::api::{BackendClient, Credentials, IdentityProvider};
use crate::error::UpscaleResult;
use crate::models::{IdentityUser, SessionToken};

/// Backend session shared by every controller
#[derive(Debug, Clone, Default)]
pub struct Session {
    token: Option<SessionToken>,
    bootstrap_error: Option<String>,
}

impl Session {
    /// A session without a token; requests send `auth: null`
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn with_token(token: SessionToken) -> Self {
        Self {
            token: Some(token),
            bootstrap_error: None,
        }
    }

    /// Ask the backend for a token. Failure is logged and yields an anonymous session.
    pub async fn bootstrap(client: &BackendClient, log: &ActivityLog) -> Self {
        match client.connect().await {
            Ok(token) => {
                log.record(ActivityKind::SessionStarted, client.base_url(), None);
                Self::with_token(token)
            }
            Err(e) => {
                log.record_failure(ActivityKind::SessionFailed, "connect", &e);
                Self {
                    token: None,
                    bootstrap_error: Some(e.to_string()),
                }
            }
        }
    }

    pub fn token(&self) -> Option<&SessionToken> {
        self.token.as_ref()
    }

    pub fn is_connected(&self) -> bool {
        self.token.is_some()
    }

    pub fn bootstrap_error(&self) -> Option<&str> {
        self.bootstrap_error.as_deref()
    }

    /// Short label for the status bar
    pub fn status_label(&self) -> &'static str {
        if self.is_connected() {
            "Connected"
        } else if self.bootstrap_error.is_some() {
            "Offline"
        } else {
            "No session"
        }
    }
}

/// Identity operations with activity logging
#[derive(Clone)]
pub struct AuthService {
    provider: Arc<dyn IdentityProvider>,
    log: ActivityLog,
}

impl AuthService {
    pub fn new(provider: Arc<dyn IdentityProvider>, log: ActivityLog) -> Self {
        Self { provider, log }
    }

    pub async fn sign_in(&self, credentials: &Credentials) -> UpscaleResult<IdentityUser> {
        match self.provider.sign_in(credentials).await {
            Ok(user) => {
                self.log.record(ActivityKind::SignedIn, &user.email, None);
                Ok(user)
            }
            Err(e) => {
                self.log
                    .record_failure(ActivityKind::IdentityFailed, &credentials.email, &e);
                Err(e)
            }
        }
    }

    pub async fn sign_up(&self, credentials: &Credentials) -> UpscaleResult<IdentityUser> {
        match self.provider.sign_up(credentials).await {
            Ok(user) => {
                self.log.record(ActivityKind::SignedUp, &user.email, None);
                Ok(user)
            }
            Err(e) => {
                self.log
                    .record_failure(ActivityKind::IdentityFailed, &credentials.email, &e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::http::testing::ScriptedHttpClient;
    use crate::api::http::BoxFuture;
    use crate::error::UpscaleError;
    use tempfile::TempDir;

    fn log_in(temp: &TempDir) -> ActivityLog {
        ActivityLog::new(temp.path().join("activity.log"))
    }

    #[tokio::test]
    async fn bootstrap_success() {
        let temp = TempDir::new().unwrap();
        let log = log_in(&temp);
        let http = Arc::new(ScriptedHttpClient::new().json("/connect", 200, r#"{"auth": "t1"}"#));
        let client = BackendClient::new("http://b.test", http, 100);

        let session = Session::bootstrap(&client, &log).await;
        assert!(session.is_connected());
        assert_eq!(session.token().unwrap().as_str(), "t1");
        assert_eq!(log.read_all().unwrap()[0].kind, ActivityKind::SessionStarted);
    }

    #[tokio::test]
    async fn bootstrap_failure_leaves_token_absent() {
        let temp = TempDir::new().unwrap();
        let log = log_in(&temp);
        let http = Arc::new(ScriptedHttpClient::new().json("/connect", 500, ""));
        let client = BackendClient::new("http://b.test", http, 100);

        let session = Session::bootstrap(&client, &log).await;
        assert!(session.token().is_none());
        assert_eq!(session.status_label(), "Offline");
        assert_eq!(log.read_all().unwrap()[0].kind, ActivityKind::SessionFailed);
    }

    struct RejectingProvider;

    impl IdentityProvider for RejectingProvider {
        fn sign_in<'a>(&'a self, _: &'a Credentials) -> BoxFuture<'a, UpscaleResult<IdentityUser>> {
            Box::pin(async { Err(UpscaleError::Identity("Invalid email or password".into())) })
        }

        fn sign_up<'a>(&'a self, c: &'a Credentials) -> BoxFuture<'a, UpscaleResult<IdentityUser>> {
            Box::pin(async move {
                Ok(IdentityUser {
                    uid: "u".into(),
                    email: c.email.clone(),
                    id_token: String::new(),
                })
            })
        }
    }

    #[tokio::test]
    async fn auth_service_logs_outcomes() {
        let temp = TempDir::new().unwrap();
        let log = log_in(&temp);
        let auth = AuthService::new(Arc::new(RejectingProvider), log.clone());
        let creds = Credentials::new("s@uni.edu", "pw1234");

        assert!(auth.sign_in(&creds).await.is_err());
        assert_eq!(auth.sign_up(&creds).await.unwrap().email, "s@uni.edu");

        let kinds: Vec<_> = log.read_all().unwrap().into_iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![ActivityKind::IdentityFailed, ActivityKind::SignedUp]);
    }
}
