//! Identity provider client
//!
//! Sign-in and sign-up are delegated to the Firebase Identity Toolkit REST
//! API. The rest of the crate only sees [`IdentityProvider`].

use std::sync::Arc;

use serde::Deserialize;
use serde_json::json;

use super::credentials::Credentials;
use super::http::{BoxFuture, HttpClient, HttpRequest};
use crate::error::{UpscaleError, UpscaleResult};
use crate::models::IdentityUser;

const IDENTITY_TOOLKIT_URL: &str = "https://identitytoolkit.googleapis.com/v1";

/// Email/password account operations
pub trait IdentityProvider: Send + Sync {
    fn sign_in<'a>(&'a self, credentials: &'a Credentials) -> BoxFuture<'a, UpscaleResult<IdentityUser>>;

    fn sign_up<'a>(&'a self, credentials: &'a Credentials) -> BoxFuture<'a, UpscaleResult<IdentityUser>>;
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountResponse {
    local_id: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    id_token: String,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

/// Turn a provider error code into something a person can act on
pub fn describe_identity_error(code: &str) -> String {
    // Codes may carry detail after " : ", e.g. "WEAK_PASSWORD : Password should be..."
    let head = code.split(" : ").next().unwrap_or(code).trim();
    match head {
        "EMAIL_NOT_FOUND" | "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" => {
            "Invalid email or password".to_string()
        }
        "USER_DISABLED" => "This account has been disabled".to_string(),
        "EMAIL_EXISTS" => "An account with this email already exists".to_string(),
        "INVALID_EMAIL" => "That email address is not valid".to_string(),
        "WEAK_PASSWORD" => "Password should be at least 6 characters".to_string(),
        "MISSING_PASSWORD" => "Password is required".to_string(),
        "TOO_MANY_ATTEMPTS_TRY_LATER" => "Too many attempts, try again later".to_string(),
        "" => "The identity provider rejected the request".to_string(),
        other => other.to_string(),
    }
}

/// Identity Toolkit REST client
#[derive(Clone)]
pub struct FirebaseIdentity {
    http: Arc<dyn HttpClient>,
    api_key: String,
    base_url: String,
    timeout_ms: u64,
}

impl FirebaseIdentity {
    pub fn new(http: Arc<dyn HttpClient>, api_key: impl Into<String>, timeout_ms: u64) -> Self {
        Self {
            http,
            api_key: api_key.into(),
            base_url: IDENTITY_TOOLKIT_URL.to_string(),
            timeout_ms,
        }
    }

    /// Point at an emulator or test server
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    async fn account_call(&self, method: &str, credentials: &Credentials) -> UpscaleResult<IdentityUser> {
        if credentials.email.is_empty() || credentials.password.is_empty() {
            return Err(UpscaleError::Validation(
                "Email and password are required".into(),
            ));
        }

        let url = format!("{}/accounts:{}?key={}", self.base_url, method, self.api_key);
        let body = json!({
            "email": credentials.email,
            "password": credentials.password.as_str(),
            "returnSecureToken": true,
        });
        let request = HttpRequest::post_json(url, &body).with_timeout_ms(self.timeout_ms);

        let response = self
            .http
            .execute(request)
            .await
            .map_err(|e| UpscaleError::Network(format!("identity provider: {}", e)))?;

        if !response.is_success() {
            let code = serde_json::from_str::<ErrorEnvelope>(&response.body)
                .map(|e| e.error.message)
                .unwrap_or_default();
            return Err(UpscaleError::Identity(describe_identity_error(&code)));
        }

        let account: AccountResponse = serde_json::from_str(&response.body)?;
        Ok(IdentityUser {
            uid: account.local_id,
            email: if account.email.is_empty() {
                credentials.email.clone()
            } else {
                account.email
            },
            id_token: account.id_token,
        })
    }
}

impl IdentityProvider for FirebaseIdentity {
    fn sign_in<'a>(&'a self, credentials: &'a Credentials) -> BoxFuture<'a, UpscaleResult<IdentityUser>> {
        Box::pin(self.account_call("signInWithPassword", credentials))
    }

    fn sign_up<'a>(&'a self, credentials: &'a Credentials) -> BoxFuture<'a, UpscaleResult<IdentityUser>> {
        Box::pin(self.account_call("signUp", credentials))
    }
}
