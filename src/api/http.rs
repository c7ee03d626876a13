//! HTTP transport seam
//!
//! Everything that talks to the network goes through [`HttpClient`] so the
//! controllers can be driven by a scripted transport in tests.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use crate::error::{UpscaleError, UpscaleResult};

/// Boxed future returned by the transport and provider traits
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// Outgoing request envelope
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub body: Option<String>,
    pub timeout_ms: u64,
}

impl HttpRequest {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: BTreeMap::new(),
            body: None,
            timeout_ms: 10_000,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, url)
    }

    /// POST with a JSON body and the matching content type
    pub fn post_json(url: impl Into<String>, body: &serde_json::Value) -> Self {
        Self::post(url)
            .with_header("Content-Type", "application/json")
            .with_body(body.to_string())
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .insert(name.into().to_ascii_lowercase(), value.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }
}

/// Response envelope returned by a transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok_json(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn with_status(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Transport-level failure: the request produced no response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpError {
    message: String,
}

impl HttpError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for HttpError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for HttpError {}

/// Async transport contract
pub trait HttpClient: Send + Sync {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> BoxFuture<'a, Result<HttpResponse, HttpError>>;
}

/// Production transport backed by reqwest
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: Arc<reqwest::Client>,
}

impl ReqwestHttpClient {
    /// Build the shared client; fails when the TLS backend cannot start
    pub fn new() -> UpscaleResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("upscale/", env!("CARGO_PKG_VERSION")))
            .cookie_store(true)
            .build()
            .map_err(|e| UpscaleError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client: Arc::new(client),
        })
    }
}

impl HttpClient for ReqwestHttpClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> BoxFuture<'a, Result<HttpResponse, HttpError>> {
        Box::pin(async move {
            let mut builder = match request.method {
                HttpMethod::Get => self.client.get(&request.url),
                HttpMethod::Post => self.client.post(&request.url),
            };

            for (name, value) in &request.headers {
                builder = builder.header(name, value);
            }

            builder = builder.timeout(Duration::from_millis(request.timeout_ms));

            if let Some(body) = request.body {
                builder = builder.body(body);
            }

            let response = builder.send().await.map_err(|e| {
                if e.is_timeout() {
                    HttpError::new(format!("request timeout: {}", e))
                } else if e.is_connect() {
                    HttpError::new(format!("connection failed: {}", e))
                } else {
                    HttpError::new(format!("request failed: {}", e))
                }
            })?;

            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .map_err(|e| HttpError::new(format!("failed to read response body: {}", e)))?;

            Ok(HttpResponse { status, body })
        })
    }
}

#[cfg(test)]
pub mod testing {
    //! Scripted in-memory transport

    use super::*;
    use std::sync::Mutex;

    type Responder = Arc<dyn Fn(&HttpRequest) -> Result<HttpResponse, HttpError> + Send + Sync>;

    struct Route {
        suffix: String,
        delay: Duration,
        responder: Responder,
    }

    /// Answers requests by URL suffix and records everything it receives
    #[derive(Default)]
    pub struct ScriptedHttpClient {
        routes: Mutex<Vec<Route>>,
        requests: Mutex<Vec<HttpRequest>>,
    }

    impl ScriptedHttpClient {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn route<F>(self, suffix: &str, responder: F) -> Self
        where
            F: Fn(&HttpRequest) -> Result<HttpResponse, HttpError> + Send + Sync + 'static,
        {
            self.route_delayed(suffix, Duration::ZERO, responder)
        }

        pub fn route_delayed<F>(self, suffix: &str, delay: Duration, responder: F) -> Self
        where
            F: Fn(&HttpRequest) -> Result<HttpResponse, HttpError> + Send + Sync + 'static,
        {
            self.routes.lock().unwrap().push(Route {
                suffix: suffix.to_string(),
                delay,
                responder: Arc::new(responder),
            });
            self
        }

        /// Fixed status and body for every request to `suffix`
        pub fn json(self, suffix: &str, status: u16, body: &str) -> Self {
            let body = body.to_string();
            self.route(suffix, move |_| Ok(HttpResponse::with_status(status, body.clone())))
        }

        pub fn requests(&self) -> Vec<HttpRequest> {
            self.requests.lock().unwrap().clone()
        }

        /// Parsed JSON bodies of requests whose URL ends with `suffix`
        pub fn bodies_for(&self, suffix: &str) -> Vec<serde_json::Value> {
            self.requests()
                .into_iter()
                .filter(|r| r.url.ends_with(suffix))
                .filter_map(|r| r.body)
                .filter_map(|b| serde_json::from_str(&b).ok())
                .collect()
        }
    }

    impl HttpClient for ScriptedHttpClient {
        fn execute<'a>(
            &'a self,
            request: HttpRequest,
        ) -> BoxFuture<'a, Result<HttpResponse, HttpError>> {
            Box::pin(async move {
                self.requests.lock().unwrap().push(request.clone());

                let found = {
                    let routes = self.routes.lock().unwrap();
                    routes
                        .iter()
                        .find(|r| request.url.ends_with(&r.suffix))
                        .map(|r| (r.delay, Arc::clone(&r.responder)))
                };

                let Some((delay, responder)) = found else {
                    return Err(HttpError::new(format!("no route for {}", request.url)));
                };

                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                responder(&request)
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reqwest_client_builds() {
        assert!(ReqwestHttpClient::new().is_ok());
    }

    #[test]
    fn post_json_sets_body_and_content_type() {
        let request = HttpRequest::post_json(
            "http://example.test/api/react/news",
            &serde_json::json!({"auth": null}),
        );

        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(
            request.headers.get("content-type").map(String::as_str),
            Some("application/json")
        );
        assert_eq!(request.body.as_deref(), Some(r#"{"auth":null}"#));
    }

    #[test]
    fn success_range() {
        assert!(HttpResponse::ok_json("{}").is_success());
        assert!(!HttpResponse::with_status(502, "").is_success());
        assert!(!HttpResponse::with_status(301, "").is_success());
    }

    #[tokio::test]
    async fn scripted_client_routes_by_suffix() {
        let client = testing::ScriptedHttpClient::new().json("/news", 200, "[]");

        let ok = client
            .execute(HttpRequest::post("http://x/api/react/news"))
            .await
            .unwrap();
        assert_eq!(ok.body, "[]");

        let missing = client.execute(HttpRequest::post("http://x/chatbot")).await;
        assert!(missing.is_err());
        assert_eq!(client.requests().len(), 2);
    }
}
