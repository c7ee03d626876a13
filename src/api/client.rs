//! UpScale backend endpoint client
//!
//! Every endpoint is a JSON POST to `<base url>/<endpoint>` whose body carries
//! the session token under `auth` (null when no session was obtained).
//! Non-success statuses become [`UpscaleError::Http`], transport failures
//! [`UpscaleError::Network`]. Nothing is retried.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};

use super::http::{HttpClient, HttpRequest};
use crate::config::Settings;
use crate::error::{UpscaleError, UpscaleResult};
use crate::models::{
    Article, ChartImage, Company, FrameInterval, FramePeriod, PriceBar, SessionToken,
};

/// Companies per listing page, fixed by the backend
pub const COMPANY_PAGE_SIZE: usize = 10;

/// Side length of the rendered candlestick chart when none is requested
pub const DEFAULT_CHART_SIZE: u32 = 256;

#[derive(Deserialize)]
#[serde(untagged)]
enum CompaniesResponse {
    List(Vec<Company>),
    Wrapped {
        #[serde(default)]
        companies: Vec<Company>,
    },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum HistoryResponse {
    List(Vec<PriceBar>),
    Wrapped {
        #[serde(rename = "Year", default)]
        year: Option<Vec<PriceBar>>,
        #[serde(default)]
        data: Option<Vec<PriceBar>>,
    },
}

impl HistoryResponse {
    fn into_bars(self) -> Vec<PriceBar> {
        match self {
            Self::List(bars) => bars,
            Self::Wrapped { year, data } => year.or(data).unwrap_or_default(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NewsResponse {
    List(Vec<Article>),
    Wrapped {
        #[serde(default)]
        articles: Vec<Article>,
    },
}

#[derive(Deserialize)]
struct ConnectResponse {
    #[serde(default)]
    auth: Value,
}

#[derive(Deserialize)]
struct ChatResponse {
    reply: String,
}

#[derive(Deserialize)]
struct ChartResponse {
    #[serde(rename = "image-base64")]
    image_base64: String,
}

/// Thin typed wrapper over the backend's endpoints
#[derive(Clone)]
pub struct BackendClient {
    base_url: String,
    http: Arc<dyn HttpClient>,
    timeout_ms: u64,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>, http: Arc<dyn HttpClient>, timeout_ms: u64) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
            timeout_ms,
        }
    }

    pub fn from_settings(settings: &Settings, http: Arc<dyn HttpClient>) -> Self {
        Self::new(&settings.api_base_url, http, settings.request_timeout_ms)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint)
    }

    async fn post<T: DeserializeOwned>(&self, endpoint: &str, body: Value) -> UpscaleResult<T> {
        let request =
            HttpRequest::post_json(self.url(endpoint), &body).with_timeout_ms(self.timeout_ms);

        let response = self
            .http
            .execute(request)
            .await
            .map_err(|e| UpscaleError::Network(format!("{}: {}", endpoint, e)))?;

        if !response.is_success() {
            return Err(UpscaleError::Http {
                status: response.status,
                endpoint: endpoint.to_string(),
            });
        }

        serde_json::from_str(&response.body)
            .map_err(|e| UpscaleError::Json(format!("Unexpected {} response: {}", endpoint, e)))
    }

    /// Bootstrap a session; the token may come back as a string or a number
    pub async fn connect(&self) -> UpscaleResult<SessionToken> {
        let response: ConnectResponse = self.post("connect", json!({})).await?;
        match response.auth {
            Value::String(token) if !token.is_empty() => Ok(SessionToken::new(token)),
            Value::Number(n) => Ok(SessionToken::new(n.to_string())),
            _ => Err(UpscaleError::Json(
                "connect response carried no auth token".into(),
            )),
        }
    }

    /// One page of the company listing, zero-based
    pub async fn companies(
        &self,
        auth: Option<&SessionToken>,
        page: u32,
    ) -> UpscaleResult<Vec<Company>> {
        let response: CompaniesResponse = self
            .post("companies", json!({ "auth": auth, "page": page }))
            .await?;
        Ok(match response {
            CompaniesResponse::List(companies) => companies,
            CompaniesResponse::Wrapped { companies } => companies,
        })
    }

    pub async fn company_history(
        &self,
        auth: Option<&SessionToken>,
        symbol: &str,
        period: FramePeriod,
        interval: FrameInterval,
    ) -> UpscaleResult<Vec<PriceBar>> {
        let response: HistoryResponse = self
            .post(
                "company-history",
                json!({
                    "auth": auth,
                    "company": symbol,
                    "period": period,
                    "interval": interval,
                }),
            )
            .await?;
        Ok(response.into_bars())
    }

    /// The forming bar for today; its close is usually the unknown sentinel
    pub async fn company_current(
        &self,
        auth: Option<&SessionToken>,
        symbol: &str,
    ) -> UpscaleResult<PriceBar> {
        self.post("company-current", json!({ "auth": auth, "company": symbol }))
            .await
    }

    pub async fn company_chart(
        &self,
        auth: Option<&SessionToken>,
        symbol: &str,
        period: FramePeriod,
        interval: FrameInterval,
        size: Option<u32>,
    ) -> UpscaleResult<ChartImage> {
        let response: ChartResponse = self
            .post(
                "company-history-image",
                json!({
                    "auth": auth,
                    "company": symbol,
                    "period": period,
                    "interval": interval,
                    "size": size.unwrap_or(DEFAULT_CHART_SIZE),
                }),
            )
            .await?;
        ChartImage::from_base64(&response.image_base64)
    }

    pub async fn news(
        &self,
        auth: Option<&SessionToken>,
        everything: bool,
    ) -> UpscaleResult<Vec<Article>> {
        let response: NewsResponse = self
            .post("news", json!({ "auth": auth, "is-everything": everything }))
            .await?;
        Ok(match response {
            NewsResponse::List(articles) => articles,
            NewsResponse::Wrapped { articles } => articles,
        })
    }

    /// One chatbot turn
    pub async fn chat(&self, auth: Option<&SessionToken>, user_input: &str) -> UpscaleResult<String> {
        let response: ChatResponse = self
            .post("chatbot", json!({ "auth": auth, "user_input": user_input }))
            .await?;
        Ok(response.reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::http::testing::ScriptedHttpClient;
    use crate::api::http::{HttpError, HttpResponse};

    fn client_with(http: ScriptedHttpClient) -> (BackendClient, Arc<ScriptedHttpClient>) {
        let http = Arc::new(http);
        let client = BackendClient::new("http://backend.test/api/react/", http.clone(), 500);
        (client, http)
    }

    #[tokio::test]
    async fn connect_accepts_string_or_number() {
        let (client, http) = client_with(
            ScriptedHttpClient::new().json("/connect", 200, r#"{"auth": "abc123"}"#),
        );
        assert_eq!(client.connect().await.unwrap().as_str(), "abc123");
        assert_eq!(http.requests()[0].url, "http://backend.test/api/react/connect");
        assert_eq!(http.requests()[0].timeout_ms, 500);

        let (client, _) = client_with(
            ScriptedHttpClient::new().json("/connect", 200, r#"{"auth": 3275363899}"#),
        );
        assert_eq!(client.connect().await.unwrap().as_str(), "3275363899");

        let (client, _) =
            client_with(ScriptedHttpClient::new().json("/connect", 200, r#"{"auth": null}"#));
        assert!(client.connect().await.is_err());
    }

    #[tokio::test]
    async fn companies_accepts_both_shapes_and_sends_page() {
        let (client, http) = client_with(ScriptedHttpClient::new().json(
            "/companies",
            200,
            r#"[{"symbol": "AAPL", "name": "Apple", "price": -1}]"#,
        ));
        let token = SessionToken::new("tok");
        let companies = client.companies(Some(&token), 3).await.unwrap();
        assert_eq!(companies[0].symbol, "AAPL");
        assert_eq!(companies[0].known_price(), None);
        assert_eq!(
            http.bodies_for("/companies")[0],
            json!({"auth": "tok", "page": 3})
        );

        let (client, _) = client_with(ScriptedHttpClient::new().json(
            "/companies",
            200,
            r#"{"companies": [{"symbol": "MSFT", "name": "Microsoft"}]}"#,
        ));
        assert_eq!(client.companies(None, 0).await.unwrap()[0].symbol, "MSFT");

        let (client, _) =
            client_with(ScriptedHttpClient::new().json("/companies", 200, r#"{"other": 1}"#));
        assert!(client.companies(None, 0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn history_accepts_wrapped_shapes() {
        let bar = r#"{"TimeStamp": 1, "OpenPrice": 2.0, "ClosePrice": 3.0}"#;
        for body in [
            format!("[{}]", bar),
            format!(r#"{{"Year": [{}]}}"#, bar),
            format!(r#"{{"data": [{}]}}"#, bar),
        ] {
            let (client, _) =
                client_with(ScriptedHttpClient::new().json("/company-history", 200, &body));
            let bars = client
                .company_history(None, "AAPL", FramePeriod::LastDay, FrameInterval::Day)
                .await
                .unwrap();
            assert_eq!(bars.len(), 1);
        }
    }

    #[tokio::test]
    async fn history_request_names_period_and_interval() {
        let (client, http) =
            client_with(ScriptedHttpClient::new().json("/company-history", 200, "[]"));
        client
            .company_history(None, "IBM", FramePeriod::LastYear, FrameInterval::Week)
            .await
            .unwrap();
        assert_eq!(
            http.bodies_for("/company-history")[0],
            json!({"auth": null, "company": "IBM", "period": "LAST_YEAR", "interval": "WEEK"})
        );
    }

    #[tokio::test]
    async fn non_success_is_http_error() {
        let (client, _) = client_with(ScriptedHttpClient::new().json("/news", 502, ""));
        let err = client.news(None, false).await.unwrap_err();
        assert!(matches!(err, UpscaleError::Http { status: 502, .. }));
        assert!(err.is_network());
    }

    #[tokio::test]
    async fn transport_failure_is_network_error() {
        let (client, _) = client_with(
            ScriptedHttpClient::new().route("/chatbot", |_| Err(HttpError::new("refused"))),
        );
        let err = client.chat(None, "hi").await.unwrap_err();
        assert!(matches!(err, UpscaleError::Network(_)));
    }

    #[tokio::test]
    async fn chart_decodes_image() {
        let (client, http) = client_with(ScriptedHttpClient::new().route(
            "/company-history-image",
            |_| Ok(HttpResponse::ok_json(r#"{"image-base64": "/9j/4A=="}"#)),
        ));
        let image = client
            .company_chart(None, "AAPL", FramePeriod::LastMonth, FrameInterval::Day, None)
            .await
            .unwrap();
        assert_eq!(image.bytes.len(), 4);
        assert_eq!(http.bodies_for("/company-history-image")[0]["size"], 256);
    }

    #[tokio::test]
    async fn news_sends_everything_flag() {
        let (client, http) = client_with(
            ScriptedHttpClient::new().json("/news", 200, r#"{"articles": [{"title": "A"}]}"#),
        );
        let articles = client.news(None, true).await.unwrap();
        assert_eq!(articles[0].title(), "A");
        assert_eq!(http.bodies_for("/news")[0]["is-everything"], true);
    }
}
