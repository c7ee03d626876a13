//! Stock page controller
//!
//! Loads one page of companies, then fetches the latest price of every
//! listed symbol independently and overlays each result as it arrives.
//!
//! All network work is owned by a [`JoinSet`] inside [`StockFeed`]. Starting
//! another page load replaces that set, which aborts whatever was still in
//! flight; dropping the controller does the same. Every load also carries a
//! generation number so a result that raced the abort is discarded.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::task::JoinSet;

use crate::activity::{ActivityKind, ActivityLog};
use crate::api::BackendClient;
use crate::error::{UpscaleError, UpscaleResult};
use crate::models::{format_price, Company, FrameInterval, FramePeriod, PriceBar};

use super::session::Session;

/// Latest-price state of one listed symbol
#[derive(Debug, Clone, PartialEq)]
pub enum PriceSlot {
    Pending,
    Known(f64),
    /// The backend answered but had no usable bar
    Unavailable,
    Failed(String),
}

impl PriceSlot {
    pub fn is_settled(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// A result delivered by the feed
#[derive(Debug)]
pub enum StockUpdate {
    Page {
        generation: u64,
        page: u32,
        result: UpscaleResult<Vec<Company>>,
    },
    Price {
        generation: u64,
        symbol: String,
        result: UpscaleResult<Option<f64>>,
    },
}

impl StockUpdate {
    pub fn generation(&self) -> u64 {
        match self {
            Self::Page { generation, .. } | Self::Price { generation, .. } => *generation,
        }
    }
}

/// Where the feed delivers results
pub type UpdateSink = Arc<dyn Fn(StockUpdate) + Send + Sync>;

/// Pure page state: listing, price overlay, pager and error flags
#[derive(Debug, Clone)]
pub struct StocksPage {
    page: u32,
    max_page: u32,
    companies: Vec<Company>,
    prices: HashMap<String, PriceSlot>,
    loading: bool,
    error: Option<String>,
    generation: u64,
}

impl StocksPage {
    pub fn new(max_page: u32) -> Self {
        Self {
            page: 0,
            max_page,
            companies: Vec::new(),
            prices: HashMap::new(),
            loading: false,
            error: None,
            generation: 0,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn max_page(&self) -> u32 {
        self.max_page
    }

    pub fn companies(&self) -> &[Company] {
        &self.companies
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn can_prev(&self) -> bool {
        !self.loading && self.page > 0
    }

    pub fn can_next(&self) -> bool {
        !self.loading && self.page < self.max_page
    }

    pub fn price_slot(&self, symbol: &str) -> Option<&PriceSlot> {
        self.prices.get(symbol)
    }

    /// Whether every listed symbol has a settled price
    pub fn prices_settled(&self) -> bool {
        self.companies
            .iter()
            .all(|c| self.prices.get(&c.symbol).is_some_and(PriceSlot::is_settled))
    }

    /// Symbols whose price fetch failed, with the error text
    pub fn price_failures(&self) -> Vec<(&str, &str)> {
        self.companies
            .iter()
            .filter_map(|c| match self.prices.get(&c.symbol) {
                Some(PriceSlot::Failed(msg)) => Some((c.symbol.as_str(), msg.as_str())),
                _ => None,
            })
            .collect()
    }

    /// Price text for a row: the overlay if known, else the listing price, else "—"
    pub fn display_price(&self, company: &Company) -> String {
        match self.prices.get(&company.symbol) {
            Some(PriceSlot::Known(price)) => format_price(Some(*price)),
            _ => format_price(company.known_price()),
        }
    }

    /// Start loading `page`; returns the generation the results must carry
    pub fn begin_load(&mut self, page: u32) -> UpscaleResult<u64> {
        if page > self.max_page {
            return Err(UpscaleError::Validation(format!(
                "Page {} is past the last page ({})",
                page + 1,
                self.max_page + 1
            )));
        }
        self.generation += 1;
        self.loading = true;
        self.error = None;
        Ok(self.generation)
    }

    /// Fold a result into the page. Returns the symbols whose prices should
    /// now be fetched (non-empty only for a fresh, successful page).
    pub fn apply(&mut self, update: StockUpdate) -> Vec<String> {
        if update.generation() != self.generation {
            return Vec::new();
        }

        match update {
            StockUpdate::Page { page, result, .. } => {
                self.loading = false;
                match result {
                    Ok(companies) => {
                        self.page = page;
                        self.prices = companies
                            .iter()
                            .map(|c| (c.symbol.clone(), PriceSlot::Pending))
                            .collect();
                        let symbols = companies.iter().map(|c| c.symbol.clone()).collect();
                        self.companies = companies;
                        symbols
                    }
                    Err(e) => {
                        self.error = Some(e.to_string());
                        Vec::new()
                    }
                }
            }
            StockUpdate::Price { symbol, result, .. } => {
                if let Some(slot) = self.prices.get_mut(&symbol) {
                    *slot = match result {
                        Ok(Some(price)) => PriceSlot::Known(price),
                        Ok(None) => PriceSlot::Unavailable,
                        Err(e) => PriceSlot::Failed(e.to_string()),
                    };
                }
                Vec::new()
            }
        }
    }
}

/// Owner of the in-flight requests for one stock page
pub struct StockFeed {
    client: BackendClient,
    session: Arc<Session>,
    runtime: Handle,
    sink: UpdateSink,
    log: ActivityLog,
    tasks: JoinSet<()>,
}

impl StockFeed {
    pub fn new(
        client: BackendClient,
        session: Arc<Session>,
        runtime: Handle,
        sink: UpdateSink,
        log: ActivityLog,
    ) -> Self {
        Self {
            client,
            session,
            runtime,
            sink,
            log,
            tasks: JoinSet::new(),
        }
    }

    /// Abort everything still in flight
    pub fn cancel(&mut self) {
        self.tasks = JoinSet::new();
    }

    /// Tasks spawned since the last cancel that have not been reaped
    pub fn in_flight(&self) -> usize {
        self.tasks.len()
    }

    pub fn load_page(&mut self, generation: u64, page: u32) {
        self.cancel();

        let client = self.client.clone();
        let session = Arc::clone(&self.session);
        let sink = Arc::clone(&self.sink);
        let log = self.log.clone();

        self.tasks.spawn_on(
            async move {
                let result = client.companies(session.token(), page).await;
                if let Err(e) = &result {
                    log.record_failure(ActivityKind::RequestFailed, "companies", e);
                }
                sink(StockUpdate::Page {
                    generation,
                    page,
                    result,
                });
            },
            &self.runtime,
        );
    }

    /// One independent request per symbol; a failure affects only its own row
    pub fn fetch_prices(&mut self, generation: u64, symbols: Vec<String>) {
        for symbol in symbols {
            let client = self.client.clone();
            let session = Arc::clone(&self.session);
            let sink = Arc::clone(&self.sink);
            let log = self.log.clone();

            self.tasks.spawn_on(
                async move {
                    let result = client
                        .company_history(
                            session.token(),
                            &symbol,
                            FramePeriod::LastDay,
                            FrameInterval::Day,
                        )
                        .await
                        .map(|bars| PriceBar::latest(&bars).and_then(PriceBar::display_price));
                    if let Err(e) = &result {
                        log.record_failure(
                            ActivityKind::RequestFailed,
                            format!("company-history {}", symbol),
                            e,
                        );
                    }
                    sink(StockUpdate::Price {
                        generation,
                        symbol,
                        result,
                    });
                },
                &self.runtime,
            );
        }
    }
}

/// Page state plus the feed that fills it
pub struct StockController {
    page: StocksPage,
    feed: StockFeed,
}

impl StockController {
    pub fn new(max_page: u32, feed: StockFeed) -> Self {
        Self {
            page: StocksPage::new(max_page),
            feed,
        }
    }

    pub fn state(&self) -> &StocksPage {
        &self.page
    }

    /// Load a page, aborting any earlier page or price requests
    pub fn load(&mut self, page: u32) -> UpscaleResult<()> {
        let generation = self.page.begin_load(page)?;
        self.feed.load_page(generation, page);
        Ok(())
    }

    /// Re-issue the current page
    pub fn reload(&mut self) -> UpscaleResult<()> {
        self.load(self.page.page())
    }

    pub fn next(&mut self) -> UpscaleResult<bool> {
        if !self.page.can_next() {
            return Ok(false);
        }
        self.load(self.page.page() + 1)?;
        Ok(true)
    }

    pub fn prev(&mut self) -> UpscaleResult<bool> {
        if !self.page.can_prev() {
            return Ok(false);
        }
        self.load(self.page.page() - 1)?;
        Ok(true)
    }

    /// Apply a delivered result and start price fetches for a new page
    pub fn handle(&mut self, update: StockUpdate) {
        let generation = update.generation();
        let symbols = self.page.apply(update);
        if !symbols.is_empty() {
            self.feed.fetch_prices(generation, symbols);
        }
    }

    /// Stop all in-flight work, e.g. when the view is left
    pub fn cancel(&mut self) {
        self.feed.cancel();
    }

    pub fn in_flight(&self) -> usize {
        self.feed.in_flight()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::http::testing::ScriptedHttpClient;
    use crate::api::http::{HttpError, HttpResponse};
    use std::time::Duration;
    use tempfile::TempDir;
    use tokio::sync::mpsc;

    const PAGE: &str = r#"[
        {"symbol": "AAPL", "name": "Apple", "price": -1},
        {"symbol": "MSFT", "name": "Microsoft", "price": -1},
        {"symbol": "BAD", "name": "Broken", "price": -1}
    ]"#;

    fn history_for(request: &crate::api::HttpRequest) -> Result<HttpResponse, HttpError> {
        let body: serde_json::Value =
            serde_json::from_str(request.body.as_deref().unwrap_or("{}")).unwrap();
        match body["company"].as_str() {
            Some("AAPL") => Ok(HttpResponse::ok_json(
                r#"[{"TimeStamp": 1, "OpenPrice": 1.0, "ClosePrice": 2.0},
                    {"TimeStamp": 3, "OpenPrice": 187.1, "ClosePrice": -1},
                    {"TimeStamp": 2, "OpenPrice": 1.0, "ClosePrice": 4.0}]"#,
            )),
            Some("MSFT") => Ok(HttpResponse::ok_json("[]")),
            _ => Ok(HttpResponse::with_status(500, "")),
        }
    }

    struct Harness {
        controller: StockController,
        rx: mpsc::UnboundedReceiver<StockUpdate>,
        http: Arc<ScriptedHttpClient>,
        log: ActivityLog,
        _temp: TempDir,
    }

    fn harness(http: ScriptedHttpClient, max_page: u32) -> Harness {
        let temp = TempDir::new().unwrap();
        let log = ActivityLog::new(temp.path().join("activity.log"));
        let http = Arc::new(http);
        let client = BackendClient::new("http://b.test", http.clone(), 1000);
        let (tx, rx) = mpsc::unbounded_channel();
        let sink: UpdateSink = Arc::new(move |u| {
            let _ = tx.send(u);
        });
        let feed = StockFeed::new(
            client,
            Arc::new(Session::with_token(crate::models::SessionToken::new("tok"))),
            Handle::current(),
            sink,
            log.clone(),
        );
        Harness {
            controller: StockController::new(max_page, feed),
            rx,
            http,
            log,
            _temp: temp,
        }
    }

    async fn drain_until_settled(h: &mut Harness) {
        while h.controller.state().is_loading() || !h.controller.state().prices_settled() {
            let update = tokio::time::timeout(Duration::from_secs(5), h.rx.recv())
                .await
                .unwrap()
                .unwrap();
            h.controller.handle(update);
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn page_then_per_symbol_prices() {
        let mut h = harness(
            ScriptedHttpClient::new()
                .json("/companies", 200, PAGE)
                .route("/company-history", history_for),
            9,
        );

        h.controller.load(0).unwrap();
        assert!(h.controller.state().is_loading());
        assert!(!h.controller.state().can_next());
        drain_until_settled(&mut h).await;

        let state = h.controller.state();
        assert_eq!(state.companies().len(), 3);
        assert!(state.error().is_none());

        let aapl = &state.companies()[0];
        assert_eq!(state.price_slot("AAPL"), Some(&PriceSlot::Known(187.1)));
        assert_eq!(state.display_price(aapl), "187.10");
        assert_eq!(state.price_slot("MSFT"), Some(&PriceSlot::Unavailable));
        assert_eq!(state.display_price(&state.companies()[1]), "—");
        assert!(matches!(state.price_slot("BAD"), Some(PriceSlot::Failed(_))));
        assert_eq!(state.price_failures().len(), 1);

        let bodies = h.http.bodies_for("/company-history");
        assert_eq!(bodies.len(), 3);
        assert!(bodies.iter().all(|b| b["period"] == "LAST_DAY" && b["auth"] == "tok"));

        let logged = h.log.read_all().unwrap();
        assert_eq!(logged.len(), 1);
        assert_eq!(logged[0].subject, "company-history BAD");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn page_error_keeps_previous_listing() {
        let mut h = harness(
            ScriptedHttpClient::new().route("/companies", |r| {
                let body: serde_json::Value =
                    serde_json::from_str(r.body.as_deref().unwrap()).unwrap();
                if body["page"] == 0 {
                    Ok(HttpResponse::ok_json(r#"[{"symbol": "AAPL", "name": "Apple"}]"#))
                } else {
                    Ok(HttpResponse::with_status(503, ""))
                }
            })
            .json("/company-history", 200, "[]"),
            9,
        );

        h.controller.load(0).unwrap();
        drain_until_settled(&mut h).await;
        assert!(h.controller.next().unwrap());
        drain_until_settled(&mut h).await;

        let state = h.controller.state();
        assert_eq!(state.page(), 0);
        assert_eq!(state.companies()[0].symbol, "AAPL");
        assert_eq!(state.error(), Some("HTTP 503 from companies"));
        assert!(state.can_next());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn new_load_aborts_in_flight_prices() {
        let mut h = harness(
            ScriptedHttpClient::new()
                .json("/companies", 200, PAGE)
                .route_delayed("/company-history", Duration::from_secs(30), |_| {
                    Ok(HttpResponse::ok_json("[]"))
                }),
            9,
        );

        h.controller.load(0).unwrap();
        let page = h.rx.recv().await.unwrap();
        h.controller.handle(page);
        assert_eq!(h.controller.in_flight(), 4);

        let stale_generation = h.controller.state().generation();
        h.controller.load(1).unwrap();
        assert_eq!(h.controller.in_flight(), 1);

        // a straggler from the aborted load is ignored
        h.controller.handle(StockUpdate::Price {
            generation: stale_generation,
            symbol: "AAPL".into(),
            result: Ok(Some(1.0)),
        });
        assert_eq!(h.controller.state().price_slot("AAPL"), Some(&PriceSlot::Pending));

        h.controller.cancel();
        assert_eq!(h.controller.in_flight(), 0);
    }

    #[test]
    fn pager_bounds() {
        let mut page = StocksPage::new(9);
        assert!(!page.can_prev());
        assert!(page.can_next());
        assert!(page.begin_load(10).unwrap_err().is_validation());

        let generation = page.begin_load(9).unwrap();
        assert!(!page.can_next() && !page.can_prev());
        page.apply(StockUpdate::Page {
            generation,
            page: 9,
            result: Ok(Vec::new()),
        });
        assert!(!page.can_next());
        assert!(page.can_prev());
    }

    #[test]
    fn stale_page_result_is_ignored() {
        let mut page = StocksPage::new(9);
        let first = page.begin_load(0).unwrap();
        let _second = page.begin_load(1).unwrap();

        let symbols = page.apply(StockUpdate::Page {
            generation: first,
            page: 0,
            result: Ok(vec![Company {
                symbol: "OLD".into(),
                name: String::new(),
                exchange: None,
                price: None,
            }]),
        });
        assert!(symbols.is_empty());
        assert!(page.companies().is_empty());
        assert!(page.is_loading());
    }
}
