use async_trait::async_trait;
use log::{debug, error};
use radar_coingecko::CoingeckoClient;
use radar_coingecko::markets::{CoinMarket, CoinsMarkets, MarketOrder, MarketsParams};
use radar_coingecko::trending::SearchTrending;
use radar_engine::derive_quotes;
use radar_shared_models::{MarketListing, Quote, SessionBar, StockInfo, TrendingEntry};
use radar_yahoo::YahooClient;
use radar_yahoo::chart::{Chart, Chart1d, ChartParams, ChartResult};
use reqwest::StatusCode;
use thiserror::Error;

/// Popular large caps scanned for movers.
pub const WATCHLIST: [&str; 50] = [
    "AAPL", "MSFT", "GOOGL", "AMZN", "META", "NVDA", "TSLA", "AMD", "INTC", "JPM", "V", "JNJ",
    "WMT", "PG", "MA", "HD", "DIS", "NFLX", "PYPL", "ADBE", "CRM", "CMCSA", "PFE", "KO", "PEP",
    "ABT", "MRK", "TMO", "ABBV", "COST", "AVGO", "MCD", "NKE", "DHR", "CSCO", "ACN", "WFC", "BMY",
    "NEE", "VZ", "TXN", "QCOM", "LIN", "HON", "RTX", "UPS", "AMGN", "PM", "UNH", "LOW",
];

pub const LOOKBACK_RANGE: &str = "2d";
pub const SESSION_INTERVAL: &str = "1d";
pub const INFO_RANGE: &str = "1d";
pub const MARKET_PAGE_SIZE: u32 = 100;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Provider error: {0}")]
    Provider(String),
}

#[async_trait]
pub trait QuoteSource {
    /// Daily sessions in the lookback window, oldest first. `None` when the symbol is unknown.
    async fn recent_sessions(&self, symbol: &str) -> Result<Option<Vec<SessionBar>>, FetchError>;

    async fn stock_info(&self, symbol: &str) -> Result<Option<StockInfo>, FetchError>;
}

#[async_trait]
pub trait ListingSource {
    async fn markets(&self, params: MarketsParams) -> Result<Vec<MarketListing>, FetchError>;

    async fn trending(&self) -> Result<Vec<TrendingEntry>, FetchError>;
}

async fn fetch_chart(
    client: &YahooClient,
    symbol: &str,
    range: &str,
) -> Result<Option<ChartResult>, FetchError> {
    let params = ChartParams::builder()
        .symbol(symbol)
        .range(range)
        .interval(SESSION_INTERVAL)
        .build();

    let response = match client.call::<Chart1d>(params).await {
        Ok(response) => response,
        Err(err) if err.status() == Some(StatusCode::NOT_FOUND) => return Ok(None),
        Err(err) => return Err(err.into()),
    };

    chart_outcome(response.chart)
}

/// A `Not Found` chart is a coverage gap. Any other chart error fails the request.
fn chart_outcome(chart: Chart) -> Result<Option<ChartResult>, FetchError> {
    if let Some(result) = chart.result.and_then(|results| results.into_iter().next()) {
        return Ok(Some(result));
    }

    match chart.error {
        Some(err) if err.code == "Not Found" => Ok(None),
        Some(err) => Err(FetchError::Provider(format!(
            "{}: {}",
            err.code,
            err.description.unwrap_or_default()
        ))),
        None => Ok(None),
    }
}

fn sessions_from_chart(result: &ChartResult) -> Vec<SessionBar> {
    let Some(quote) = result.indicators.quote.first() else {
        return Vec::new();
    };

    quote
        .close
        .iter()
        .enumerate()
        .map(|(i, close)| SessionBar {
            close: *close,
            volume: quote.volume.get(i).copied().flatten(),
        })
        .collect()
}

fn stock_info_from_chart(result: ChartResult) -> StockInfo {
    let meta = result.meta;

    StockInfo {
        name: meta.long_name.or(meta.short_name).unwrap_or_default(),
        price: meta.regular_market_price.unwrap_or(0.0),
        volume: meta.regular_market_volume.unwrap_or(0),
        fifty_two_week_high: meta.fifty_two_week_high.unwrap_or(0.0),
        fifty_two_week_low: meta.fifty_two_week_low.unwrap_or(0.0),
        symbol: meta.symbol,
    }
}

#[async_trait]
impl QuoteSource for YahooClient {
    async fn recent_sessions(&self, symbol: &str) -> Result<Option<Vec<SessionBar>>, FetchError> {
        let chart = fetch_chart(self, symbol, LOOKBACK_RANGE).await?;
        Ok(chart.as_ref().map(sessions_from_chart))
    }

    async fn stock_info(&self, symbol: &str) -> Result<Option<StockInfo>, FetchError> {
        let chart = fetch_chart(self, symbol, INFO_RANGE).await?;
        Ok(chart.map(stock_info_from_chart))
    }
}

fn listing_from_market(coin: CoinMarket) -> MarketListing {
    MarketListing {
        id: coin.id,
        symbol: coin.symbol,
        name: coin.name,
        current_price: coin.current_price.unwrap_or(0.0),
        price_change_percentage_24h: coin.price_change_percentage_24h,
        total_volume: coin.total_volume.unwrap_or(0.0),
        market_cap: coin.market_cap.unwrap_or(0.0),
        market_cap_rank: coin.market_cap_rank,
    }
}

#[async_trait]
impl ListingSource for CoingeckoClient {
    async fn markets(&self, params: MarketsParams) -> Result<Vec<MarketListing>, FetchError> {
        let page = self.call::<CoinsMarkets>(params).await?;
        Ok(page.into_iter().map(listing_from_market).collect())
    }

    async fn trending(&self) -> Result<Vec<TrendingEntry>, FetchError> {
        let response = self.call0::<SearchTrending>().await?;

        Ok(response
            .coins
            .into_iter()
            .map(|coin| TrendingEntry {
                id: coin.item.id,
                symbol: coin.item.symbol,
                name: coin.item.name,
                market_cap_rank: coin.item.market_cap_rank,
                score: coin.item.score,
            })
            .collect())
    }
}

/// Fetches equity quotes for a fixed watchlist, one symbol after another.
pub struct StockCollector<S> {
    source: S,
    tickers: Vec<String>,
}

impl<S: QuoteSource> StockCollector<S> {
    pub fn new(source: S) -> Self {
        Self::with_tickers(source, &WATCHLIST)
    }

    pub fn with_tickers(source: S, tickers: &[&str]) -> Self {
        Self {
            source,
            tickers: tickers.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[cfg(test)]
    pub(crate) fn source(&self) -> &S {
        &self.source
    }

    async fn try_fetch_quotes(&self) -> Result<Vec<Quote>, FetchError> {
        let mut batch = Vec::with_capacity(self.tickers.len());

        for symbol in &self.tickers {
            match self.source.recent_sessions(symbol).await? {
                Some(sessions) => batch.push((symbol.as_str(), sessions)),
                None => debug!("No chart for {symbol}, skipping"),
            }
        }

        let quotes = derive_quotes(
            batch
                .iter()
                .map(|(symbol, sessions)| (*symbol, sessions.as_slice())),
        );
        debug!(
            "Derived {} quotes from {} tickers",
            quotes.len(),
            self.tickers.len()
        );

        Ok(quotes)
    }

    /// Quotes for every ticker with two usable sessions. Empty when the batch fails.
    pub async fn fetch_quotes(&self) -> Vec<Quote> {
        match self.try_fetch_quotes().await {
            Ok(quotes) => quotes,
            Err(e) => {
                error!("Error fetching stock data: {e}");
                Vec::new()
            }
        }
    }

    pub async fn get_stock_info(&self, symbol: &str) -> Option<StockInfo> {
        match self.source.stock_info(symbol).await {
            Ok(info) => info,
            Err(e) => {
                error!("Error fetching {symbol}: {e}");
                None
            }
        }
    }
}

pub struct CryptoCollector<C> {
    source: C,
}

impl<C: ListingSource> CryptoCollector<C> {
    pub fn new(source: C) -> Self {
        Self { source }
    }

    #[cfg(test)]
    pub(crate) fn source(&self) -> &C {
        &self.source
    }

    /// First page of assets by market cap, in provider order.
    pub async fn fetch_market_page(&self) -> Vec<MarketListing> {
        let params = MarketsParams::builder()
            .vs_currency("usd")
            .order(MarketOrder::MarketCapDesc)
            .per_page(MARKET_PAGE_SIZE)
            .page(1)
            .sparkline(false)
            .price_change_percentage("24h,7d")
            .build();

        match self.source.markets(params).await {
            Ok(listings) => listings,
            Err(e) => {
                error!("Error fetching crypto data: {e}");
                Vec::new()
            }
        }
    }

    /// Assets by 24h traded volume, ranked by the provider.
    pub async fn get_most_active(&self, limit: usize) -> Vec<MarketListing> {
        let per_page = u32::try_from(limit).unwrap_or(u32::MAX).clamp(1, 250);
        let params = MarketsParams::builder()
            .vs_currency("usd")
            .order(MarketOrder::VolumeDesc)
            .per_page(per_page)
            .page(1)
            .build();

        match self.source.markets(params).await {
            Ok(mut listings) => {
                listings.truncate(limit);
                listings
            }
            Err(e) => {
                error!("Error fetching crypto volume leaders: {e}");
                Vec::new()
            }
        }
    }

    pub async fn get_trending(&self) -> Vec<TrendingEntry> {
        match self.source.trending().await {
            Ok(entries) => entries,
            Err(e) => {
                error!("Error fetching trending: {e}");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    pub(crate) fn bars(closes: &[f64], volume: u64) -> Vec<SessionBar> {
        closes
            .iter()
            .map(|c| SessionBar {
                close: Some(*c),
                volume: Some(volume),
            })
            .collect()
    }

    #[derive(Default)]
    pub(crate) struct FakeQuotes {
        pub sessions: HashMap<String, Vec<SessionBar>>,
        pub fail_on: Option<String>,
        pub calls: AtomicUsize,
    }

    impl FakeQuotes {
        pub(crate) fn with(entries: &[(&str, Vec<SessionBar>)]) -> Self {
            Self {
                sessions: entries
                    .iter()
                    .map(|(s, b)| (s.to_string(), b.clone()))
                    .collect(),
                ..Default::default()
            }
        }
    }

    #[async_trait]
    impl QuoteSource for FakeQuotes {
        async fn recent_sessions(
            &self,
            symbol: &str,
        ) -> Result<Option<Vec<SessionBar>>, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_on.as_deref() == Some(symbol) {
                return Err(FetchError::Provider("simulated outage".to_string()));
            }
            Ok(self.sessions.get(symbol).cloned())
        }

        async fn stock_info(&self, symbol: &str) -> Result<Option<StockInfo>, FetchError> {
            if self.fail_on.as_deref() == Some(symbol) {
                return Err(FetchError::Provider("simulated outage".to_string()));
            }
            Ok(self.sessions.get(symbol).map(|_| StockInfo {
                symbol: symbol.to_string(),
                name: format!("{symbol} Inc."),
                price: 1.0,
                volume: 10,
                fifty_two_week_high: 2.0,
                fifty_two_week_low: 0.5,
            }))
        }
    }

    #[derive(Default)]
    pub(crate) struct FakeListings {
        pub page: Vec<MarketListing>,
        pub trending: Vec<TrendingEntry>,
        pub fail: bool,
        pub calls: AtomicUsize,
        pub last_params: Mutex<Option<MarketsParams>>,
    }

    #[async_trait]
    impl ListingSource for FakeListings {
        async fn markets(&self, params: MarketsParams) -> Result<Vec<MarketListing>, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let per_page = params.per_page.unwrap_or(100) as usize;
            *self.last_params.lock().unwrap() = Some(params);
            if self.fail {
                return Err(FetchError::Provider("simulated outage".to_string()));
            }
            Ok(self.page.iter().take(per_page).cloned().collect())
        }

        async fn trending(&self) -> Result<Vec<TrendingEntry>, FetchError> {
            if self.fail {
                return Err(FetchError::Provider("simulated outage".to_string()));
            }
            Ok(self.trending.clone())
        }
    }

    pub(crate) fn listing(symbol: &str, change: Option<f64>, volume: f64) -> MarketListing {
        MarketListing {
            id: symbol.to_lowercase(),
            symbol: symbol.to_lowercase(),
            name: symbol.to_string(),
            current_price: 2.5,
            price_change_percentage_24h: change,
            total_volume: volume,
            market_cap: 1.0e9,
            market_cap_rank: Some(1),
        }
    }

    #[tokio::test]
    async fn skips_symbols_without_two_sessions() {
        let source = FakeQuotes::with(&[
            ("A", bars(&[100.0, 110.0], 500)),
            ("B", bars(&[100.0], 900)),
        ]);
        let collector = StockCollector::with_tickers(source, &["A", "B", "MISSING"]);

        let quotes = collector.fetch_quotes().await;

        assert_eq!(quotes.len(), 1);
        assert_eq!(quotes[0].symbol, "A");
        assert_eq!(quotes[0].volume, 500);
    }

    #[tokio::test]
    async fn provider_error_empties_whole_batch() {
        let mut source = FakeQuotes::with(&[
            ("A", bars(&[100.0, 110.0], 500)),
            ("B", bars(&[100.0, 90.0], 900)),
        ]);
        source.fail_on = Some("B".to_string());
        let collector = StockCollector::with_tickers(source, &["A", "B"]);

        assert!(collector.fetch_quotes().await.is_empty());
    }

    #[tokio::test]
    async fn stock_info_failure_is_none() {
        let mut source = FakeQuotes::with(&[("AAPL", bars(&[1.0, 2.0], 1))]);
        source.fail_on = Some("TSLA".to_string());
        let collector = StockCollector::with_tickers(source, &["AAPL"]);

        assert_eq!(
            collector.get_stock_info("AAPL").await.map(|i| i.name),
            Some("AAPL Inc.".to_string())
        );
        assert!(collector.get_stock_info("TSLA").await.is_none());
        assert!(collector.get_stock_info("NOPE").await.is_none());
    }

    #[test]
    fn default_watchlist_has_fifty_unique_tickers() {
        let collector = StockCollector::new(FakeQuotes::default());
        let mut tickers = collector.tickers.clone();
        tickers.sort();
        tickers.dedup();

        assert_eq!(tickers.len(), 50);
    }

    #[tokio::test]
    async fn market_page_requests_hundred_by_market_cap() {
        let source = FakeListings {
            page: vec![listing("BTC", Some(1.0), 10.0)],
            ..Default::default()
        };
        let collector = CryptoCollector::new(source);

        let page = collector.fetch_market_page().await;

        assert_eq!(page.len(), 1);
        let params = collector.source.last_params.lock().unwrap().take().unwrap();
        assert_eq!(params.order, Some(MarketOrder::MarketCapDesc));
        assert_eq!(params.per_page, Some(100));
        assert_eq!(params.price_change_percentage.as_deref(), Some("24h,7d"));
    }

    #[tokio::test]
    async fn most_active_uses_volume_order_and_limit() {
        let source = FakeListings {
            page: (0..20)
                .map(|i| listing(&format!("C{i}"), Some(0.0), 100.0 - i as f64))
                .collect(),
            ..Default::default()
        };
        let collector = CryptoCollector::new(source);

        let active = collector.get_most_active(5).await;

        assert_eq!(active.len(), 5);
        assert_eq!(active[0].symbol, "c0");
        let params = collector.source.last_params.lock().unwrap().take().unwrap();
        assert_eq!(params.order, Some(MarketOrder::VolumeDesc));
        assert_eq!(params.per_page, Some(5));
    }

    #[tokio::test]
    async fn failing_crypto_provider_yields_empty() {
        let collector = CryptoCollector::new(FakeListings {
            fail: true,
            ..Default::default()
        });

        assert!(collector.fetch_market_page().await.is_empty());
        assert!(collector.get_trending().await.is_empty());
        assert!(collector.get_most_active(10).await.is_empty());
    }

    #[test]
    fn chart_sessions_pair_close_with_volume() {
        let body = r#"{
            "meta": {"symbol": "KO"},
            "timestamp": [1, 2, 3],
            "indicators": {"quote": [{"close": [60.0, null, 61.5], "volume": [100, 200]}]}
        }"#;
        let result: ChartResult = serde_json_from(body);

        let sessions = sessions_from_chart(&result);

        assert_eq!(
            sessions,
            vec![
                SessionBar { close: Some(60.0), volume: Some(100) },
                SessionBar { close: None, volume: Some(200) },
                SessionBar { close: Some(61.5), volume: None },
            ]
        );
    }

    #[test]
    fn null_market_fields_default_to_zero() {
        let coin: CoinMarket = serde_json_from(
            r#"{"id": "new", "symbol": "new", "name": "New", "current_price": null,
                "total_volume": null, "market_cap": null, "market_cap_rank": null,
                "price_change_percentage_24h": null}"#,
        );

        let listing = listing_from_market(coin);

        assert_eq!(listing.current_price, 0.0);
        assert_eq!(listing.total_volume, 0.0);
        assert_eq!(listing.price_change_percentage_24h, None);
        assert_eq!(listing.market_cap_rank, None);
    }

    #[test]
    fn chart_with_result_is_used() {
        let chart: Chart = serde_json_from(
            r#"{"result": [{"meta": {"symbol": "AAPL"}, "indicators": {"quote": []}}],
                "error": null}"#,
        );

        let result = chart_outcome(chart).unwrap();

        assert_eq!(result.map(|r| r.meta.symbol), Some("AAPL".to_string()));
    }

    #[test]
    fn not_found_chart_is_a_gap() {
        let chart: Chart = serde_json_from(
            r#"{"result": null,
                "error": {"code": "Not Found", "description": "No data found, symbol may be delisted"}}"#,
        );

        assert!(chart_outcome(chart).unwrap().is_none());
    }

    #[test]
    fn other_chart_error_fails() {
        let chart: Chart = serde_json_from(
            r#"{"result": null,
                "error": {"code": "Bad Request", "description": "Invalid input - interval=1x"}}"#,
        );

        match chart_outcome(chart) {
            Err(FetchError::Provider(message)) => {
                assert_eq!(message, "Bad Request: Invalid input - interval=1x")
            }
            other => panic!("expected provider error, got {other:?}"),
        }
    }

    #[test]
    fn empty_chart_is_a_gap() {
        let chart: Chart = serde_json_from(r#"{"result": [], "error": null}"#);

        assert!(chart_outcome(chart).unwrap().is_none());
    }

    fn serde_json_from<T: serde::de::DeserializeOwned>(body: &str) -> T {
        serde_json::from_str(body).unwrap()
    }
}
