use crate::collectors::{CryptoCollector, ListingSource, QuoteSource, StockCollector};
use chrono::Duration;
use log::debug;
use radar_engine::{TtlCache, ranking};
use radar_shared_models::{MarketKind, MarketListing, Quote, StockInfo, TrendingEntry};

/// Unranked data of one market, as fetched.
#[derive(Debug, Clone)]
pub enum Snapshot {
    Stocks(Vec<Quote>),
    Crypto(Vec<MarketListing>),
}

/// One radar session: both collectors plus the snapshot cache they share.
///
/// Views built from the same market (movers and most active, gainers and losers)
/// rank one cached fetch until the TTL runs out.
pub struct Radar<S, C> {
    stocks: StockCollector<S>,
    crypto: CryptoCollector<C>,
    cache: TtlCache<MarketKind, Snapshot>,
}

impl<S: QuoteSource, C: ListingSource> Radar<S, C> {
    pub fn new(stocks: StockCollector<S>, crypto: CryptoCollector<C>, ttl: Duration) -> Self {
        Self {
            stocks,
            crypto,
            cache: TtlCache::new(ttl),
        }
    }

    async fn quotes(&mut self) -> Vec<Quote> {
        if let Some(Snapshot::Stocks(quotes)) = self.cache.get(&MarketKind::Stocks) {
            debug!("Serving {} cached quotes", quotes.len());
            return quotes.clone();
        }

        let quotes = self.stocks.fetch_quotes().await;
        // Empty means the fetch failed; retry on the next call.
        if !quotes.is_empty() {
            self.cache
                .insert(MarketKind::Stocks, Snapshot::Stocks(quotes.clone()));
        }
        quotes
    }

    async fn listings(&mut self) -> Vec<MarketListing> {
        if let Some(Snapshot::Crypto(listings)) = self.cache.get(&MarketKind::Crypto) {
            debug!("Serving {} cached listings", listings.len());
            return listings.clone();
        }

        let listings = self.crypto.fetch_market_page().await;
        if !listings.is_empty() {
            self.cache
                .insert(MarketKind::Crypto, Snapshot::Crypto(listings.clone()));
        }
        listings
    }

    pub async fn get_top_movers(&mut self, limit: usize) -> Vec<Quote> {
        ranking::top_movers(self.quotes().await, limit)
    }

    pub async fn get_most_active(&mut self, limit: usize) -> Vec<Quote> {
        ranking::most_active(self.quotes().await, limit)
    }

    pub async fn get_top_gainers(&mut self, limit: usize) -> Vec<MarketListing> {
        ranking::top_gainers(self.listings().await, limit)
    }

    pub async fn get_top_losers(&mut self, limit: usize) -> Vec<MarketListing> {
        ranking::top_losers(self.listings().await, limit)
    }

    pub async fn get_crypto_most_active(&self, limit: usize) -> Vec<MarketListing> {
        self.crypto.get_most_active(limit).await
    }

    pub async fn get_trending(&self) -> Vec<TrendingEntry> {
        self.crypto.get_trending().await
    }

    pub async fn get_stock_info(&self, symbol: &str) -> Option<StockInfo> {
        self.stocks.get_stock_info(&symbol.to_uppercase()).await
    }
}
