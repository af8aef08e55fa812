use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarketKind {
    Stocks,
    Crypto,
}

impl fmt::Display for MarketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarketKind::Stocks => write!(f, "stocks"),
            MarketKind::Crypto => write!(f, "crypto"),
        }
    }
}

/// One trading session as reported by the equities provider.
/// Either field may be missing when the session is still open or the provider has a gap.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SessionBar {
    pub close: Option<f64>,
    pub volume: Option<u64>,
}

/// Latest close of an equity together with the close of the session before it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub symbol: String,
    pub price: f64,
    pub previous_close: f64,
    pub volume: u64,
}

impl Quote {
    pub fn change(&self) -> f64 {
        self.price - self.previous_close
    }

    /// Percent move against the previous close. `None` when the previous close is not positive.
    pub fn change_percent(&self) -> Option<f64> {
        if self.previous_close > 0.0 {
            Some(self.change() / self.previous_close * 100.0)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketListing {
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub current_price: f64,
    pub price_change_percentage_24h: Option<f64>,
    pub total_volume: f64,
    pub market_cap: f64,
    pub market_cap_rank: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendingEntry {
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub market_cap_rank: Option<u32>,
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockInfo {
    pub symbol: String,
    pub name: String,
    pub price: f64,
    pub volume: u64,
    pub fifty_two_week_high: f64,
    pub fifty_two_week_low: f64,
}
