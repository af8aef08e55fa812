use crate::method::Method;
use bon::Builder;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MarketOrder {
    MarketCapDesc,
    MarketCapAsc,
    VolumeDesc,
    VolumeAsc,
}

#[derive(Serialize, Deserialize, Debug, Builder)]
pub struct MarketsParams {
    #[builder(into)]
    pub vs_currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<MarketOrder>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sparkline: Option<bool>,
    /// Comma separated windows, e.g. `24h,7d`.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub price_change_percentage: Option<String>,
}

impl Default for MarketsParams {
    fn default() -> Self {
        Self {
            vs_currency: "usd".to_string(),
            order: Some(MarketOrder::MarketCapDesc),
            per_page: Some(100),
            page: Some(1),
            sparkline: None,
            price_change_percentage: None,
        }
    }
}

// The provider sends `null` for most numeric fields on freshly listed coins.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CoinMarket {
    pub id: String,
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub current_price: Option<f64>,
    #[serde(default)]
    pub market_cap: Option<f64>,
    #[serde(default)]
    pub market_cap_rank: Option<u32>,
    #[serde(default)]
    pub total_volume: Option<f64>,
    #[serde(default)]
    pub high_24h: Option<f64>,
    #[serde(default)]
    pub low_24h: Option<f64>,
    #[serde(default)]
    pub price_change_24h: Option<f64>,
    #[serde(default)]
    pub price_change_percentage_24h: Option<f64>,
    #[serde(default)]
    pub price_change_percentage_7d_in_currency: Option<f64>,
    #[serde(default)]
    pub last_updated: Option<String>,
}

pub type CoinsMarketsResponse = Vec<CoinMarket>;

pub struct CoinsMarkets;

impl Method for CoinsMarkets {
    const PATH: &'static str = "/coins/markets";

    type Response = CoinsMarketsResponse;
    type Params = MarketsParams;
}
