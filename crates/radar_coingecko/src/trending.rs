use crate::method::Method0;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct TrendingResponse {
    #[serde(default)]
    pub coins: Vec<TrendingCoin>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct TrendingCoin {
    pub item: TrendingItem,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct TrendingItem {
    pub id: String,
    pub name: String,
    pub symbol: String,
    #[serde(default)]
    pub coin_id: Option<u64>,
    #[serde(default)]
    pub market_cap_rank: Option<u32>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub price_btc: Option<f64>,
    #[serde(default)]
    pub score: u32,
}

pub struct SearchTrending;

impl Method0 for SearchTrending {
    const PATH: &'static str = "/search/trending";
    type Response = TrendingResponse;
}
