use crate::method::Method;
use bon::Builder;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Builder)]
#[builder(on(String, into))]
pub struct ChartParams {
    #[serde(skip)]
    pub symbol: String,
    pub range: String,
    pub interval: String,
}

impl Default for ChartParams {
    fn default() -> Self {
        Self {
            symbol: String::new(),
            range: "2d".to_string(),
            interval: "1d".to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ChartResponse {
    pub chart: Chart,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct Chart {
    pub result: Option<Vec<ChartResult>>,
    pub error: Option<ChartError>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ChartError {
    pub code: String,
    pub description: Option<String>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ChartResult {
    pub meta: ChartMeta,
    #[serde(default)]
    pub timestamp: Vec<i64>,
    pub indicators: Indicators,
}

#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ChartMeta {
    pub symbol: String,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub long_name: Option<String>,
    #[serde(default)]
    pub short_name: Option<String>,
    #[serde(default)]
    pub regular_market_price: Option<f64>,
    #[serde(default)]
    pub regular_market_volume: Option<u64>,
    #[serde(default)]
    pub chart_previous_close: Option<f64>,
    #[serde(default)]
    pub fifty_two_week_high: Option<f64>,
    #[serde(default)]
    pub fifty_two_week_low: Option<f64>,
}

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct Indicators {
    #[serde(default)]
    pub quote: Vec<QuoteIndicator>,
}

/// Column-oriented OHLCV arrays, one slot per timestamp. Slots are `null` for gaps.
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct QuoteIndicator {
    #[serde(default)]
    pub open: Vec<Option<f64>>,
    #[serde(default)]
    pub high: Vec<Option<f64>>,
    #[serde(default)]
    pub low: Vec<Option<f64>>,
    #[serde(default)]
    pub close: Vec<Option<f64>>,
    #[serde(default)]
    pub volume: Vec<Option<u64>>,
}

impl ChartResponse {
    /// First result of the chart, if the provider returned one.
    pub fn into_result(self) -> Option<ChartResult> {
        self.chart.result.and_then(|results| results.into_iter().next())
    }
}

pub struct Chart1d;

impl Method for Chart1d {
    const PATH: &'static str = "/v8/finance/chart/";

    type Response = ChartResponse;
    type Params = ChartParams;

    fn resource(params: &Self::Params) -> &str {
        &params.symbol
    }
}
