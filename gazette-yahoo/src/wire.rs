//! Wire shapes for the chart endpoint.
//!
//! Everything is optional at this layer; `decode` turns absences into
//! tagged failures instead of letting them surface later as field panics.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct ChartEnvelope {
    pub chart: ChartNode,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChartNode {
    #[serde(default)]
    pub result: Option<Vec<ChartResult>>,
    #[serde(default)]
    pub error: Option<ChartApiError>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChartApiError {
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChartResult {
    #[serde(default)]
    pub meta: Option<ChartMeta>,
    #[serde(default)]
    pub timestamp: Option<Vec<i64>>,
    #[serde(default)]
    pub indicators: Option<Indicators>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ChartMeta {
    #[serde(default)]
    pub regular_market_price: Option<f64>,
    #[serde(default)]
    pub previous_close: Option<f64>,
    #[serde(default)]
    pub chart_previous_close: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub market_state: Option<String>,
    #[serde(default)]
    pub fifty_two_week_high: Option<f64>,
    #[serde(default)]
    pub fifty_two_week_low: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Indicators {
    #[serde(default)]
    pub quote: Vec<QuoteBlock>,
}

/// Parallel series; inner nulls mark gaps the provider could not fill.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct QuoteBlock {
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
