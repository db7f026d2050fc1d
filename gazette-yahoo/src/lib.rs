//! gazette-yahoo
//!
//! Yahoo Finance chart-API connector. One [`YahooQuotes`] instance wraps a
//! shared `reqwest::Client` and turns a chart response into a validated
//! [`gazette_core::SymbolSnapshot`], converting every failure mode into a
//! tagged [`gazette_core::GazetteError`] instead of raising past its
//! boundary.
#![warn(missing_docs)]

mod decode;
mod wire;

use std::time::Duration;

use async_trait::async_trait;
use gazette_core::{GazetteError, MarketDataSource, SymbolSnapshot, send_with_deadline};
use tracing::debug;

/// Public chart endpoint; no API key required.
const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";

/// Deadline for one chart call.
const DEFAULT_DEADLINE: Duration = Duration::from_secs(8);

/// The provider rejects default/empty client identification, so the
/// connector sends a realistic browser User-Agent.
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36";

/// Chart-API client for per-symbol market snapshots.
#[derive(Clone)]
pub struct YahooQuotes {
    http: reqwest::Client,
    base_url: String,
    deadline: Duration,
}

impl YahooQuotes {
    /// Build a client against the public endpoint with the default deadline.
    #[must_use]
    pub fn new(http: reqwest::Client) -> Self {
        Self {
            http,
            base_url: DEFAULT_BASE_URL.to_string(),
            deadline: DEFAULT_DEADLINE,
        }
    }

    /// Point the client at a different base URL (tests, proxies).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        let trimmed = self.base_url.trim_end_matches('/').len();
        self.base_url.truncate(trimmed);
        self
    }

    /// Override the per-call deadline.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }
}

#[async_trait]
impl MarketDataSource for YahooQuotes {
    async fn snapshot(&self, symbol: &str) -> Result<SymbolSnapshot, GazetteError> {
        let what = format!("chart for {symbol}");
        let url = format!("{}/v8/finance/chart/{symbol}", self.base_url);
        debug!(%symbol, "fetching chart");

        let response = send_with_deadline(
            &what,
            self.http.get(url).header(reqwest::header::USER_AGENT, USER_AGENT),
            self.deadline,
        )
        .await?;

        let envelope = response
            .json::<wire::ChartEnvelope>()
            .await
            .map_err(|e| GazetteError::malformed(what.as_str(), e.to_string()))?;

        decode::decode_chart(symbol, envelope)
    }
}
