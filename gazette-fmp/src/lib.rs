//! gazette-fmp
//!
//! Financial Modeling Prep stock-news connector. Fetches recent articles for
//! a ticker list and normalizes them into [`gazette_core::NewsStory`] values;
//! classification of failures into degradation notices is the enrichment
//! step's job, so this client reports precise [`gazette_core::GazetteError`]
//! variants instead.
#![warn(missing_docs)]

use std::time::Duration;

use async_trait::async_trait;
use gazette_core::{GazetteError, NewsSource, NewsStory, send_with_deadline};
use serde::Deserialize;
use tracing::debug;

const DEFAULT_BASE_URL: &str = "https://financialmodelingprep.com";

/// Deadline for one news call.
const DEFAULT_DEADLINE: Duration = Duration::from_secs(10);

/// Stock-news client.
#[derive(Clone)]
pub struct FmpNews {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    deadline: Duration,
}

/// Wire shape of one article; every field is optional and defaulted during
/// normalization, mirroring how unevenly the provider populates them.
#[derive(Debug, Deserialize)]
struct WireStory {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default, rename = "publishedDate")]
    published_date: Option<String>,
    #[serde(default)]
    symbol: Option<String>,
    #[serde(default)]
    url: Option<String>,
}

impl FmpNews {
    /// Build a client for the given API key with the default deadline.
    #[must_use]
    pub fn new(http: reqwest::Client, api_key: impl Into<String>) -> Self {
        Self {
            http,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
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
impl NewsSource for FmpNews {
    async fn latest(
        &self,
        symbols: &[String],
        limit: usize,
    ) -> Result<Vec<NewsStory>, GazetteError> {
        let tickers = symbols.join(",");
        let limit_param = limit.to_string();
        debug!(%tickers, limit, "fetching stock news");

        let response = send_with_deadline(
            "stock news",
            self.http
                .get(format!("{}/api/v3/stock_news", self.base_url))
                .query(&[
                    ("tickers", tickers.as_str()),
                    ("limit", limit_param.as_str()),
                    ("apikey", self.api_key.as_str()),
                ]),
            self.deadline,
        )
        .await?;

        // An error object where an array is expected fails decoding here.
        let wire = response
            .json::<Vec<WireStory>>()
            .await
            .map_err(|e| GazetteError::malformed("stock news", e.to_string()))?;

        Ok(wire.into_iter().map(normalize).collect())
    }
}

fn normalize(story: WireStory) -> NewsStory {
    NewsStory {
        title: story
            .title
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| "No title".to_string()),
        excerpt: story
            .text
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| "No content available".to_string()),
        published: story
            .published_date
            .unwrap_or_else(|| "Unknown date".to_string()),
        symbol: story.symbol.unwrap_or_else(|| "N/A".to_string()),
        url: story.url.unwrap_or_else(|| "#".to_string()),
    }
}
