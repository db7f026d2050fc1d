//! Configuration for the briefing pipeline.
//!
//! Tunables live in [`GazetteConfig`] with conservative defaults; secrets are
//! read from the environment by [`Credentials::from_env`] and stay optional,
//! so a missing enrichment or mail credential disables that feature rather
//! than failing the run.

use std::time::Duration;

/// Tunables for one pipeline run.
#[derive(Debug, Clone)]
pub struct GazetteConfig {
    /// Symbols swept for market snapshots.
    pub symbols: Vec<String>,
    /// Symbols the news request is keyed by.
    pub news_symbols: Vec<String>,
    /// Deadline for one market-data chart call.
    pub market_deadline: Duration,
    /// Deadline for the news call.
    pub news_deadline: Duration,
    /// Deadline for the analysis-service call.
    pub analysis_deadline: Duration,
    /// Deadline for the mail-relay call.
    pub mail_deadline: Duration,
    /// Maximum number of stories kept after enrichment.
    pub news_limit: usize,
    /// Maximum excerpt length in characters before the continuation marker.
    pub excerpt_limit: usize,
    /// Absolute percent-change threshold (exclusive) for the movers summary.
    pub movers_threshold: f64,
}

impl Default for GazetteConfig {
    fn default() -> Self {
        Self {
            symbols: to_strings(&["SPY", "QQQ", "AAPL", "MSFT", "TSLA", "NVDA"]),
            news_symbols: to_strings(&["AAPL", "MSFT", "TSLA", "NVDA"]),
            market_deadline: Duration::from_secs(8),
            news_deadline: Duration::from_secs(10),
            analysis_deadline: Duration::from_secs(90),
            mail_deadline: Duration::from_secs(30),
            news_limit: 5,
            excerpt_limit: 300,
            movers_threshold: 2.0,
        }
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}

/// Mail-relay settings; only usable when all three pieces are configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailSettings {
    /// Relay API key.
    pub api_key: String,
    /// Sending domain.
    pub domain: String,
    /// Recipient address for the briefing.
    pub recipient: String,
}

/// Credentials for the external collaborators, all optional at this layer.
///
/// The pipeline decides which absences are fatal: a missing analysis
/// credential fails the run, a missing news or mail credential only disables
/// that step.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    /// Analysis-service API key (`SWARMS_API_KEY`).
    pub analysis_api_key: Option<String>,
    /// News-provider API key (`FMP_API_KEY`).
    pub news_api_key: Option<String>,
    /// Mail settings (`MAILGUN_API_KEY`, `MAILGUN_DOMAIN`, `RECIPIENT_EMAIL`).
    pub mail: Option<MailSettings>,
}

impl Credentials {
    /// Read credentials from the process environment.
    ///
    /// Empty values count as absent. Mail settings are only returned when
    /// all three variables are present.
    #[must_use]
    pub fn from_env() -> Self {
        let mail = match (
            non_empty_var("MAILGUN_API_KEY"),
            non_empty_var("MAILGUN_DOMAIN"),
            non_empty_var("RECIPIENT_EMAIL"),
        ) {
            (Some(api_key), Some(domain), Some(recipient)) => Some(MailSettings {
                api_key,
                domain,
                recipient,
            }),
            _ => None,
        };

        Self {
            analysis_api_key: non_empty_var("SWARMS_API_KEY"),
            news_api_key: non_empty_var("FMP_API_KEY"),
            mail,
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
