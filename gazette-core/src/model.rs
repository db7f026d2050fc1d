//! Data model shared by the connectors and the pipeline.
//!
//! Everything here is created fresh per run and discarded afterwards; there
//! is no cross-run persistence anywhere in the workspace.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::GazetteError;

/// Round a value to two decimal places.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Market session state, passed through from the market-data provider.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MarketState {
    /// Pre-market session.
    Pre,
    /// Regular trading hours.
    Regular,
    /// Post-market session.
    Post,
    /// Market closed.
    Closed,
    /// Any other provider-reported state, kept verbatim.
    Other(String),
}

impl MarketState {
    /// Parse a provider state string; unknown values are kept verbatim.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "PRE" => Self::Pre,
            "REGULAR" => Self::Regular,
            "POST" => Self::Post,
            "CLOSED" => Self::Closed,
            other => Self::Other(other.to_string()),
        }
    }

    /// Canonical string form, matching the provider's vocabulary.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pre => "PRE",
            Self::Regular => "REGULAR",
            Self::Post => "POST",
            Self::Closed => "CLOSED",
            Self::Other(s) => s,
        }
    }
}

impl Serialize for MarketState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for MarketState {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Self::parse(&s))
    }
}

/// One symbol's market snapshot for the current run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolSnapshot {
    /// Ticker symbol, non-empty, unique within a run.
    pub symbol: String,
    /// Current price; the live market price when the provider reports one,
    /// otherwise the most recent close.
    pub price: f64,
    /// Session open at the resolved data point.
    pub open: f64,
    /// Session high at the resolved data point.
    pub high: f64,
    /// Session low at the resolved data point.
    pub low: f64,
    /// Traded volume at the resolved data point.
    pub volume: u64,
    /// Absolute change versus the previous close.
    pub change: f64,
    /// Percent change versus the previous close, rounded to 2 decimals.
    pub change_percent: f64,
    /// Heuristic momentum stand-in derived from the symbol itself.
    ///
    /// This is NOT a real multi-period indicator; it only keeps the payload
    /// shape stable for the downstream analysts and must not be interpreted
    /// as a computed oscillator.
    pub momentum_hint: f64,
    /// Calendar date of the resolved data point (UTC).
    pub as_of: NaiveDate,
    /// Quote currency code.
    pub currency: String,
    /// Market session state reported by the provider.
    pub market_state: MarketState,
    /// 52-week high, when the provider reports one.
    pub fifty_two_week_high: Option<f64>,
    /// 52-week low, when the provider reports one.
    pub fifty_two_week_low: Option<f64>,
}

/// Aggregated per-symbol results of one market sweep.
///
/// The key set equals the swept symbol set exactly; each entry is either a
/// snapshot or the error that symbol's fetch produced, never both.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketSweep {
    entries: BTreeMap<String, Result<SymbolSnapshot, GazetteError>>,
}

impl MarketSweep {
    /// Collect per-symbol outcomes into a sweep.
    #[must_use]
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, Result<SymbolSnapshot, GazetteError>)>,
    {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Number of swept symbols.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no symbols were swept.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of symbols that produced a usable snapshot.
    #[must_use]
    pub fn success_count(&self) -> usize {
        self.entries.values().filter(|r| r.is_ok()).count()
    }

    /// Number of symbols that failed.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.entries.len() - self.success_count()
    }

    /// Iterate over the successful snapshots, in symbol order.
    pub fn snapshots(&self) -> impl Iterator<Item = &SymbolSnapshot> {
        self.entries.values().filter_map(|r| r.as_ref().ok())
    }

    /// Iterate over swept symbols, in order.
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Per-symbol outcomes, keyed by symbol.
    #[must_use]
    pub fn entries(&self) -> &BTreeMap<String, Result<SymbolSnapshot, GazetteError>> {
        &self.entries
    }
}

impl Serialize for MarketSweep {
    /// Failed symbols serialize as `{"error": "<reason>"}` so the analysis
    /// payload names data gaps explicitly instead of silently omitting them.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct FailureMarker {
            error: String,
        }

        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (symbol, outcome) in &self.entries {
            match outcome {
                Ok(snapshot) => map.serialize_entry(symbol, snapshot)?,
                Err(e) => map.serialize_entry(
                    symbol,
                    &FailureMarker {
                        error: e.to_string(),
                    },
                )?,
            }
        }
        map.end()
    }
}

/// One news article, already normalized from the provider's wire shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsStory {
    /// Headline.
    pub title: String,
    /// Article text, bounded by the enrichment step's excerpt limit.
    pub excerpt: String,
    /// Publication date string as reported by the provider.
    pub published: String,
    /// Ticker the article relates to.
    pub symbol: String,
    /// Link to the article.
    pub url: String,
}

/// Outcome of the enrichment step.
///
/// Every failure mode of the news source collapses into `Unavailable` with a
/// human-readable notice; consumers must branch on the variant and may never
/// assume stories are present.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum NewsDigest {
    /// Stories were fetched, capped and excerpt-bounded.
    Stories(Vec<NewsStory>),
    /// News is unavailable; the string explains why.
    Unavailable(String),
}

impl NewsDigest {
    /// True when actual stories are present.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        matches!(self, Self::Stories(_))
    }
}

/// Assembled analysis request, built fresh per run and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BriefingRequest {
    /// Full task text handed to the analysis service, embedding the
    /// serialized sweep and either the stories or the degradation notice.
    pub task: String,
    /// Whether news context is part of the task text.
    pub includes_news: bool,
}

/// One agent's contribution in a per-agent analysis reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentSection {
    /// Agent role label.
    pub role: String,
    /// The agent's produced text.
    pub content: String,
}

/// Shape of the analysis service's produced output.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutput {
    /// One combined text block.
    Text(String),
    /// Ordered per-agent contributions.
    PerAgent(Vec<AgentSection>),
}

/// Successful analysis-service reply.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisReply {
    /// Produced output in either of the service's two shapes.
    pub output: AnalysisOutput,
    /// Billed cost for the call, when the service reports one.
    pub cost: Option<f64>,
}

/// An email ready for the mail relay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutboundEmail {
    /// Sender, e.g. `Gazette <noreply@example.org>`.
    pub from: String,
    /// Recipient address.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// HTML body.
    pub html: String,
}

/// Successful pipeline result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    /// Normalized analysis text.
    pub analysis: String,
    /// Number of symbols that contributed usable data.
    pub symbols_analyzed: usize,
    /// Billed analysis cost, when reported.
    pub cost: Option<f64>,
}

/// Caller-facing run outcome, structurally identical for the manual trigger
/// and a timer trigger.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunOutcome {
    /// Whether the run reached a successful terminal state.
    pub success: bool,
    /// Analysis text; present iff `success`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<String>,
    /// Number of symbols that contributed usable data.
    pub symbols_analyzed: usize,
    /// Billed analysis cost, when reported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    /// Specific failure condition name; present iff not `success`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RunOutcome {
    /// Flatten a pipeline result into the caller-facing shape.
    ///
    /// The error field carries the condition name (e.g. "MissingCredential"),
    /// never a generic message, so callers can tell configuration problems
    /// apart from transient upstream failures.
    #[must_use]
    pub fn from_result(result: Result<RunReport, GazetteError>) -> Self {
        match result {
            Ok(report) => Self {
                success: true,
                analysis: Some(report.analysis),
                symbols_analyzed: report.symbols_analyzed,
                cost: report.cost,
                error: None,
            },
            Err(e) => Self {
                success: false,
                analysis: None,
                symbols_analyzed: 0,
                cost: None,
                error: Some(e.condition().to_string()),
            },
        }
    }
}
