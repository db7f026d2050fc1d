use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the gazette workspace.
///
/// Per-symbol fetch failures are carried as values inside a
/// [`crate::MarketSweep`] rather than propagated; enrichment failures are
/// absorbed into a degradation notice. Only `MissingCredential`,
/// `NoUsableData`, and `AnalysisService` terminate a pipeline run.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GazetteError {
    /// A required credential is not configured.
    #[error("missing credential: {what}")]
    MissingCredential {
        /// Name of the missing environment variable (e.g. "SWARMS_API_KEY").
        what: String,
    },

    /// An outbound call did not produce a response before its deadline.
    #[error("{what} timed out")]
    Timeout {
        /// Label of the call that timed out (e.g. "chart for SPY").
        what: String,
    },

    /// A connection-level failure before any HTTP status was received.
    #[error("{what} transport failure: {msg}")]
    Transport {
        /// Label of the failing call.
        what: String,
        /// Human-readable cause.
        msg: String,
    },

    /// The remote returned a non-success HTTP status.
    #[error("unexpected status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, truncated, kept for diagnostics.
        body: String,
    },

    /// The response arrived but did not have the expected shape.
    #[error("malformed payload from {what}: {msg}")]
    MalformedPayload {
        /// Label of the source that produced the payload.
        what: String,
        /// What was missing or wrong.
        msg: String,
    },

    /// A chart series existed but contained no non-null close price.
    #[error("no valid data point for {symbol}")]
    NoValidDataPoint {
        /// Symbol whose series was empty of usable closes.
        symbol: String,
    },

    /// Every configured symbol failed to produce a snapshot.
    #[error("no usable market data for any configured symbol")]
    NoUsableData,

    /// The analysis-service call itself failed.
    #[error("analysis service failure: {msg}")]
    AnalysisService {
        /// Human-readable cause, including upstream status/timeout detail.
        msg: String,
    },

    /// The mail relay rejected or failed to accept a message.
    #[error("mail relay failure: {msg}")]
    MailRelay {
        /// Human-readable cause.
        msg: String,
    },
}

impl GazetteError {
    /// Helper: build a `MissingCredential` error for an environment variable name.
    pub fn missing_credential(what: impl Into<String>) -> Self {
        Self::MissingCredential { what: what.into() }
    }

    /// Helper: build a `Timeout` error for a call label.
    pub fn timeout(what: impl Into<String>) -> Self {
        Self::Timeout { what: what.into() }
    }

    /// Helper: build a `Transport` error with the call label and cause.
    pub fn transport(what: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Transport {
            what: what.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `Status` error from a status code and (truncated) body.
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            body: body.into(),
        }
    }

    /// Helper: build a `MalformedPayload` error.
    pub fn malformed(what: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::MalformedPayload {
            what: what.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `NoValidDataPoint` error for a symbol.
    pub fn no_valid_data_point(symbol: impl Into<String>) -> Self {
        Self::NoValidDataPoint {
            symbol: symbol.into(),
        }
    }

    /// Helper: build an `AnalysisService` error.
    pub fn analysis_service(msg: impl Into<String>) -> Self {
        Self::AnalysisService { msg: msg.into() }
    }

    /// Helper: build a `MailRelay` error.
    pub fn mail_relay(msg: impl Into<String>) -> Self {
        Self::MailRelay { msg: msg.into() }
    }

    /// Stable condition name for outcome reporting.
    ///
    /// Callers branch on this to tell configuration problems apart from
    /// transient upstream failures, so the names must not change.
    #[must_use]
    pub const fn condition(&self) -> &'static str {
        match self {
            Self::MissingCredential { .. } => "MissingCredential",
            Self::Timeout { .. } => "Timeout",
            Self::Transport { .. } => "TransportError",
            Self::Status { .. } => "Non2xxStatus",
            Self::MalformedPayload { .. } => "MalformedPayload",
            Self::NoValidDataPoint { .. } => "NoValidDataPoint",
            Self::NoUsableData => "NoUsableData",
            Self::AnalysisService { .. } => "AnalysisServiceError",
            Self::MailRelay { .. } => "MailRelayError",
        }
    }

    /// Returns true if this error terminates a pipeline run.
    ///
    /// Everything else is isolated per symbol or absorbed into a notice.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::MissingCredential { .. } | Self::NoUsableData | Self::AnalysisService { .. }
        )
    }
}
