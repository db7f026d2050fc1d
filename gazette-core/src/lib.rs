//! gazette-core
//!
//! Shared foundation for the gazette briefing pipeline.
//!
//! - `model`: per-run data structures (snapshots, sweeps, digests, outcomes).
//! - `error`: the unified [`GazetteError`] taxonomy.
//! - `config`: pipeline tunables and environment-backed credentials.
//! - `http`: single-attempt HTTP calls with a hard deadline.
//! - `source`: collaborator traits the orchestrator routes through.
//!
//! This crate assumes the Tokio ecosystem as the async runtime; the deadline
//! helper is built on `tokio::time::timeout` and the source traits are
//! `async_trait` interfaces.
#![warn(missing_docs)]

/// Pipeline tunables and environment-backed credentials.
pub mod config;
/// Unified error taxonomy for the workspace.
pub mod error;
/// Single-attempt HTTP calls with a hard deadline.
pub mod http;
/// Per-run data structures.
pub mod model;
/// Collaborator traits for external sources.
pub mod source;

pub use config::{Credentials, GazetteConfig, MailSettings};
pub use error::GazetteError;
pub use http::send_with_deadline;
pub use model::{
    AgentSection, AnalysisOutput, AnalysisReply, BriefingRequest, MarketState, MarketSweep,
    NewsDigest, NewsStory, OutboundEmail, RunOutcome, RunReport, SymbolSnapshot, round2,
};
pub use source::{AnalysisBackend, MailRelay, MarketDataSource, NewsSource};
