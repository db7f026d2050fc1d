//! Collaborator traits for the pipeline's external sources.
//!
//! Each external service is addressed through one focused trait so the
//! orchestrator can be exercised with injected fakes (enable the
//! `test-sources` feature for closure-based constructors).

#[cfg(feature = "test-sources")]
use std::sync::Arc;

use async_trait::async_trait;

use crate::{AnalysisReply, BriefingRequest, GazetteError, NewsStory, OutboundEmail, SymbolSnapshot};

/// Source of per-symbol market snapshots.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Fetch one symbol's snapshot.
    ///
    /// Implementations own their per-call deadline and must convert every
    /// failure into a [`GazetteError`]; nothing panics past this boundary.
    async fn snapshot(&self, symbol: &str) -> Result<SymbolSnapshot, GazetteError>;
}

/// Source of supplementary news context.
#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Fetch up to `limit` recent stories for the given symbols.
    async fn latest(
        &self,
        symbols: &[String],
        limit: usize,
    ) -> Result<Vec<NewsStory>, GazetteError>;
}

/// The analysis service that turns a briefing request into analysis text.
#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    /// Submit the assembled request; a single attempt, no retries.
    async fn complete(&self, request: &BriefingRequest) -> Result<AnalysisReply, GazetteError>;
}

/// The mail relay that delivers the briefing email.
#[async_trait]
pub trait MailRelay: Send + Sync {
    /// Submit one message for delivery.
    async fn deliver(&self, email: &OutboundEmail) -> Result<(), GazetteError>;
}

/* -------- Test-only closure-based sources ------- */

#[cfg(feature = "test-sources")]
impl dyn MarketDataSource {
    /// Build a `MarketDataSource` from a closure (tests only).
    pub fn from_fn<F>(f: F) -> Arc<dyn MarketDataSource>
    where
        F: Send + Sync + 'static + Fn(&str) -> Result<SymbolSnapshot, GazetteError>,
    {
        struct FnSource<F>(F);
        #[async_trait]
        impl<F> MarketDataSource for FnSource<F>
        where
            F: Send + Sync + 'static + Fn(&str) -> Result<SymbolSnapshot, GazetteError>,
        {
            async fn snapshot(&self, symbol: &str) -> Result<SymbolSnapshot, GazetteError> {
                (self.0)(symbol)
            }
        }
        Arc::new(FnSource(f))
    }
}

#[cfg(feature = "test-sources")]
impl dyn NewsSource {
    /// Build a `NewsSource` from a closure (tests only).
    pub fn from_fn<F>(f: F) -> Arc<dyn NewsSource>
    where
        F: Send + Sync + 'static + Fn(&[String], usize) -> Result<Vec<NewsStory>, GazetteError>,
    {
        struct FnSource<F>(F);
        #[async_trait]
        impl<F> NewsSource for FnSource<F>
        where
            F: Send + Sync + 'static + Fn(&[String], usize) -> Result<Vec<NewsStory>, GazetteError>,
        {
            async fn latest(
                &self,
                symbols: &[String],
                limit: usize,
            ) -> Result<Vec<NewsStory>, GazetteError> {
                (self.0)(symbols, limit)
            }
        }
        Arc::new(FnSource(f))
    }
}

#[cfg(feature = "test-sources")]
impl dyn AnalysisBackend {
    /// Build an `AnalysisBackend` from a closure (tests only).
    pub fn from_fn<F>(f: F) -> Arc<dyn AnalysisBackend>
    where
        F: Send + Sync + 'static + Fn(&BriefingRequest) -> Result<AnalysisReply, GazetteError>,
    {
        struct FnBackend<F>(F);
        #[async_trait]
        impl<F> AnalysisBackend for FnBackend<F>
        where
            F: Send + Sync + 'static + Fn(&BriefingRequest) -> Result<AnalysisReply, GazetteError>,
        {
            async fn complete(
                &self,
                request: &BriefingRequest,
            ) -> Result<AnalysisReply, GazetteError> {
                (self.0)(request)
            }
        }
        Arc::new(FnBackend(f))
    }
}

#[cfg(feature = "test-sources")]
impl dyn MailRelay {
    /// Build a `MailRelay` from a closure (tests only).
    pub fn from_fn<F>(f: F) -> Arc<dyn MailRelay>
    where
        F: Send + Sync + 'static + Fn(&OutboundEmail) -> Result<(), GazetteError>,
    {
        struct FnRelay<F>(F);
        #[async_trait]
        impl<F> MailRelay for FnRelay<F>
        where
            F: Send + Sync + 'static + Fn(&OutboundEmail) -> Result<(), GazetteError>,
        {
            async fn deliver(&self, email: &OutboundEmail) -> Result<(), GazetteError> {
                (self.0)(email)
            }
        }
        Arc::new(FnRelay(f))
    }
}
