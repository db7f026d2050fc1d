//! The top-level briefing pipeline.

use std::sync::Arc;

use gazette_core::{
    AnalysisBackend, GazetteConfig, GazetteError, MailRelay, MailSettings, MarketDataSource,
    NewsSource, RunReport,
};
use tracing::{error, info};

use crate::{aggregate, briefing, enrich, notify::Notifier};

/// One configured pipeline; [`Pipeline::run`] executes a single synchronous
/// run with no state carried between invocations, so a manual trigger and a
/// timer trigger can share one instance.
pub struct Pipeline {
    config: GazetteConfig,
    market: Arc<dyn MarketDataSource>,
    news: Option<Arc<dyn NewsSource>>,
    analysis: Option<Arc<dyn AnalysisBackend>>,
    mail: Option<(Arc<dyn MailRelay>, MailSettings)>,
}

/// Builder for [`Pipeline`].
///
/// The market source is mandatory; the analysis backend is registered only
/// when its credential exists (its absence fails the run, not the build),
/// and news/mail are optional features.
pub struct PipelineBuilder {
    config: GazetteConfig,
    market: Arc<dyn MarketDataSource>,
    news: Option<Arc<dyn NewsSource>>,
    analysis: Option<Arc<dyn AnalysisBackend>>,
    mail: Option<(Arc<dyn MailRelay>, MailSettings)>,
}

impl PipelineBuilder {
    /// Register the analysis backend.
    #[must_use]
    pub fn analysis(mut self, backend: Arc<dyn AnalysisBackend>) -> Self {
        self.analysis = Some(backend);
        self
    }

    /// Register the news source.
    #[must_use]
    pub fn news(mut self, source: Arc<dyn NewsSource>) -> Self {
        self.news = Some(source);
        self
    }

    /// Register the mail relay together with its settings.
    #[must_use]
    pub fn mail(mut self, relay: Arc<dyn MailRelay>, settings: MailSettings) -> Self {
        self.mail = Some((relay, settings));
        self
    }

    /// Finalize the pipeline.
    #[must_use]
    pub fn build(self) -> Pipeline {
        Pipeline {
            config: self.config,
            market: self.market,
            news: self.news,
            analysis: self.analysis,
            mail: self.mail,
        }
    }
}

impl Pipeline {
    /// Begin building a pipeline around the mandatory market source.
    #[must_use]
    pub fn builder(config: GazetteConfig, market: Arc<dyn MarketDataSource>) -> PipelineBuilder {
        PipelineBuilder {
            config,
            market,
            news: None,
            analysis: None,
            mail: None,
        }
    }

    /// Execute one briefing run.
    ///
    /// The steps are strictly sequential: precondition check, concurrent
    /// market sweep, enrichment (absorbed), request assembly, analysis
    /// dispatch, and the conditional notification. Only a missing analysis
    /// credential, a fully failed sweep, or a failed analysis call terminate
    /// the run; everything else degrades.
    ///
    /// # Errors
    /// `MissingCredential`, `NoUsableData`, or `AnalysisService`, as above.
    pub async fn run(&self) -> Result<RunReport, GazetteError> {
        info!("starting briefing run");

        let Some(analysis) = &self.analysis else {
            let e = GazetteError::missing_credential("SWARMS_API_KEY");
            error!(error = %e, "briefing run failed");
            return Err(e);
        };

        let outcome = self.run_with_backend(analysis.as_ref()).await;
        if let Err(e) = &outcome {
            error!(error = %e, "briefing run failed");
        }
        outcome
    }

    async fn run_with_backend(
        &self,
        analysis: &dyn AnalysisBackend,
    ) -> Result<RunReport, GazetteError> {
        let sweep = aggregate::sweep(self.market.as_ref(), &self.config.symbols).await;
        let usable = sweep.success_count();
        if usable == 0 {
            return Err(GazetteError::NoUsableData);
        }

        let digest = enrich::digest(self.news.as_deref(), &self.config).await;

        let request = briefing::assemble(&sweep, &digest)?;
        let reply = analysis
            .complete(&request)
            .await
            .map_err(|e| GazetteError::analysis_service(e.to_string()))?;
        let text = briefing::render_analysis(&reply.output);
        info!(symbols_analyzed = usable, cost = ?reply.cost, "analysis complete");

        match &self.mail {
            Some((relay, settings)) => {
                let sent = Notifier::new(relay.as_ref(), settings)
                    .send_briefing(&text, &sweep, self.config.movers_threshold)
                    .await;
                if !sent {
                    info!("continuing despite undelivered briefing email");
                }
            }
            None => info!("mail not configured, skipping briefing email"),
        }

        Ok(RunReport {
            analysis: text,
            symbols_analyzed: usable,
            cost: reply.cost,
        })
    }
}
