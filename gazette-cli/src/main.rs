//! Manual trigger for the briefing pipeline.
//!
//! Wires the real connectors from environment credentials, runs the
//! pipeline once, and prints the outcome as JSON. A scheduler invoking this
//! binary on a timer receives exactly the same outcome shape.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use gazette::Pipeline;
use gazette_core::{Credentials, GazetteConfig, RunOutcome};
use gazette_fmp::FmpNews;
use gazette_mailgun::MailgunClient;
use gazette_swarm::SwarmClient;
use gazette_yahoo::YahooQuotes;
use tracing::info;

#[derive(Parser)]
#[command(name = "gazette", about = "Run one market-briefing cycle")]
struct Args {
    /// Override the swept symbols (comma-separated).
    #[arg(long, value_delimiter = ',')]
    symbols: Option<Vec<String>>,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let mut config = GazetteConfig::default();
    if let Some(symbols) = args.symbols {
        config.symbols = symbols;
    }

    let http = match reqwest::Client::builder().build() {
        Ok(client) => client,
        Err(e) => {
            eprintln!("failed to build HTTP client: {e}");
            return ExitCode::FAILURE;
        }
    };

    let credentials = Credentials::from_env();
    let market = YahooQuotes::new(http.clone()).with_deadline(config.market_deadline);

    let mut builder = Pipeline::builder(config.clone(), Arc::new(market));
    if let Some(key) = &credentials.analysis_api_key {
        builder = builder.analysis(Arc::new(
            SwarmClient::new(http.clone(), key.clone()).with_deadline(config.analysis_deadline),
        ));
    }
    if let Some(key) = &credentials.news_api_key {
        builder = builder.news(Arc::new(
            FmpNews::new(http.clone(), key.clone()).with_deadline(config.news_deadline),
        ));
    }
    if let Some(mail) = &credentials.mail {
        builder = builder.mail(
            Arc::new(
                MailgunClient::new(http.clone(), mail.domain.clone(), mail.api_key.clone())
                    .with_deadline(config.mail_deadline),
            ),
            mail.clone(),
        );
    }

    info!(symbols = ?config.symbols, "triggering briefing run");
    let outcome = RunOutcome::from_result(builder.build().run().await);
    let success = outcome.success;

    match serde_json::to_string_pretty(&outcome) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("failed to encode outcome: {e}");
            return ExitCode::FAILURE;
        }
    }

    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
