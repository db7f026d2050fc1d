//! Concurrent per-symbol market sweep.

use futures::future::join_all;
use gazette_core::{MarketDataSource, MarketSweep};
use tracing::{info, warn};

/// Sweep every configured symbol concurrently and collect all outcomes.
///
/// Behavior:
/// - Fire-all/await-all: every fetch starts before any is awaited, and one
///   symbol's failure neither cancels nor blocks its siblings. Each fetch
///   owns its deadline inside the source.
/// - Failures are captured per symbol, not propagated; the sweep's key set
///   always equals the input set. Deciding whether zero successes is fatal
///   is the orchestrator's call.
pub async fn sweep(source: &dyn MarketDataSource, symbols: &[String]) -> MarketSweep {
    let tasks = symbols.iter().map(|symbol| async move {
        let outcome = source.snapshot(symbol).await;
        match &outcome {
            Ok(snapshot) => info!(
                %symbol,
                price = snapshot.price,
                change_percent = snapshot.change_percent,
                "snapshot fetched"
            ),
            Err(e) => warn!(%symbol, error = %e, "snapshot failed"),
        }
        (symbol.clone(), outcome)
    });

    let sweep = MarketSweep::from_entries(join_all(tasks).await);
    info!(
        usable = sweep.success_count(),
        total = sweep.len(),
        "market sweep complete"
    );
    sweep
}
