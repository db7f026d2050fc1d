//! Briefing email construction and delivery.
//!
//! Everything here is pure formatting over explicit inputs until the final
//! relay call; delivery failure is logged and reported as `false`, never
//! propagated to the pipeline.

use chrono::Utc;
use gazette_core::{MailRelay, MailSettings, MarketSweep, OutboundEmail};
use tracing::{info, warn};

/// Notifier bound to one relay and its mail settings.
pub struct Notifier<'a> {
    relay: &'a dyn MailRelay,
    settings: &'a MailSettings,
}

impl<'a> Notifier<'a> {
    /// Bind a notifier to a relay and settings.
    #[must_use]
    pub const fn new(relay: &'a dyn MailRelay, settings: &'a MailSettings) -> Self {
        Self { relay, settings }
    }

    /// Build and submit the briefing email.
    ///
    /// Returns whether the relay accepted the message. Every failure is
    /// absorbed here; the run's success state never depends on delivery.
    pub async fn send_briefing(
        &self,
        analysis: &str,
        sweep: &MarketSweep,
        movers_threshold: f64,
    ) -> bool {
        let now = Utc::now();
        let email = OutboundEmail {
            from: format!("Gazette <noreply@{}>", self.settings.domain),
            to: self.settings.recipient.clone(),
            subject: format!("Daily Market Briefing - {}", now.format("%Y-%m-%d")),
            html: briefing_html(
                &now.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
                &movers_summary(sweep, movers_threshold),
                analysis,
                sweep,
            ),
        };

        match self.relay.deliver(&email).await {
            Ok(()) => {
                info!(to = %email.to, "briefing email sent");
                true
            }
            Err(e) => {
                warn!(error = %e, "briefing email not sent");
                false
            }
        }
    }
}

/// Summarize symbols whose absolute percent change exceeds `threshold`.
///
/// The comparison is strict: a symbol sitting exactly at the threshold does
/// not qualify. An empty set renders as an explicit stable-market phrase.
#[must_use]
pub fn movers_summary(sweep: &MarketSweep, threshold: f64) -> String {
    let movers: Vec<String> = sweep
        .snapshots()
        .filter(|snap| snap.change_percent.abs() > threshold)
        .map(|snap| format!("{}: {:+.2}%", snap.symbol, snap.change_percent))
        .collect();

    if movers.is_empty() {
        format!("Market remained stable with no major movements (>{threshold}%)")
    } else {
        movers.join(", ")
    }
}

/// Render the fixed-structure HTML body.
///
/// A pure function over its inputs; nothing here reads process-wide state.
#[must_use]
pub fn briefing_html(
    generated_at: &str,
    movers: &str,
    analysis: &str,
    sweep: &MarketSweep,
) -> String {
    let mut rows = String::new();
    for snapshot in sweep.snapshots() {
        rows.push_str(&format!(
            "<tr><td>{}</td><td>{:.2} {}</td><td>{:+.2}%</td><td>{}</td><td>{}</td></tr>\n",
            snapshot.symbol,
            snapshot.price,
            snapshot.currency,
            snapshot.change_percent,
            snapshot.volume,
            snapshot.market_state.as_str(),
        ));
    }

    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="UTF-8"></head>
<body style="font-family: Arial, sans-serif; max-width: 800px; margin: 0 auto;">
  <div style="background: #f8f9fa; padding: 20px; border-radius: 8px;">
    <h1>Market Briefing</h1>
    <p><strong>Generated:</strong> {generated_at}</p>
  </div>
  <div style="background: #e8f5e8; padding: 15px; border-left: 4px solid #28a745; margin: 20px 0;">
    <h3>Key Market Movers</h3>
    <p><strong>{movers}</strong></p>
  </div>
  <div style="background: #f8f9fa; padding: 20px; border: 1px solid #dee2e6; border-radius: 8px;">
    <h2>Analyst Commentary</h2>
    <pre style="white-space: pre-wrap; font-size: 13px;">{analysis}</pre>
  </div>
  <table border="1" cellpadding="6" cellspacing="0" style="border-collapse: collapse; margin: 20px 0;">
    <tr><th>Symbol</th><th>Price</th><th>Change</th><th>Volume</th><th>Session</th></tr>
{rows}  </table>
</body>
</html>
"#
    )
}
