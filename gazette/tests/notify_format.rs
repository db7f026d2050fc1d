use chrono::NaiveDate;
use gazette_core::{GazetteError, MarketState, MarketSweep, SymbolSnapshot};
use gazette::notify::{briefing_html, movers_summary};

fn snap(symbol: &str, change_percent: f64) -> SymbolSnapshot {
    SymbolSnapshot {
        symbol: symbol.to_string(),
        price: 100.0,
        open: 100.0,
        high: 101.0,
        low: 99.0,
        volume: 12_345,
        change: change_percent,
        change_percent,
        momentum_hint: 50.0,
        as_of: NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
        currency: "USD".to_string(),
        market_state: MarketState::Closed,
        fifty_two_week_high: None,
        fifty_two_week_low: None,
    }
}

#[test]
fn movers_threshold_is_strict() {
    let sweep = MarketSweep::from_entries([
        ("AAA".to_string(), Ok(snap("AAA", 2.00))),
        ("BBB".to_string(), Ok(snap("BBB", 2.01))),
        ("CCC".to_string(), Ok(snap("CCC", -2.01))),
        ("DDD".to_string(), Ok(snap("DDD", -2.00))),
    ]);

    let summary = movers_summary(&sweep, 2.0);
    // Exactly at the boundary does not qualify; just past it does.
    assert!(!summary.contains("AAA"));
    assert!(!summary.contains("DDD"));
    assert!(summary.contains("BBB: +2.01%"));
    assert!(summary.contains("CCC: -2.01%"));
}

#[test]
fn quiet_markets_render_the_stable_phrase() {
    let sweep = MarketSweep::from_entries([("AAA".to_string(), Ok(snap("AAA", 0.3)))]);
    assert_eq!(
        movers_summary(&sweep, 2.0),
        "Market remained stable with no major movements (>2%)"
    );
}

#[test]
fn html_tabulates_snapshots_and_skips_failures() {
    let sweep = MarketSweep::from_entries([
        ("SPY".to_string(), Ok(snap("SPY", 1.5))),
        (
            "QQQ".to_string(),
            Err(GazetteError::status(500, "down")),
        ),
    ]);

    let html = briefing_html(
        "2025-06-02 12:00:00 UTC",
        "quiet",
        "Nothing to report.",
        &sweep,
    );

    assert!(html.contains("<td>SPY</td>"));
    assert!(!html.contains("QQQ"));
    assert!(html.contains("2025-06-02 12:00:00 UTC"));
    assert!(html.contains("Nothing to report."));
    assert!(html.contains("<td>12345</td>"));
    assert!(html.contains("CLOSED"));
}
