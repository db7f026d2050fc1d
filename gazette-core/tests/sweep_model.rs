use chrono::NaiveDate;
use gazette_core::{GazetteError, MarketState, MarketSweep, RunOutcome, SymbolSnapshot, round2};

fn snapshot(symbol: &str, price: f64, change_percent: f64) -> SymbolSnapshot {
    SymbolSnapshot {
        symbol: symbol.to_string(),
        price,
        open: price,
        high: price,
        low: price,
        volume: 1_000,
        change: price * change_percent / 100.0,
        change_percent,
        momentum_hint: 50.0,
        as_of: NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
        currency: "USD".to_string(),
        market_state: MarketState::Regular,
        fifty_two_week_high: None,
        fifty_two_week_low: None,
    }
}

#[test]
fn sweep_counts_and_key_set() {
    let sweep = MarketSweep::from_entries([
        ("SPY".to_string(), Ok(snapshot("SPY", 512.0, 0.4))),
        (
            "QQQ".to_string(),
            Err(GazetteError::status(500, "oops")),
        ),
        ("AAPL".to_string(), Ok(snapshot("AAPL", 190.0, -1.2))),
    ]);

    assert_eq!(sweep.len(), 3);
    assert_eq!(sweep.success_count(), 2);
    assert_eq!(sweep.failure_count(), 1);
    assert_eq!(
        sweep.symbols().collect::<Vec<_>>(),
        vec!["AAPL", "QQQ", "SPY"]
    );
}

#[test]
fn failed_symbols_serialize_as_explicit_gaps() {
    let sweep = MarketSweep::from_entries([
        ("SPY".to_string(), Ok(snapshot("SPY", 512.0, 0.4))),
        (
            "QQQ".to_string(),
            Err(GazetteError::status(500, "upstream busy")),
        ),
    ]);

    let value = serde_json::to_value(&sweep).unwrap();
    assert_eq!(value["SPY"]["price"], 512.0);
    assert_eq!(value["SPY"]["market_state"], "REGULAR");
    assert_eq!(
        value["QQQ"]["error"],
        "unexpected status 500: upstream busy"
    );
    // A failed entry carries nothing but the failure marker.
    assert!(value["QQQ"].get("price").is_none());
}

#[test]
fn percent_rounding_matches_the_fixture() {
    // current=105, previousClose=100 -> 5.00
    let change = 105.0_f64 - 100.0;
    assert_eq!(round2(change / 100.0 * 100.0), 5.00);
    assert_eq!(round2(1.0 / 3.0 * 100.0), 33.33);
    assert_eq!(round2(-1.0 / 3.0 * 100.0), -33.33);
}

#[test]
fn outcome_flattens_success_and_failure() {
    let ok = RunOutcome::from_result(Ok(gazette_core::RunReport {
        analysis: "text".into(),
        symbols_analyzed: 4,
        cost: Some(0.012),
    }));
    assert!(ok.success);
    assert_eq!(ok.analysis.as_deref(), Some("text"));
    assert_eq!(ok.symbols_analyzed, 4);
    assert!(ok.error.is_none());

    let err = RunOutcome::from_result(Err(GazetteError::missing_credential("SWARMS_API_KEY")));
    assert!(!err.success);
    assert!(err.analysis.is_none());
    assert_eq!(err.error.as_deref(), Some("MissingCredential"));
}

#[test]
fn market_state_passes_unknown_values_through() {
    assert_eq!(MarketState::parse("REGULAR"), MarketState::Regular);
    assert_eq!(MarketState::parse("PREPRE"), {
        MarketState::Other("PREPRE".to_string())
    });
    assert_eq!(MarketState::parse("PREPRE").as_str(), "PREPRE");

    let json = serde_json::to_string(&MarketState::Post).unwrap();
    assert_eq!(json, "\"POST\"");
    let back: MarketState = serde_json::from_str("\"HALTED\"").unwrap();
    assert_eq!(back, MarketState::Other("HALTED".to_string()));
}
