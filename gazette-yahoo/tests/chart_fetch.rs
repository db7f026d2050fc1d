use std::time::Duration;

use gazette_core::{GazetteError, MarketDataSource, MarketState};
use gazette_yahoo::YahooQuotes;
use httpmock::prelude::*;
use serde_json::json;

fn client(server: &MockServer) -> YahooQuotes {
    YahooQuotes::new(reqwest::Client::new())
        .with_base_url(server.base_url())
        .with_deadline(Duration::from_secs(2))
}

fn chart_body(
    closes: serde_json::Value,
    meta_extra: serde_json::Value,
) -> serde_json::Value {
    let mut meta = json!({
        "currency": "USD",
        "marketState": "REGULAR",
        "previousClose": 100.0,
        "fiftyTwoWeekHigh": 120.0,
        "fiftyTwoWeekLow": 80.0
    });
    if let (Some(base), Some(extra)) = (meta.as_object_mut(), meta_extra.as_object()) {
        for (k, v) in extra {
            base.insert(k.clone(), v.clone());
        }
    }
    json!({
        "chart": {
            "result": [{
                "meta": meta,
                "timestamp": [1717286400, 1717372800, 1717459200],
                "indicators": {
                    "quote": [{
                        "open": [101.0, 102.0, 103.0],
                        "high": [104.0, 105.0, 106.0],
                        "low": [99.0, 100.0, 101.0],
                        "close": closes,
                        "volume": [1000, 2000, 3000]
                    }]
                }
            }],
            "error": null
        }
    })
}

#[tokio::test]
async fn resolves_the_latest_close_and_prefers_live_price() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v8/finance/chart/SPY");
            then.status(200).json_body(chart_body(
                json!([101.5, 102.5, 103.5]),
                json!({ "regularMarketPrice": 105.0 }),
            ));
        })
        .await;

    let snap = client(&server).snapshot("SPY").await.unwrap();
    assert_eq!(snap.symbol, "SPY");
    assert_eq!(snap.price, 105.0); // live price wins over resolved close
    assert_eq!(snap.open, 103.0);
    assert_eq!(snap.high, 106.0);
    assert_eq!(snap.low, 101.0);
    assert_eq!(snap.volume, 3000);
    assert_eq!(snap.change, 5.0);
    assert_eq!(snap.change_percent, 5.00); // (105 - 100) / 100 * 100
    assert_eq!(snap.currency, "USD");
    assert_eq!(snap.market_state, MarketState::Regular);
    assert_eq!(snap.fifty_two_week_high, Some(120.0));
    assert_eq!(snap.as_of.to_string(), "2024-06-04");
}

#[tokio::test]
async fn walks_past_null_closes() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v8/finance/chart/QQQ");
            then.status(200)
                .json_body(chart_body(json!([101.5, 102.5, null]), json!({})));
        })
        .await;

    let snap = client(&server).snapshot("QQQ").await.unwrap();
    // Resolved at index 1: close 102.5, no live price in meta.
    assert_eq!(snap.price, 102.5);
    assert_eq!(snap.open, 102.0);
    assert_eq!(snap.volume, 2000);
    assert_eq!(snap.change_percent, 2.50);
    assert_eq!(snap.as_of.to_string(), "2024-06-03");
}

#[tokio::test]
async fn all_null_closes_is_no_valid_data_point() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v8/finance/chart/TSLA");
            then.status(200)
                .json_body(chart_body(json!([null, null, null]), json!({})));
        })
        .await;

    let err = client(&server).snapshot("TSLA").await.unwrap_err();
    assert_eq!(
        err,
        GazetteError::NoValidDataPoint {
            symbol: "TSLA".to_string(),
        }
    );
}

#[tokio::test]
async fn zero_previous_close_is_malformed() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v8/finance/chart/SPY");
            then.status(200).json_body(chart_body(
                json!([101.5, 102.5, 103.5]),
                json!({ "previousClose": 0.0 }),
            ));
        })
        .await;

    let err = client(&server).snapshot("SPY").await.unwrap_err();
    assert!(matches!(err, GazetteError::MalformedPayload { .. }), "{err:?}");
}

#[tokio::test]
async fn provider_error_and_missing_result_are_malformed() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v8/finance/chart/BAD");
            then.status(200).json_body(json!({
                "chart": { "result": null, "error": { "code": "Not Found", "description": "No data found" } }
            }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v8/finance/chart/EMPTY");
            then.status(200)
                .json_body(json!({ "chart": { "result": [], "error": null } }));
        })
        .await;

    let yahoo = client(&server);
    match yahoo.snapshot("BAD").await.unwrap_err() {
        GazetteError::MalformedPayload { msg, .. } => assert_eq!(msg, "No data found"),
        other => panic!("expected malformed payload, got {other:?}"),
    }
    assert!(matches!(
        yahoo.snapshot("EMPTY").await.unwrap_err(),
        GazetteError::MalformedPayload { .. }
    ));
}

#[tokio::test]
async fn non_success_status_is_reported_with_the_code() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v8/finance/chart/SPY");
            then.status(429).body("rate limited");
        })
        .await;

    let err = client(&server).snapshot("SPY").await.unwrap_err();
    assert_eq!(
        err,
        GazetteError::Status {
            status: 429,
            body: "rate limited".to_string(),
        }
    );
}

#[tokio::test]
async fn slow_responses_hit_the_deadline() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v8/finance/chart/SPY");
            then.status(200)
                .delay(Duration::from_millis(400))
                .json_body(chart_body(json!([101.5]), json!({})));
        })
        .await;

    let yahoo = client(&server).with_deadline(Duration::from_millis(50));
    let err = yahoo.snapshot("SPY").await.unwrap_err();
    assert_eq!(
        err,
        GazetteError::Timeout {
            what: "chart for SPY".to_string(),
        }
    );
}

#[tokio::test]
async fn sends_a_browser_user_agent() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/v8/finance/chart/SPY")
                .header_matches("user-agent", "^Mozilla/5\\.0.*");
            then.status(200)
                .json_body(chart_body(json!([101.5, 102.5, 103.5]), json!({})));
        })
        .await;

    client(&server).snapshot("SPY").await.unwrap();
    mock.assert_async().await;
}
