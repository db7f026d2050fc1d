//! Validation and normalization of chart responses into [`SymbolSnapshot`]s.

use chrono::DateTime;
use gazette_core::{GazetteError, MarketState, SymbolSnapshot, round2};

use crate::wire::ChartEnvelope;

/// Decode a chart envelope into a snapshot for `symbol`.
///
/// Behavior:
/// - A provider-side `chart.error`, a missing results container, or missing
///   meta/series blocks yield `MalformedPayload`.
/// - The "current" reading is resolved by walking the series from the most
///   recent index backward to the first non-null close; a series with no
///   usable close yields `NoValidDataPoint`.
/// - The live `regularMarketPrice` is preferred over the resolved close when
///   present; `previousClose` falls back to `chartPreviousClose`, and a
///   zero or absent previous close yields `MalformedPayload` (the percent
///   change would be undefined).
///
/// # Errors
/// See above; every failure is tagged with `symbol` context by the caller.
pub(crate) fn decode_chart(
    symbol: &str,
    envelope: ChartEnvelope,
) -> Result<SymbolSnapshot, GazetteError> {
    let what = format!("chart for {symbol}");

    if let Some(api_error) = envelope.chart.error {
        let description = api_error
            .description
            .unwrap_or_else(|| "unspecified provider error".to_string());
        return Err(GazetteError::malformed(what, description));
    }

    let result = envelope
        .chart
        .result
        .and_then(|mut results| {
            if results.is_empty() {
                None
            } else {
                Some(results.swap_remove(0))
            }
        })
        .ok_or_else(|| GazetteError::malformed(what.as_str(), "no chart result in response"))?;

    let meta = result
        .meta
        .ok_or_else(|| GazetteError::malformed(what.as_str(), "missing meta block"))?;
    let quote = result
        .indicators
        .and_then(|mut ind| {
            if ind.quote.is_empty() {
                None
            } else {
                Some(ind.quote.swap_remove(0))
            }
        })
        .ok_or_else(|| GazetteError::malformed(what.as_str(), "missing quote series"))?;
    let timestamps = result
        .timestamp
        .filter(|ts| !ts.is_empty())
        .ok_or_else(|| GazetteError::malformed(what.as_str(), "no timestamp data"))?;

    // Walk backward to the most recent index with a non-null close.
    let (index, close) = timestamps
        .iter()
        .enumerate()
        .rev()
        .find_map(|(i, _)| quote.close.get(i).copied().flatten().map(|c| (i, c)))
        .ok_or_else(|| GazetteError::no_valid_data_point(symbol))?;

    let open = series_at(&quote.open, index).unwrap_or(close);
    let high = series_at(&quote.high, index).unwrap_or(close);
    let low = series_at(&quote.low, index).unwrap_or(close);
    let volume = quote.volume.get(index).copied().flatten().unwrap_or(0);

    let price = meta.regular_market_price.unwrap_or(close);
    let previous_close = meta
        .previous_close
        .or(meta.chart_previous_close)
        .filter(|pc| *pc != 0.0)
        .ok_or_else(|| GazetteError::malformed(what.as_str(), "missing or zero previous close"))?;

    for value in [price, open, high, low, previous_close] {
        if !value.is_finite() {
            return Err(GazetteError::malformed(what.as_str(), "non-finite price field"));
        }
    }

    let change = price - previous_close;
    let change_percent = round2(change / previous_close * 100.0);

    let as_of = DateTime::from_timestamp(timestamps[index], 0)
        .ok_or_else(|| GazetteError::malformed(what.as_str(), "timestamp out of range"))?
        .date_naive();

    Ok(SymbolSnapshot {
        symbol: symbol.to_string(),
        price,
        open,
        high,
        low,
        volume,
        change,
        change_percent,
        momentum_hint: momentum_hint(symbol),
        as_of,
        currency: meta.currency.unwrap_or_else(|| "USD".to_string()),
        market_state: meta
            .market_state
            .as_deref()
            .map_or(MarketState::Regular, MarketState::parse),
        fifty_two_week_high: meta.fifty_two_week_high,
        fifty_two_week_low: meta.fifty_two_week_low,
    })
}

fn series_at(series: &[Option<f64>], index: usize) -> Option<f64> {
    series.get(index).copied().flatten()
}

/// Deterministic momentum stand-in in the 35..65 band, derived from the
/// symbol's bytes. Not a real oscillator; the chart endpoint does not carry
/// enough history to compute one here and the downstream analysts are told
/// to treat it as a hint only.
fn momentum_hint(symbol: &str) -> f64 {
    let h = symbol
        .bytes()
        .fold(0u64, |acc, b| acc.wrapping_mul(31).wrapping_add(u64::from(b)));
    50.0 + (h % 30) as f64 - 15.0
}
