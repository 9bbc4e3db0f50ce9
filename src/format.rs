// =============================================================================
// Response Formatter - provider-compatible payload shaping
// =============================================================================
//
// Field labels ("1. open" .. "5. volume", "Meta Data", "Time Series (...)")
// reproduce the upstream provider schema verbatim so that client code written
// against the real API parses mock responses unchanged. Series maps rely on
// serde_json's preserve_order feature: insertion order is wire order.
// =============================================================================

use serde_json::{Map, Value};

use crate::dataset::Candle;

/// Time zone label carried by every payload.
const TIME_ZONE: &str = "US/Eastern";

/// Render one candle as the provider's numbered string fields. Prices are
/// fixed two-decimal strings, volume a plain integer string.
pub fn format_candle(candle: &Candle) -> Value {
    let mut fields = Map::new();
    fields.insert("1. open".into(), Value::String(format!("{:.2}", candle.open)));
    fields.insert("2. high".into(), Value::String(format!("{:.2}", candle.high)));
    fields.insert("3. low".into(), Value::String(format!("{:.2}", candle.low)));
    fields.insert("4. close".into(), Value::String(format!("{:.2}", candle.close)));
    fields.insert("5. volume".into(), Value::String(candle.volume.to_string()));
    Value::Object(fields)
}

/// Ordered series block: timestamp -> formatted candle, preserving the order
/// of `entries` (already sorted most-recent-first by the query engine).
fn series_block(entries: &[(&str, &Candle)]) -> Value {
    let mut series = Map::new();
    for (timestamp, candle) in entries {
        series.insert((*timestamp).to_string(), format_candle(candle));
    }
    Value::Object(series)
}

/// Daily payload: metadata block plus the "Time Series (Daily)" map.
///
/// "3. Last Refreshed" is omitted entirely when the series is empty; the
/// output size tag is "compact" when a row limit was applied and "full"
/// otherwise.
pub fn daily_payload(symbol: &str, entries: &[(&str, &Candle)], limited: bool) -> Value {
    let mut meta = Map::new();
    meta.insert(
        "1. Information".into(),
        Value::String("Daily Prices (open, high, low, close) and Volumes".into()),
    );
    meta.insert("2. Symbol".into(), Value::String(symbol.to_string()));
    if let Some((latest, _)) = entries.first() {
        meta.insert("3. Last Refreshed".into(), Value::String((*latest).to_string()));
    }
    meta.insert(
        "4. Output Size".into(),
        Value::String(output_size(limited).into()),
    );
    meta.insert("5. Time Zone".into(), Value::String(TIME_ZONE.into()));

    let mut payload = Map::new();
    payload.insert("Meta Data".into(), Value::Object(meta));
    payload.insert("Time Series (Daily)".into(), series_block(entries));
    Value::Object(payload)
}

/// Intraday payload: like the daily payload but with the interval label in
/// both the metadata and the series block key.
pub fn intraday_payload(
    symbol: &str,
    interval: &str,
    entries: &[(&str, &Candle)],
    limited: bool,
) -> Value {
    let mut meta = Map::new();
    meta.insert(
        "1. Information".into(),
        Value::String(format!("Intraday ({interval}) prices and volumes")),
    );
    meta.insert("2. Symbol".into(), Value::String(symbol.to_string()));
    if let Some((latest, _)) = entries.first() {
        meta.insert("3. Last Refreshed".into(), Value::String((*latest).to_string()));
    }
    meta.insert("4. Interval".into(), Value::String(interval.to_string()));
    meta.insert(
        "5. Output Size".into(),
        Value::String(output_size(limited).into()),
    );
    meta.insert("6. Time Zone".into(), Value::String(TIME_ZONE.into()));

    let mut payload = Map::new();
    payload.insert("Meta Data".into(), Value::Object(meta));
    payload.insert(format!("Time Series ({interval})"), series_block(entries));
    Value::Object(payload)
}

fn output_size(limited: bool) -> &'static str {
    if limited {
        "compact"
    } else {
        "full"
    }
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    fn candle() -> Candle {
        Candle {
            open: 189.45,
            high: 191.22,
            low: 188.9,
            close: 190.75,
            volume: 98_852_000,
        }
    }

    #[test]
    fn candle_fields_are_numbered_strings() {
        let v = format_candle(&candle());
        assert_eq!(v["1. open"], "189.45");
        assert_eq!(v["2. high"], "191.22");
        assert_eq!(v["3. low"], "188.90");
        assert_eq!(v["4. close"], "190.75");
        assert_eq!(v["5. volume"], "98852000");
    }

    #[test]
    fn candle_round_trips_to_two_decimals() {
        let original = candle();
        let v = format_candle(&original);
        let open: f64 = v["1. open"].as_str().unwrap().parse().unwrap();
        let high: f64 = v["2. high"].as_str().unwrap().parse().unwrap();
        let volume: u64 = v["5. volume"].as_str().unwrap().parse().unwrap();
        assert!((open - original.open).abs() < 0.005);
        assert!((high - original.high).abs() < 0.005);
        assert_eq!(volume, original.volume);
    }

    #[test]
    fn daily_metadata_full_vs_compact() {
        let c = candle();
        let entries = vec![("2025-01-10", &c)];

        let full = daily_payload("AAPL", &entries, false);
        assert_eq!(full["Meta Data"]["4. Output Size"], "full");

        let compact = daily_payload("AAPL", &entries, true);
        assert_eq!(compact["Meta Data"]["4. Output Size"], "compact");
        assert_eq!(compact["Meta Data"]["2. Symbol"], "AAPL");
        assert_eq!(compact["Meta Data"]["3. Last Refreshed"], "2025-01-10");
        assert_eq!(compact["Meta Data"]["5. Time Zone"], "US/Eastern");
    }

    #[test]
    fn empty_series_omits_last_refreshed() {
        let payload = daily_payload("AAPL", &[], false);
        let meta = payload["Meta Data"].as_object().unwrap();
        assert!(!meta.contains_key("3. Last Refreshed"));
        assert!(payload["Time Series (Daily)"].as_object().unwrap().is_empty());
    }

    #[test]
    fn intraday_payload_carries_interval() {
        let c = candle();
        let entries = vec![("2025-01-10 09:30:00", &c)];
        let payload = intraday_payload("AAPL", "5min", &entries, false);

        assert_eq!(
            payload["Meta Data"]["1. Information"],
            "Intraday (5min) prices and volumes"
        );
        assert_eq!(payload["Meta Data"]["4. Interval"], "5min");
        assert_eq!(payload["Meta Data"]["6. Time Zone"], "US/Eastern");
        assert!(payload["Time Series (5min)"]["2025-01-10 09:30:00"].is_object());
    }

    #[test]
    fn series_block_preserves_entry_order() {
        let c = candle();
        let entries = vec![("2025-01-10", &c), ("2025-01-09", &c), ("2025-01-08", &c)];
        let payload = daily_payload("AAPL", &entries, false);
        let keys: Vec<&String> = payload["Time Series (Daily)"]
            .as_object()
            .unwrap()
            .keys()
            .collect();
        assert_eq!(keys, vec!["2025-01-10", "2025-01-09", "2025-01-08"]);
    }
}
