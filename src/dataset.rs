// =============================================================================
// Static Stock Dataset - immutable fixture-backed store
// =============================================================================
//
// The dataset is parsed once at startup from the embedded fixture file and
// never mutated afterwards. Every query reads it through shared references,
// so no locking exists anywhere in the crate.
//
// Invariant: each map key equals the `symbol` field of its record, uppercase.
// `from_json` rejects fixtures that violate this instead of silently fixing
// them up.
// =============================================================================

use std::collections::HashMap;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Embedded fixture data served by the mock API.
const BUILTIN_FIXTURE: &str = include_str!("../fixtures/stocks.json");

// =============================================================================
// Data types
// =============================================================================

/// A single OHLCV observation for one time bucket.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Candle {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

/// Timestamp-keyed bar collection. Keys are zero-padded timestamp strings
/// (`YYYY-MM-DD` for daily, `YYYY-MM-DD HH:MM:SS` for intraday), so plain
/// lexical ordering is chronological ordering. Unordered at rest; sorting is
/// a query-time concern.
pub type TimeSeries = HashMap<String, Candle>;

/// One tracked instrument with its daily series and per-interval intraday
/// series (keyed by interval label, e.g. "1min", "5min").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockRecord {
    pub symbol: String,
    pub name: String,
    pub sector: String,
    pub exchange: String,
    pub daily: TimeSeries,
    pub intraday: HashMap<String, TimeSeries>,
}

/// Listing entry returned by `GET /api/v1/stocks`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockSummary {
    pub symbol: String,
    pub name: String,
    pub sector: String,
    pub exchange: String,
    #[serde(rename = "availableIntervals")]
    pub available_intervals: Vec<String>,
}

// =============================================================================
// Dataset
// =============================================================================

/// Read-only symbol universe, keyed by uppercase ticker.
#[derive(Debug, Clone)]
pub struct Dataset {
    stocks: HashMap<String, StockRecord>,
}

impl Dataset {
    /// Parse a dataset from fixture JSON and validate the key/symbol
    /// invariant.
    pub fn from_json(json: &str) -> Result<Self> {
        let stocks: HashMap<String, StockRecord> =
            serde_json::from_str(json).context("failed to parse stock fixture JSON")?;

        for (key, record) in &stocks {
            if key != &record.symbol || key.to_uppercase() != *key {
                anyhow::bail!(
                    "fixture key '{}' does not match uppercase symbol '{}'",
                    key,
                    record.symbol
                );
            }
        }

        Ok(Self { stocks })
    }

    /// Build the dataset from the embedded fixture file.
    pub fn builtin() -> Result<Self> {
        let dataset = Self::from_json(BUILTIN_FIXTURE)?;
        info!(symbols = dataset.stocks.len(), "builtin stock dataset loaded");
        Ok(dataset)
    }

    /// Look up a record by ticker. Case-insensitive: the caller's symbol is
    /// normalised to uppercase before consulting the map.
    pub fn record(&self, symbol: &str) -> Option<&StockRecord> {
        self.stocks.get(&symbol.to_uppercase())
    }

    /// Whether a ticker is tracked.
    pub fn exists(&self, symbol: &str) -> bool {
        self.record(symbol).is_some()
    }

    /// Interval labels available for a ticker, sorted for stable output.
    /// Empty when the symbol is unknown.
    pub fn intervals_for(&self, symbol: &str) -> Vec<String> {
        match self.record(symbol) {
            Some(record) => {
                let mut intervals: Vec<String> = record.intraday.keys().cloned().collect();
                intervals.sort();
                intervals
            }
            None => Vec::new(),
        }
    }

    /// Summaries for every tracked symbol, sorted by ticker.
    pub fn list_summaries(&self) -> Vec<StockSummary> {
        let mut summaries: Vec<StockSummary> = self
            .stocks
            .values()
            .map(|record| StockSummary {
                symbol: record.symbol.clone(),
                name: record.name.clone(),
                sector: record.sector.clone(),
                exchange: record.exchange.clone(),
                available_intervals: self.intervals_for(&record.symbol),
            })
            .collect();
        summaries.sort_by(|a, b| a.symbol.cmp(&b.symbol));
        summaries
    }
}
