// =============================================================================
// Query Engine - symbol/interval resolution, ordering, truncation
// =============================================================================
//
// Pure functions over the immutable dataset: no I/O, no shared mutable state.
// "Not found" is data, not an error path that unwinds; the two failure kinds
// stay distinguishable so the transport can map them to distinct responses.
//
// Sorting is descending lexical on the timestamp keys. The keys are
// zero-padded fixed-width strings, so lexical order is chronological order
// and no date parsing is needed.
// =============================================================================

use serde_json::Value;

use crate::dataset::{Candle, Dataset, TimeSeries};
use crate::format;

/// The two distinguishable lookup failures. An unknown interval is only
/// reported for a known symbol; symbol resolution always happens first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryError {
    UnknownSymbol,
    UnknownInterval,
}

/// Resolve the daily series for `symbol`, most recent bar first.
///
/// `limit` keeps only the first `limit` rows after sorting. Zero is treated
/// the same as no limit: the full series is returned, never zero rows.
pub fn resolve_daily(
    dataset: &Dataset,
    symbol: &str,
    limit: Option<usize>,
) -> Result<Value, QueryError> {
    let record = dataset.record(symbol).ok_or(QueryError::UnknownSymbol)?;
    let (entries, limited) = ordered_entries(&record.daily, limit);
    Ok(format::daily_payload(&record.symbol, &entries, limited))
}

/// Resolve one intraday series for `symbol`. The interval label is matched
/// exactly (case-sensitive), e.g. "5min".
pub fn resolve_intraday(
    dataset: &Dataset,
    symbol: &str,
    interval: &str,
    limit: Option<usize>,
) -> Result<Value, QueryError> {
    let record = dataset.record(symbol).ok_or(QueryError::UnknownSymbol)?;
    let series = record
        .intraday
        .get(interval)
        .ok_or(QueryError::UnknownInterval)?;
    let (entries, limited) = ordered_entries(series, limit);
    Ok(format::intraday_payload(
        &record.symbol,
        interval,
        &entries,
        limited,
    ))
}

/// Sort a series descending by key and apply the (normalised) row limit.
/// Returns the ordered entries plus whether a limit actually took effect.
fn ordered_entries(
    series: &TimeSeries,
    limit: Option<usize>,
) -> (Vec<(&str, &Candle)>, bool) {
    let mut entries: Vec<(&str, &Candle)> = series
        .iter()
        .map(|(key, candle)| (key.as_str(), candle))
        .collect();
    // Stable sort; keys are unique within a series so ties cannot occur.
    entries.sort_by(|a, b| b.0.cmp(a.0));

    let limit = limit.filter(|&n| n > 0);
    if let Some(n) = limit {
        entries.truncate(n);
    }
    (entries, limit.is_some())
}
