// =============================================================================
// market-mock - mock market data API and client library
// =============================================================================
//
// The library exposes everything the binaries and integration tests need:
// the immutable dataset store, the query engine, the response formatter, the
// HTTP router, and the outbound client.
// =============================================================================

pub mod api;
pub mod client;
pub mod config;
pub mod dataset;
pub mod format;
pub mod query;

pub use api::{router, AppState};
pub use client::{ClientError, MarketDataClient, StockList};
pub use config::ServerConfig;
pub use dataset::{Candle, Dataset, StockRecord, StockSummary};
pub use query::QueryError;
