// =============================================================================
// Market Data Client - thin outbound wrapper over the mock API
// =============================================================================
//
// Callers get the decoded payload or a typed error that preserves the
// upstream HTTP status, so they can branch on 404 vs 400 vs transport
// failure. The client never retries; retry/backoff policy belongs to the
// caller.
// =============================================================================

use std::time::Duration;

use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, instrument};

use crate::dataset::StockSummary;

/// Request timeout applied when MARKET_API_TIMEOUT_MS is not set.
const DEFAULT_TIMEOUT_MS: u64 = 5_000;
/// Interval used when the caller does not pick one.
const DEFAULT_INTRADAY_INTERVAL: &str = "5min";

// =============================================================================
// Errors
// =============================================================================

/// Failures surfaced to callers of [`MarketDataClient`].
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("missing MARKET_API_BASE_URL: point it to the local market data API")]
    MissingBaseUrl,

    /// The request never produced an HTTP response (timeout, connection
    /// refused, malformed URL).
    #[error("GET {path} failed: {source}")]
    Http {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-2xx status. The status and raw body
    /// are preserved for the caller.
    #[error("GET {path} returned HTTP {status}: {body}")]
    Api {
        path: String,
        status: StatusCode,
        body: String,
    },

    #[error("failed to decode {path} response: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ClientError {
    /// Upstream HTTP status, when one was observed.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http { source, .. } => source.status(),
            Self::MissingBaseUrl | Self::Decode { .. } => None,
        }
    }
}

// =============================================================================
// Payload types
// =============================================================================

/// Response of `GET /stocks`.
#[derive(Debug, Clone, Deserialize)]
pub struct StockList {
    pub data: Vec<StockSummary>,
}

// =============================================================================
// Client
// =============================================================================

/// HTTP client for the mock market data API.
#[derive(Debug, Clone)]
pub struct MarketDataClient {
    base_url: String,
    client: reqwest::Client,
}

impl MarketDataClient {
    /// Create a client for `base_url` (e.g. `http://127.0.0.1:4000/api/v1`).
    /// A trailing slash on the base URL is tolerated and trimmed.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("failed to build reqwest client");

        debug!(%base_url, ?timeout, "MarketDataClient initialised");
        Self { base_url, client }
    }

    /// Build a client from MARKET_API_BASE_URL and MARKET_API_TIMEOUT_MS.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_parts(
            std::env::var("MARKET_API_BASE_URL").ok(),
            std::env::var("MARKET_API_TIMEOUT_MS").ok(),
        )
    }

    /// Env-independent constructor backing [`Self::from_env`]. An unset or
    /// empty base URL is an error; a malformed timeout falls back to the
    /// default.
    fn from_parts(
        base_url: Option<String>,
        timeout_ms: Option<String>,
    ) -> Result<Self, ClientError> {
        let base_url = base_url
            .filter(|url| !url.trim().is_empty())
            .ok_or(ClientError::MissingBaseUrl)?;

        let timeout_ms = timeout_ms
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_MS);

        Ok(Self::new(base_url, Duration::from_millis(timeout_ms)))
    }

    // -------------------------------------------------------------------------
    // API calls
    // -------------------------------------------------------------------------

    /// GET /stocks/:symbol/daily - daily series payload for `symbol`.
    #[instrument(skip(self), name = "client::get_daily_stock_data")]
    pub async fn get_daily_stock_data(
        &self,
        symbol: &str,
        limit: Option<u32>,
    ) -> Result<Value, ClientError> {
        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(limit) = limit {
            params.push(("limit", limit.to_string()));
        }
        self.get_json(&format!("/stocks/{symbol}/daily"), &params)
            .await
    }

    /// GET /stocks/:symbol/intraday - intraday series payload for `symbol`.
    /// The interval defaults to "5min" when not given.
    #[instrument(skip(self), name = "client::get_intraday_data")]
    pub async fn get_intraday_data(
        &self,
        symbol: &str,
        interval: Option<&str>,
        limit: Option<u32>,
    ) -> Result<Value, ClientError> {
        let interval = interval.unwrap_or(DEFAULT_INTRADAY_INTERVAL);
        let mut params = vec![("interval", interval.to_string())];
        if let Some(limit) = limit {
            params.push(("limit", limit.to_string()));
        }
        self.get_json(&format!("/stocks/{symbol}/intraday"), &params)
            .await
    }

    /// GET /stocks - summaries of every tracked symbol.
    #[instrument(skip(self), name = "client::list_tracked_stocks")]
    pub async fn list_tracked_stocks(&self) -> Result<StockList, ClientError> {
        let path = "/stocks";
        let value = self.get_json(path, &[]).await?;
        serde_json::from_value(value).map_err(|source| ClientError::Decode {
            path: path.to_string(),
            source,
        })
    }

    // -------------------------------------------------------------------------
    // Internal helpers
    // -------------------------------------------------------------------------

    async fn get_json(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<Value, ClientError> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(|source| {
                error!(path, error = %source, "market API request failed");
                ClientError::Http {
                    path: path.to_string(),
                    source,
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(path, %status, "market API returned an error response");
            return Err(ClientError::Api {
                path: path.to_string(),
                status,
                body,
            });
        }

        response.json().await.map_err(|source| {
            error!(path, error = %source, "failed to parse market API response");
            ClientError::Http {
                path: path.to_string(),
                source,
            }
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_base_url_is_an_error() {
        let err = MarketDataClient::from_parts(None, None).unwrap_err();
        assert!(matches!(err, ClientError::MissingBaseUrl));
        assert_eq!(
            err.to_string(),
            "missing MARKET_API_BASE_URL: point it to the local market data API"
        );
    }

    #[test]
    fn blank_base_url_is_an_error() {
        let err = MarketDataClient::from_parts(Some("   ".into()), None).unwrap_err();
        assert!(matches!(err, ClientError::MissingBaseUrl));
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let client =
            MarketDataClient::new("http://127.0.0.1:4000/api/v1/", Duration::from_secs(1));
        assert_eq!(client.base_url, "http://127.0.0.1:4000/api/v1");
    }

    #[test]
    fn malformed_timeout_falls_back_to_default() {
        let client = MarketDataClient::from_parts(
            Some("http://127.0.0.1:4000/api/v1".into()),
            Some("soon".into()),
        );
        assert!(client.is_ok());
    }

    #[test]
    fn api_error_preserves_status() {
        let err = ClientError::Api {
            path: "/stocks/TSLA/daily".into(),
            status: StatusCode::NOT_FOUND,
            body: r#"{"error":"SymbolNotFound"}"#.into(),
        };
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
        assert!(err.to_string().contains("404"));
        assert!(err.to_string().contains("/stocks/TSLA/daily"));
    }

    #[test]
    fn missing_base_url_has_no_status() {
        assert_eq!(ClientError::MissingBaseUrl.status(), None);
    }
}
