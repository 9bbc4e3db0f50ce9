// =============================================================================
// API Error Responses
// =============================================================================
//
// Error bodies follow a single shape, {"error": <kind>, "message": <text>},
// and the kind strings are part of the wire contract: clients branch on
// SymbolNotFound vs IntervalNotFound, so the two must never collapse into
// one.
// =============================================================================

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Request-level failures surfaced by the HTTP layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Ticker absent from the dataset (404).
    SymbolNotFound(String),
    /// Ticker known, interval label absent (404).
    IntervalNotFound { symbol: String, interval: String },
    /// Intraday request without the required `interval` parameter (400).
    MissingInterval,
}

impl ApiError {
    /// Machine-readable kind carried in the `error` field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::SymbolNotFound(_) => "SymbolNotFound",
            Self::IntervalNotFound { .. } => "IntervalNotFound",
            Self::MissingInterval => "MissingInterval",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::SymbolNotFound(_) | Self::IntervalNotFound { .. } => StatusCode::NOT_FOUND,
            Self::MissingInterval => StatusCode::BAD_REQUEST,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::SymbolNotFound(symbol) => {
                format!("Symbol '{symbol}' is not available in the dataset.")
            }
            Self::IntervalNotFound { symbol, interval } => {
                format!("Interval '{interval}' is not available for symbol '{symbol}'.")
            }
            Self::MissingInterval => {
                "Query parameter 'interval' is required (e.g. 5min).".to_string()
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({
            "error": self.kind(),
            "message": self.message(),
        });
        (self.status(), Json(body)).into_response()
    }
}
