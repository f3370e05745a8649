//! Shared domain records for exchange adapters
//!
//! Contracts and balances are flat snapshots tagged with the exchange they
//! came from, so an aggregator can mix records from several venues.

use std::time::Duration;

use serde::Serialize;
use serde_json::{Map, Value};

// =============================================================================
// HTTP Client Configuration
// =============================================================================

/// Request timeout (seconds)
pub const HTTP_TIMEOUT_SECS: u64 = 10;

/// Connect timeout (milliseconds)
pub const HTTP_CONNECT_TIMEOUT_MS: u64 = 5_000;

/// Idle connections kept per host
pub const HTTP_POOL_MAX_IDLE: usize = 2;

/// Seconds an idle pooled connection stays open
pub const HTTP_POOL_IDLE_TIMEOUT_SECS: u64 = 60;

/// Create the shared HTTP client used by REST adapters
///
/// Falls back to `reqwest::Client::new()` if the builder fails so that
/// construction of an adapter never fails on transport setup.
pub fn create_http_client(exchange_name: &str) -> reqwest::Client {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .connect_timeout(Duration::from_millis(HTTP_CONNECT_TIMEOUT_MS))
        .pool_max_idle_per_host(HTTP_POOL_MAX_IDLE)
        .pool_idle_timeout(Duration::from_secs(HTTP_POOL_IDLE_TIMEOUT_SECS))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new());
    tracing::debug!(
        phase = "init",
        exchange = %exchange_name,
        timeout_s = HTTP_TIMEOUT_SECS,
        connect_timeout_ms = HTTP_CONNECT_TIMEOUT_MS,
        pool_max_idle = HTTP_POOL_MAX_IDLE,
        "HTTP client configured"
    );
    client
}

// =============================================================================
// Domain Records
// =============================================================================

/// One tradable futures instrument
///
/// The commonly used specification fields are lifted out as typed options;
/// the complete record returned by the exchange stays available in `spec`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Contract {
    pub symbol: String,
    pub exchange: &'static str,
    pub base_currency: Option<String>,
    pub quote_currency: Option<String>,
    pub settle_currency: Option<String>,
    pub contract_type: Option<String>,
    pub status: Option<String>,
    pub tick_size: Option<f64>,
    pub lot_size: Option<f64>,
    pub multiplier: Option<f64>,
    pub max_leverage: Option<f64>,
    /// Full contract record as returned by the exchange
    pub spec: Map<String, Value>,
}

/// Margin account snapshot for one settlement currency
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Balance {
    pub currency: String,
    pub exchange: &'static str,
    pub available_balance: f64,
    pub account_equity: f64,
    pub margin_balance: f64,
    pub position_margin: f64,
    pub order_margin: f64,
    pub frozen_funds: f64,
    pub unrealised_pnl: f64,
}

/// Best bid/ask for a symbol
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Price {
    pub bid: f64,
    pub ask: f64,
}
