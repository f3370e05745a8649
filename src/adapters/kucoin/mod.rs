//! KuCoin Futures Adapter
//!
//! Read-only REST client for KuCoin Futures.
//! Uses HMAC-SHA256 signatures (API key version 2) for authentication.
//!
//! This module is organized into submodules:
//! - `config` - Credentials, endpoints and environment loading
//! - `types` - API response types and conversion into domain records
//! - `signing` - HMAC signing and the shared query encoder
//! - `adapter` - Main KucoinClient implementation

mod adapter;
mod config;
pub mod signing;
mod types;

// Re-export public items
pub use adapter::{KucoinClient, ACCOUNT_OVERVIEW_PATH, CONTRACTS_ACTIVE_PATH};
pub use config::{KucoinConfig, DEFAULT_SETTLE_CURRENCY, PRODUCTION_REST_URL, SANDBOX_REST_URL};
pub use signing::KucoinSigner;
pub use types::{parse_balance, parse_contracts, EXCHANGE_NAME};
