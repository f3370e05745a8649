//! Exchange adapters
//!
//! This module provides the shared domain records and error types, plus the
//! KuCoin Futures REST connector.

pub mod errors;
pub mod kucoin;
pub mod types;

// Re-export commonly used types for convenience
pub use errors::{ExchangeError, ExchangeResult};
pub use kucoin::{KucoinClient, KucoinConfig, KucoinSigner};
pub use types::{Balance, Contract, Price};
