//! Exchange adapter error types
//!
//! All exchange-related errors are wrapped in ExchangeError enum
//! which implements thiserror for consistent error handling.

use thiserror::Error;

/// Exchange-specific error types for adapter operations
#[derive(Error, Debug)]
pub enum ExchangeError {
    /// Request never produced an HTTP response (connect, DNS, timeout)
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Exchange answered with a status other than 200
    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// Invalid or unexpected response from exchange
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Credentials missing or rejected
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),
}

/// Result type alias for exchange operations
pub type ExchangeResult<T> = std::result::Result<T, ExchangeError>;
