//! KuCoin Futures Configuration
//!
//! Credentials, environment selection and environment-variable loading.

use std::fmt;

use crate::adapters::errors::{ExchangeError, ExchangeResult};

/// Production REST endpoint
pub const PRODUCTION_REST_URL: &str = "https://api.kucoin.com";

/// Sandbox (testnet) REST endpoint
pub const SANDBOX_REST_URL: &str = "https://api-sandbox-futures.kucoin.com";

/// Settlement currency used when none is configured
pub const DEFAULT_SETTLE_CURRENCY: &str = "XBT";

/// Configuration for a KuCoin Futures client
#[derive(Clone)]
pub struct KucoinConfig {
    /// API key, sent in clear as `KC-API-KEY`
    pub public_key: String,
    /// API secret, only ever used as the HMAC key
    pub secret_key: String,
    /// API passphrase in plaintext; the client stores it encoded
    pub passphrase: String,
    /// Use the sandbox endpoint (true) or production (false)
    pub sandbox: bool,
    /// Currency whose balance is fetched at construction
    pub settle_currency: String,
    /// Overrides the sandbox/production URL (mock servers, proxies)
    pub base_url: Option<String>,
    /// Truncate the request timestamp to whole seconds before scaling to ms
    pub legacy_second_timestamps: bool,
}

impl KucoinConfig {
    /// Create a configuration from explicit credentials
    pub fn new(
        public_key: impl Into<String>,
        secret_key: impl Into<String>,
        passphrase: impl Into<String>,
        sandbox: bool,
    ) -> Self {
        Self {
            public_key: public_key.into(),
            secret_key: secret_key.into(),
            passphrase: passphrase.into(),
            sandbox,
            ..Default::default()
        }
    }

    /// Create configuration from environment variables
    pub fn from_env() -> ExchangeResult<Self> {
        let public_key = required_env("KUCOIN_PUBLIC_KEY")?;
        let secret_key = required_env("KUCOIN_SECRET_KEY")?;
        let passphrase = required_env("KUCOIN_PASSPHRASE")?;

        let sandbox = std::env::var("KUCOIN_SANDBOX")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(true);
        let settle_currency = std::env::var("KUCOIN_SETTLE_CURRENCY")
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_SETTLE_CURRENCY.to_string());
        let legacy_second_timestamps = std::env::var("KUCOIN_LEGACY_TIMESTAMPS")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        Ok(Self {
            public_key,
            secret_key,
            passphrase,
            sandbox,
            settle_currency,
            base_url: None,
            legacy_second_timestamps,
        })
    }

    /// Get REST API base URL
    pub fn rest_base_url(&self) -> &str {
        match &self.base_url {
            Some(url) => url.trim_end_matches('/'),
            None if self.sandbox => SANDBOX_REST_URL,
            None => PRODUCTION_REST_URL,
        }
    }
}

fn required_env(name: &str) -> ExchangeResult<String> {
    let value = std::env::var(name)
        .map_err(|_| ExchangeError::AuthenticationFailed(format!("{} not set", name)))?;
    if value.is_empty() {
        return Err(ExchangeError::AuthenticationFailed(format!("{} is empty", name)));
    }
    Ok(value)
}

impl Default for KucoinConfig {
    fn default() -> Self {
        Self {
            public_key: String::new(),
            secret_key: String::new(),
            passphrase: String::new(),
            sandbox: true,
            settle_currency: DEFAULT_SETTLE_CURRENCY.to_string(),
            base_url: None,
            legacy_second_timestamps: false,
        }
    }
}

impl fmt::Debug for KucoinConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KucoinConfig")
            .field("public_key", &self.public_key)
            .field("secret_key", &"<redacted>")
            .field("passphrase", &"<redacted>")
            .field("sandbox", &self.sandbox)
            .field("settle_currency", &self.settle_currency)
            .field("base_url", &self.base_url)
            .field("legacy_second_timestamps", &self.legacy_second_timestamps)
            .finish()
    }
}
