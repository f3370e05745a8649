//! KuCoin Futures Client Implementation
//!
//! Read-only REST client: signs and issues authenticated GETs and keeps the
//! latest contract and balance snapshots.

use std::collections::HashMap;

use reqwest::{Method, StatusCode};
use serde_json::Value;
use tracing::Instrument;

use crate::adapters::errors::{ExchangeError, ExchangeResult};
use crate::adapters::types::{create_http_client, Balance, Contract, Price};

use super::config::KucoinConfig;
use super::signing::{expires_at_ms, request_path, KucoinSigner};
use super::types::{parse_balance, parse_contracts, EXCHANGE_NAME};

// =============================================================================
// Constants
// =============================================================================

pub const CONTRACTS_ACTIVE_PATH: &str = "/api/v1/contracts/active";
pub const ACCOUNT_OVERVIEW_PATH: &str = "/api/v1/account-overview";

const HEADER_SIGN: &str = "KC-API-SIGN";
const HEADER_TIMESTAMP: &str = "KC-API-TIMESTAMP";
const HEADER_KEY: &str = "KC-API-KEY";
const HEADER_PASSPHRASE: &str = "KC-API-PASSPHRASE";
const HEADER_KEY_VERSION: &str = "KC-API-KEY-VERSION";

/// Key version 2: passphrase is sent HMAC-encoded
const API_KEY_VERSION: &str = "2";

// =============================================================================
// KucoinClient Implementation
// =============================================================================

/// Authenticated KuCoin Futures REST client
///
/// Construction fetches contracts and the settlement-currency balance so the
/// client is immediately queryable. Snapshots only change through the
/// `refresh_*` methods.
#[derive(Debug)]
pub struct KucoinClient {
    http_client: reqwest::Client,
    signer: KucoinSigner,
    base_url: String,
    sandbox: bool,
    public_key: String,
    encoded_passphrase: String,
    settle_currency: String,
    legacy_second_timestamps: bool,
    span: tracing::Span,
    contracts: HashMap<String, Contract>,
    balances: HashMap<String, Balance>,
    prices: HashMap<String, Price>,
}

impl KucoinClient {
    /// Build a client from explicit credentials and fetch the initial snapshots
    pub async fn new(
        public_key: impl Into<String>,
        secret_key: impl Into<String>,
        passphrase: impl Into<String>,
        sandbox: bool,
    ) -> Self {
        Self::connect(KucoinConfig::new(public_key, secret_key, passphrase, sandbox)).await
    }

    /// Build a client from a configuration and fetch the initial snapshots
    ///
    /// Never fails: a failed fetch is logged and leaves its map empty.
    pub async fn connect(config: KucoinConfig) -> Self {
        let mut client = Self::from_config(config);

        client.contracts = client.fetch_contracts().await;
        let currency = client.settle_currency.clone();
        client.balances = client.fetch_balances(&currency).await;

        client.span.in_scope(|| {
            tracing::info!(
                exchange = EXCHANGE_NAME,
                contracts = client.contracts.len(),
                balances = client.balances.len(),
                "KuCoin client successfully initialized"
            );
        });
        client
    }

    /// Set up credentials and transport without any network I/O
    ///
    /// The plaintext passphrase is consumed here; only its encoded form is kept.
    fn from_config(config: KucoinConfig) -> Self {
        let base_url = config.rest_base_url().to_string();
        let span = tracing::info_span!(
            "kucoin_client",
            sandbox = config.sandbox,
            base_url = %base_url
        );
        let signer = KucoinSigner::new(config.secret_key);
        let encoded_passphrase = signer.encode_secret(&config.passphrase);

        Self {
            http_client: create_http_client(EXCHANGE_NAME),
            signer,
            base_url,
            sandbox: config.sandbox,
            public_key: config.public_key,
            encoded_passphrase,
            settle_currency: config.settle_currency,
            legacy_second_timestamps: config.legacy_second_timestamps,
            span,
            contracts: HashMap::new(),
            balances: HashMap::new(),
            prices: HashMap::new(),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn contracts(&self) -> &HashMap<String, Contract> {
        &self.contracts
    }

    pub fn balances(&self) -> &HashMap<String, Balance> {
        &self.balances
    }

    pub fn contract(&self, symbol: &str) -> Option<&Contract> {
        self.contracts.get(symbol)
    }

    pub fn balance(&self, currency: &str) -> Option<&Balance> {
        self.balances.get(currency)
    }

    /// Reserved for price tracking; not populated by this client
    pub fn prices(&self) -> &HashMap<String, Price> {
        &self.prices
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn is_sandbox(&self) -> bool {
        self.sandbox
    }

    pub fn settle_currency(&self) -> &str {
        &self.settle_currency
    }

    /// Passphrase as sent in `KC-API-PASSPHRASE`
    pub fn encoded_passphrase(&self) -> &str {
        &self.encoded_passphrase
    }

    // =========================================================================
    // Signed Requests
    // =========================================================================

    /// Authentication headers for one request
    pub fn auth_headers(
        &self,
        expires_at_ms: &str,
        method: &str,
        path: &str,
        params: &[(&str, &str)],
    ) -> [(&'static str, String); 5] {
        [
            (HEADER_SIGN, self.signer.sign(expires_at_ms, method, path, params)),
            (HEADER_TIMESTAMP, expires_at_ms.to_string()),
            (HEADER_KEY, self.public_key.clone()),
            (HEADER_PASSPHRASE, self.encoded_passphrase.clone()),
            (HEADER_KEY_VERSION, API_KEY_VERSION.to_string()),
        ]
    }

    /// Issue a signed request and return the JSON body of a 200 response
    ///
    /// # Panics
    ///
    /// Panics if `method` is not GET. This client only performs read-only
    /// calls; any other method is a caller bug.
    pub async fn try_execute_signed(
        &self,
        method: Method,
        path: &str,
        params: &[(&str, &str)],
    ) -> ExchangeResult<Value> {
        assert!(
            method == Method::GET,
            "KucoinClient only supports GET requests, got {}",
            method
        );

        let expires = expires_at_ms(self.legacy_second_timestamps).to_string();
        let url = format!("{}{}", self.base_url, request_path(path, params));

        let mut request = self.http_client.request(method.clone(), &url);
        for (name, value) in self.auth_headers(&expires, method.as_str(), path, params) {
            request = request.header(name, value);
        }

        self.send_signed(request, &method, path)
            .instrument(self.span.clone())
            .await
    }

    async fn send_signed(
        &self,
        request: reqwest::RequestBuilder,
        method: &Method,
        path: &str,
    ) -> ExchangeResult<Value> {
        tracing::debug!(method = %method, path = %path, "Sending signed request");

        let response = request.send().await.map_err(|e| {
            ExchangeError::ConnectionFailed(format!("{} {}: {}", method, path, e))
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            ExchangeError::ConnectionFailed(format!("Failed to read response: {}", e))
        })?;

        if status != StatusCode::OK {
            return Err(ExchangeError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body)
            .map_err(|e| ExchangeError::InvalidResponse(format!("{} - body: {}", e, body)))
    }

    /// Signed GET, surfacing the failure reason
    pub async fn try_execute_signed_get(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> ExchangeResult<Value> {
        self.try_execute_signed(Method::GET, path, params).await
    }

    /// Signed GET; failures are logged and yield `None`
    pub async fn execute_signed_get(&self, path: &str, params: &[(&str, &str)]) -> Option<Value> {
        match self.try_execute_signed_get(path, params).await {
            Ok(body) => Some(body),
            Err(e) => {
                self.log_request_error("GET", path, &e);
                None
            }
        }
    }

    fn log_request_error(&self, method: &str, path: &str, err: &ExchangeError) {
        self.span.in_scope(|| match err {
            ExchangeError::HttpStatus { status, body } => tracing::error!(
                exchange = EXCHANGE_NAME,
                method,
                path,
                status = *status,
                body = %body,
                "Error while making request"
            ),
            ExchangeError::ConnectionFailed(reason) => tracing::error!(
                exchange = EXCHANGE_NAME,
                method,
                path,
                error = %reason,
                "Connection error while making request"
            ),
            other => tracing::error!(
                exchange = EXCHANGE_NAME,
                method,
                path,
                error = %other,
                "Request failed"
            ),
        });
    }

    // =========================================================================
    // Fetch Operations
    // =========================================================================

    /// Active contracts keyed by symbol, or the reason the fetch failed
    pub async fn try_fetch_contracts(&self) -> ExchangeResult<HashMap<String, Contract>> {
        let body = self.try_execute_signed_get(CONTRACTS_ACTIVE_PATH, &[]).await?;
        parse_contracts(&body)
    }

    /// Active contracts keyed by symbol; empty if the fetch failed
    pub async fn fetch_contracts(&self) -> HashMap<String, Contract> {
        match self.try_fetch_contracts().await {
            Ok(contracts) => {
                self.span.in_scope(|| {
                    tracing::debug!(exchange = EXCHANGE_NAME, count = contracts.len(), "Fetched contracts");
                });
                contracts
            }
            Err(e) => {
                self.log_request_error("GET", CONTRACTS_ACTIVE_PATH, &e);
                HashMap::new()
            }
        }
    }

    /// Margin balance for `currency`, or the reason the fetch failed
    pub async fn try_fetch_balances(
        &self,
        currency: &str,
    ) -> ExchangeResult<HashMap<String, Balance>> {
        let body = self
            .try_execute_signed_get(ACCOUNT_OVERVIEW_PATH, &[("currency", currency)])
            .await?;
        let balance = parse_balance(&body, currency)?;
        Ok(HashMap::from([(currency.to_string(), balance)]))
    }

    /// Margin balance for `currency` keyed by currency; empty if the fetch failed
    pub async fn fetch_balances(&self, currency: &str) -> HashMap<String, Balance> {
        match self.try_fetch_balances(currency).await {
            Ok(balances) => balances,
            Err(e) => {
                self.log_request_error("GET", ACCOUNT_OVERVIEW_PATH, &e);
                HashMap::new()
            }
        }
    }

    /// Replace the contract snapshot
    pub async fn refresh_contracts(&mut self) -> &HashMap<String, Contract> {
        self.contracts = self.fetch_contracts().await;
        &self.contracts
    }

    /// Replace the balance snapshot with a fresh fetch for `currency`
    pub async fn refresh_balances(&mut self, currency: &str) -> &HashMap<String, Balance> {
        self.balances = self.fetch_balances(currency).await;
        &self.balances
    }
}
