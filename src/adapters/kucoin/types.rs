//! KuCoin Types
//!
//! REST response payloads and their conversion into the shared domain records.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::adapters::errors::{ExchangeError, ExchangeResult};
use crate::adapters::types::{Balance, Contract};

/// Exchange tag attached to every record produced by this connector
pub const EXCHANGE_NAME: &str = "kuCoin";

// =============================================================================
// Response Payloads
// =============================================================================

/// Contract entry of `GET /api/v1/contracts/active`
///
/// Only the fields lifted into [`Contract`] are declared; everything else is
/// kept from the raw record.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KucoinContractData {
    pub symbol: String,
    pub base_currency: Option<String>,
    pub quote_currency: Option<String>,
    pub settle_currency: Option<String>,
    #[serde(rename = "type")]
    pub contract_type: Option<String>,
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub tick_size: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub lot_size: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub multiplier: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub max_leverage: Option<f64>,
}

/// Payload of `GET /api/v1/account-overview`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KucoinAccountOverview {
    pub currency: Option<String>,
    #[serde(deserialize_with = "required_f64")]
    pub available_balance: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub account_equity: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub margin_balance: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub position_margin: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub order_margin: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub frozen_funds: Option<f64>,
    #[serde(rename = "unrealisedPNL", default, deserialize_with = "lenient_f64")]
    pub unrealised_pnl: Option<f64>,
}

impl KucoinAccountOverview {
    pub fn into_balance(self, currency: &str) -> Balance {
        Balance {
            currency: currency.to_string(),
            exchange: EXCHANGE_NAME,
            available_balance: self.available_balance,
            account_equity: self.account_equity.unwrap_or_default(),
            margin_balance: self.margin_balance.unwrap_or_default(),
            position_margin: self.position_margin.unwrap_or_default(),
            order_margin: self.order_margin.unwrap_or_default(),
            frozen_funds: self.frozen_funds.unwrap_or_default(),
            unrealised_pnl: self.unrealised_pnl.unwrap_or_default(),
        }
    }
}

/// KuCoin sends numbers, but some gateways quote them; accept both
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.parse().ok(),
        _ => None,
    })
}

fn required_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_f64(deserializer)?
        .ok_or_else(|| serde::de::Error::custom("expected a numeric value"))
}

// =============================================================================
// Envelope Parsing
// =============================================================================

fn envelope_data<'a>(body: &'a Value) -> ExchangeResult<&'a Value> {
    body.get("data")
        .filter(|d| !d.is_null())
        .ok_or_else(|| ExchangeError::InvalidResponse(format!("missing data field: {}", body)))
}

/// Map a contracts response to `symbol -> Contract`
///
/// Entries without a usable `symbol` are skipped.
pub fn parse_contracts(body: &Value) -> ExchangeResult<HashMap<String, Contract>> {
    let entries = envelope_data(body)?
        .as_array()
        .ok_or_else(|| ExchangeError::InvalidResponse("contracts data is not a list".into()))?;

    let mut contracts = HashMap::with_capacity(entries.len());
    for entry in entries {
        let Some(spec) = entry.as_object() else {
            tracing::warn!(exchange = EXCHANGE_NAME, entry = %entry, "Skipping non-object contract entry");
            continue;
        };
        let data: KucoinContractData = match serde_json::from_value(entry.clone()) {
            Ok(d) => d,
            Err(e) => {
                tracing::warn!(exchange = EXCHANGE_NAME, error = %e, "Skipping malformed contract entry");
                continue;
            }
        };
        let contract = Contract {
            symbol: data.symbol,
            exchange: EXCHANGE_NAME,
            base_currency: data.base_currency,
            quote_currency: data.quote_currency,
            settle_currency: data.settle_currency,
            contract_type: data.contract_type,
            status: data.status,
            tick_size: data.tick_size,
            lot_size: data.lot_size,
            multiplier: data.multiplier,
            max_leverage: data.max_leverage,
            spec: spec.clone(),
        };
        contracts.insert(contract.symbol.clone(), contract);
    }
    Ok(contracts)
}

/// Map an account-overview response to a [`Balance`] for `currency`
pub fn parse_balance(body: &Value, currency: &str) -> ExchangeResult<Balance> {
    let overview: KucoinAccountOverview = serde_json::from_value(envelope_data(body)?.clone())
        .map_err(|e| ExchangeError::InvalidResponse(format!("Failed to parse account overview: {}", e)))?;
    Ok(overview.into_balance(currency))
}
