//! KucoinClient against a mocked KuCoin Futures REST API
//! Run with: cargo test --test kucoin_client

use mockito::{Matcher, Server, ServerGuard};
use serde_json::json;

use kucoin_futures::adapters::kucoin::{
    KucoinSigner, ACCOUNT_OVERVIEW_PATH, CONTRACTS_ACTIVE_PATH,
};
use kucoin_futures::adapters::{ExchangeError, KucoinClient, KucoinConfig};

const PUBLIC_KEY: &str = "test-public-key";
const SECRET_KEY: &str = "test-secret-key";
const PASSPHRASE: &str = "test-passphrase";

fn config_for(server: &ServerGuard) -> KucoinConfig {
    KucoinConfig {
        public_key: PUBLIC_KEY.into(),
        secret_key: SECRET_KEY.into(),
        passphrase: PASSPHRASE.into(),
        sandbox: true,
        base_url: Some(server.url()),
        ..Default::default()
    }
}

fn account_overview_path() -> Matcher {
    Matcher::Regex(format!("^{}", ACCOUNT_OVERVIEW_PATH))
}

fn contracts_body() -> String {
    json!({
        "code": "200000",
        "data": [
            {"symbol": "XBTUSDM", "baseCurrency": "XBT", "quoteCurrency": "USD",
             "settleCurrency": "XBT", "tickSize": 1.0, "multiplier": -1.0, "maxLeverage": 20},
            {"symbol": "XBTUSDTM", "baseCurrency": "XBT", "quoteCurrency": "USDT",
             "settleCurrency": "USDT", "tickSize": 0.1, "multiplier": 0.001, "maxLeverage": 100}
        ]
    })
    .to_string()
}

fn balance_body(currency: &str, available: f64) -> String {
    json!({
        "code": "200000",
        "data": {
            "accountEquity": available + 0.5,
            "unrealisedPNL": 0.0,
            "marginBalance": available + 0.5,
            "positionMargin": 0.5,
            "orderMargin": 0.0,
            "frozenFunds": 0.0,
            "availableBalance": available,
            "currency": currency
        }
    })
    .to_string()
}

#[tokio::test]
async fn test_construction_fetches_contracts_and_balances() {
    let mut server = Server::new_async().await;

    let expected_passphrase = KucoinSigner::new(SECRET_KEY).encode_secret(PASSPHRASE);

    let contracts_mock = server
        .mock("GET", CONTRACTS_ACTIVE_PATH)
        .match_header("KC-API-KEY", PUBLIC_KEY)
        .match_header("KC-API-PASSPHRASE", expected_passphrase.as_str())
        .match_header("KC-API-KEY-VERSION", "2")
        .match_header("KC-API-SIGN", Matcher::Any)
        .match_header("KC-API-TIMESTAMP", Matcher::Regex(r"^\d{13}$".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(contracts_body())
        .expect(1)
        .create_async()
        .await;

    let balance_mock = server
        .mock("GET", account_overview_path())
        .match_query(Matcher::UrlEncoded("currency".into(), "XBT".into()))
        .match_header("KC-API-KEY", PUBLIC_KEY)
        .match_header("KC-API-KEY-VERSION", "2")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(balance_body("XBT", 12.5))
        .expect(1)
        .create_async()
        .await;

    let client = KucoinClient::connect(config_for(&server)).await;

    contracts_mock.assert_async().await;
    balance_mock.assert_async().await;

    assert!(client.is_sandbox());
    assert_eq!(client.contracts().len(), 2);
    assert!(client.contract("XBTUSDM").is_some());
    assert!(client.contract("XBTUSDTM").is_some());
    assert_eq!(client.balances().len(), 1);
    assert_eq!(client.balances()["XBT"].available_balance, 12.5);
    assert_eq!(client.balances()["XBT"].exchange, "kuCoin");
    assert!(client.prices().is_empty());
}

#[tokio::test]
async fn test_fetch_contracts_single_symbol() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", CONTRACTS_ACTIVE_PATH)
        .with_status(200)
        .with_body(json!({"code": "200000", "data": [{"symbol": "XBTUSDM", "tickSize": 1.0}]}).to_string())
        .create_async()
        .await;

    let client = KucoinClient::connect(config_for(&server)).await;
    let contracts = client.fetch_contracts().await;

    assert_eq!(contracts.len(), 1);
    let contract = &contracts["XBTUSDM"];
    assert_eq!(contract.symbol, "XBTUSDM");
    assert_eq!(contract.exchange, "kuCoin");
}

#[tokio::test]
async fn test_fetch_balances_keyed_by_requested_currency() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", account_overview_path())
        .match_query(Matcher::UrlEncoded("currency".into(), "USDT".into()))
        .with_status(200)
        .with_body(balance_body("USDT", 250.75))
        .create_async()
        .await;

    let client = KucoinClient::connect(config_for(&server)).await;
    let balances = client.fetch_balances("USDT").await;

    mock.assert_async().await;
    assert_eq!(balances.len(), 1);
    assert_eq!(balances["USDT"].available_balance, 250.75);
    assert_eq!(balances["USDT"].position_margin, 0.5);
}

#[tokio::test]
async fn test_non_200_responses_yield_empty_maps() {
    let mut server = Server::new_async().await;
    let _contracts = server
        .mock("GET", CONTRACTS_ACTIVE_PATH)
        .with_status(401)
        .with_body(r#"{"code":"400005","msg":"Invalid KC-API-SIGN"}"#)
        .create_async()
        .await;
    let _balance = server
        .mock("GET", account_overview_path())
        .with_status(500)
        .with_body("internal error")
        .create_async()
        .await;

    let client = KucoinClient::connect(config_for(&server)).await;

    assert!(client.contracts().is_empty());
    assert!(client.balances().is_empty());
    assert!(client.fetch_contracts().await.is_empty());
    assert!(client.fetch_balances("XBT").await.is_empty());
    assert!(client.execute_signed_get(CONTRACTS_ACTIVE_PATH, &[]).await.is_none());

    match client.try_fetch_contracts().await {
        Err(ExchangeError::HttpStatus { status, body }) => {
            assert_eq!(status, 401);
            assert!(body.contains("Invalid KC-API-SIGN"));
        }
        other => panic!("expected HttpStatus error, got {:?}", other),
    }
    match client.try_fetch_balances("XBT").await {
        Err(ExchangeError::HttpStatus { status, .. }) => assert_eq!(status, 500),
        other => panic!("expected HttpStatus error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_transport_failure_yields_empty_maps() {
    // Nothing listens on port 1
    let config = KucoinConfig {
        public_key: PUBLIC_KEY.into(),
        secret_key: SECRET_KEY.into(),
        passphrase: PASSPHRASE.into(),
        base_url: Some("http://127.0.0.1:1".into()),
        ..Default::default()
    };

    let client = KucoinClient::connect(config).await;

    assert!(client.contracts().is_empty());
    assert!(client.balances().is_empty());
    assert!(matches!(
        client.try_fetch_contracts().await,
        Err(ExchangeError::ConnectionFailed(_))
    ));
}

#[tokio::test]
async fn test_success_without_data_is_treated_as_failure() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", CONTRACTS_ACTIVE_PATH)
        .with_status(200)
        .with_body(r#"{"code":"200000"}"#)
        .create_async()
        .await;

    let client = KucoinClient::connect(config_for(&server)).await;

    assert!(client.contracts().is_empty());
    assert!(matches!(
        client.try_fetch_contracts().await,
        Err(ExchangeError::InvalidResponse(_))
    ));
}

#[tokio::test]
async fn test_empty_contract_list_is_not_an_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", CONTRACTS_ACTIVE_PATH)
        .with_status(200)
        .with_body(r#"{"code":"200000","data":[]}"#)
        .create_async()
        .await;

    let client = KucoinClient::connect(config_for(&server)).await;

    let contracts = client.try_fetch_contracts().await.unwrap();
    assert!(contracts.is_empty());
}

#[tokio::test]
async fn test_refresh_replaces_snapshots() {
    let mut server = Server::new_async().await;
    let first_contracts = server
        .mock("GET", CONTRACTS_ACTIVE_PATH)
        .with_status(200)
        .with_body(contracts_body())
        .create_async()
        .await;
    let first_balance = server
        .mock("GET", account_overview_path())
        .with_status(200)
        .with_body(balance_body("XBT", 12.5))
        .create_async()
        .await;

    let mut client = KucoinClient::connect(config_for(&server)).await;
    assert_eq!(client.contracts().len(), 2);
    assert!(client.balance("XBT").is_some());

    first_contracts.remove_async().await;
    first_balance.remove_async().await;

    let _contracts = server
        .mock("GET", CONTRACTS_ACTIVE_PATH)
        .with_status(200)
        .with_body(json!({"data": [{"symbol": "ETHUSDTM"}]}).to_string())
        .create_async()
        .await;
    let _balance = server
        .mock("GET", account_overview_path())
        .match_query(Matcher::UrlEncoded("currency".into(), "USDT".into()))
        .with_status(200)
        .with_body(balance_body("USDT", 99.0))
        .create_async()
        .await;

    let contracts = client.refresh_contracts().await;
    assert_eq!(contracts.len(), 1);
    assert!(contracts.contains_key("ETHUSDTM"));

    let balances = client.refresh_balances("USDT").await;
    assert_eq!(balances.len(), 1);
    assert_eq!(balances["USDT"].available_balance, 99.0);
    assert!(client.balance("XBT").is_none());
}

#[tokio::test]
async fn test_legacy_timestamps_are_whole_seconds() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", CONTRACTS_ACTIVE_PATH)
        .match_header("KC-API-TIMESTAMP", Matcher::Regex(r"^\d{10}000$".into()))
        .with_status(200)
        .with_body(contracts_body())
        .create_async()
        .await;

    let config = KucoinConfig {
        legacy_second_timestamps: true,
        ..config_for(&server)
    };
    let client = KucoinClient::connect(config).await;

    mock.assert_async().await;
    assert_eq!(client.contracts().len(), 2);
}
