//! KuCoin Futures — Entry Point
//!
//! 1. Loads `.env` and initializes logging
//! 2. Builds the client from `KUCOIN_*` environment variables
//! 3. Prints the active contracts and the settlement-currency balance
//!
//! # Logging
//! - Uses LOG_FORMAT env var: `json` (default) or `pretty`
//! - LOG_FILE mirrors records to a file (e.g. `info.log`)

use tracing::{error, info};

use kucoin_futures::adapters::{KucoinClient, KucoinConfig};
use kucoin_futures::config::init_logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_logging()?;

    let config = match KucoinConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(error = %e, "KuCoin credentials must be configured in .env");
            std::process::exit(1);
        }
    };
    info!(sandbox = config.sandbox, currency = %config.settle_currency, "Starting KuCoin client");

    let mut client = KucoinClient::connect(config).await;

    let contracts = client.refresh_contracts().await;
    let mut symbols: Vec<&String> = contracts.keys().collect();
    symbols.sort();
    println!("{} active contracts:", symbols.len());
    for symbol in symbols {
        println!("  {}", symbol);
    }

    let currency = client.settle_currency().to_string();
    match client.balance(&currency) {
        Some(balance) => println!("{} available balance: {}", currency, balance.available_balance),
        None => println!("{} balance unavailable", currency),
    }

    Ok(())
}
