use anyhow::{Context, Result};
use std::path::Path;
use std::time::Duration;

mod collection;
mod wallets;

#[tokio::main]
async fn main() -> Result<()> {
    let config = common::config::Config::load()?;

    let dispatch = common::observability::build_dispatch(&config.general.log_level);
    tracing::dispatcher::set_global_default(dispatch).map_err(anyhow::Error::msg)?;

    tracing::info!("transaction collector starting");

    let api_key = std::env::var("ETHERSCAN_API_KEY")
        .context("ETHERSCAN_API_KEY environment variable must be set")?;

    let wallet_list = wallets::load_wallet_list(Path::new(&config.collector.wallets_csv))?;
    tracing::info!(wallets = wallet_list.len(), "wallet list loaded");

    let client = common::etherscan::EtherscanClient::new_with_settings(
        &config.etherscan.base_url,
        &api_key,
        Duration::from_secs(config.etherscan.timeout_secs),
        Duration::from_millis(config.etherscan.rate_limit_delay_ms),
        config.etherscan.max_retries,
        Duration::from_millis(config.etherscan.backoff_base_ms),
    );

    collection::run_collection(
        &client,
        &wallet_list,
        Path::new(&config.collector.output_path),
        config.etherscan.page_size,
        config.etherscan.max_txns_per_wallet,
        config.collector.autosave_every,
    )
    .await
}
