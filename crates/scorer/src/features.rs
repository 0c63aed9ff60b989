use common::dataset::TransactionSet;
use common::types::{num_or_zero, ApiTransaction};
use std::collections::HashSet;

/// Base units per whole asset unit (wei per ETH).
pub const WEI_PER_ETH: f64 = 1e18;

#[derive(Debug, Clone, PartialEq)]
pub struct WalletFeatures {
    pub wallet_id: String,
    pub tx_count: u32,
    pub total_value_eth: f64,
    pub avg_value_eth: f64,
    pub unique_recipients: u32,
    pub unique_methods: u32,
    pub failed_count: u32,
    pub success_rate: f64,
}

/// Aggregate one wallet's transaction history into its feature set.
///
/// Total function: malformed numeric fields coerce to 0 and an empty
/// history yields all-zero aggregates (success_rate 0, not NaN).
pub fn compute_wallet_features(wallet_id: &str, txns: &[ApiTransaction]) -> WalletFeatures {
    let tx_count = txns.len() as u32;

    let total_value_wei: f64 = txns.iter().map(|t| num_or_zero(t.value.as_deref())).sum();
    let total_value_eth = total_value_wei / WEI_PER_ETH;
    let avg_value_eth = if tx_count > 0 {
        total_value_wei / f64::from(tx_count) / WEI_PER_ETH
    } else {
        0.0
    };

    // Distinct counts cover present values only; a contract creation has no
    // `to` and contributes nothing to recipient diversity.
    let unique_recipients = txns
        .iter()
        .filter_map(|t| t.to.as_deref())
        .collect::<HashSet<_>>()
        .len() as u32;
    let unique_methods = txns
        .iter()
        .filter_map(|t| t.method_id.as_deref())
        .collect::<HashSet<_>>()
        .len() as u32;

    let failed_count = txns
        .iter()
        .filter(|t| num_or_zero(t.is_error.as_deref()) != 0.0)
        .count() as u32;
    let success_rate = if tx_count > 0 {
        f64::from(tx_count - failed_count) / f64::from(tx_count)
    } else {
        0.0
    };

    WalletFeatures {
        wallet_id: wallet_id.to_string(),
        tx_count,
        total_value_eth,
        avg_value_eth,
        unique_recipients,
        unique_methods,
        failed_count,
        success_rate,
    }
}

/// Feature sets for every wallet in the dataset, in dataset (sorted) order.
/// Wallets present as keys with empty histories still get a row.
pub fn extract_all(dataset: &TransactionSet) -> Vec<WalletFeatures> {
    dataset
        .iter()
        .map(|(wallet, txns)| compute_wallet_features(wallet, txns))
        .collect()
}
