use anyhow::Result;
use common::dataset::{self, TransactionSet};
use common::etherscan::EtherscanClient;
use common::types::ApiTransaction;
use std::path::Path;
use tracing::{debug, error, info, warn};

pub trait TransactionsPager {
    #[allow(dead_code)] // exercised via EtherscanClient; fakes only need fetch
    fn txlist_url(&self, address: &str, page: u32, offset: u32) -> String;

    fn fetch_txlist_page(
        &self,
        address: &str,
        page: u32,
        offset: u32,
    ) -> impl std::future::Future<Output = Result<Vec<ApiTransaction>>> + Send;
}

impl TransactionsPager for EtherscanClient {
    fn txlist_url(&self, address: &str, page: u32, offset: u32) -> String {
        EtherscanClient::txlist_url(self, address, page, offset)
    }

    async fn fetch_txlist_page(
        &self,
        address: &str,
        page: u32,
        offset: u32,
    ) -> Result<Vec<ApiTransaction>> {
        EtherscanClient::fetch_txlist_page(self, address, page, offset).await
    }
}

/// Fetch a wallet's full history page by page, stopping on a short page or
/// at the per-wallet cap.
pub async fn collect_wallet_transactions<P: TransactionsPager + Sync>(
    pager: &P,
    address: &str,
    page_size: u32,
    max_txns: usize,
) -> Result<Vec<ApiTransaction>> {
    let mut all = Vec::new();
    let mut page = 1_u32;

    loop {
        let txns = pager.fetch_txlist_page(address, page, page_size).await?;
        let page_len = txns.len();
        all.extend(txns);

        if all.len() >= max_txns {
            warn!(address, cap = max_txns, "per-wallet transaction cap reached");
            all.truncate(max_txns);
            break;
        }
        if page_len < page_size as usize {
            break;
        }
        page += 1;
    }

    Ok(all)
}

/// Fetch histories for every wallet on the list into the dataset file.
///
/// Wallets already present in an existing dataset are skipped (resume), a
/// wallet whose fetch ultimately fails is recorded with an empty history so
/// one bad address cannot sink the run, and the dataset is autosaved every
/// `autosave_every` newly fetched wallets.
pub async fn run_collection<P: TransactionsPager + Sync>(
    pager: &P,
    wallet_list: &[String],
    output_path: &Path,
    page_size: u32,
    max_txns: usize,
    autosave_every: usize,
) -> Result<()> {
    let mut dataset = if output_path.exists() {
        let existing = dataset::load(output_path)?;
        info!(wallets = existing.len(), "resuming from existing dataset");
        existing
    } else {
        TransactionSet::new()
    };

    let total = wallet_list.len();
    let mut fetched = 0_usize;

    for (idx, wallet) in wallet_list.iter().enumerate() {
        if dataset.contains_key(wallet) {
            debug!(wallet = %wallet, "already fetched; skipping");
            continue;
        }

        let txns = match collect_wallet_transactions(pager, wallet, page_size, max_txns).await {
            Ok(txns) => txns,
            Err(e) => {
                error!(wallet = %wallet, error = %e, "fetch failed; recording empty history");
                Vec::new()
            }
        };
        info!(
            wallet = %wallet,
            position = idx + 1,
            total,
            count = txns.len(),
            "wallet fetched"
        );
        dataset.insert(wallet.clone(), txns);

        fetched += 1;
        if autosave_every > 0 && fetched % autosave_every == 0 {
            dataset::save(output_path, &dataset)?;
            debug!(wallets = dataset.len(), "autosaved dataset");
        }
    }

    dataset::save(output_path, &dataset)?;
    info!(
        wallets = dataset.len(),
        path = %output_path.display(),
        "collection complete"
    );
    Ok(())
}
