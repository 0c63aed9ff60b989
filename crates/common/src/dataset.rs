use crate::types::ApiTransaction;
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::Path;

/// The on-disk dataset: wallet address -> fetched transaction history.
///
/// BTreeMap keeps wallet iteration sorted by address, which fixes the
/// "original order" the scoring pass and the de-collision pass both use.
pub type TransactionSet = BTreeMap<String, Vec<ApiTransaction>>;

pub fn load(path: &Path) -> Result<TransactionSet> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read dataset {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse dataset {}", path.display()))
}

pub fn save(path: &Path, dataset: &TransactionSet) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(dataset)?;
    std::fs::write(path, content)
        .with_context(|| format!("failed to write dataset {}", path.display()))
}
