use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::Path;

/// Load wallet addresses from the first column of a CSV file.
///
/// The first row is a header and is always skipped. Blank cells are
/// dropped and duplicates removed, preserving first-seen order.
pub fn load_wallet_list(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read wallet list {}", path.display()))?;

    let mut seen = HashSet::new();
    let mut wallets = Vec::new();
    for line in content.lines().skip(1) {
        let address = line.split(',').next().unwrap_or("").trim();
        if address.is_empty() {
            continue;
        }
        if seen.insert(address.to_string()) {
            wallets.push(address.to_string());
        }
    }
    Ok(wallets)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_csv(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wallets.csv");
        std::fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn test_loads_first_column_skipping_header() {
        let (_dir, path) = write_csv("Wallet id\n0xaaa\n0xbbb,extra\n0xccc\n");
        let wallets = load_wallet_list(&path).unwrap();
        assert_eq!(wallets, vec!["0xaaa", "0xbbb", "0xccc"]);
    }

    #[test]
    fn test_dedup_preserves_first_seen_order() {
        let (_dir, path) = write_csv("Wallet id\n0xbbb\n0xaaa\n0xbbb\n0xaaa\n");
        let wallets = load_wallet_list(&path).unwrap();
        assert_eq!(wallets, vec!["0xbbb", "0xaaa"]);
    }

    #[test]
    fn test_blank_rows_dropped() {
        let (_dir, path) = write_csv("Wallet id\n0xaaa\n\n , \n0xbbb\n");
        let wallets = load_wallet_list(&path).unwrap();
        assert_eq!(wallets, vec!["0xaaa", "0xbbb"]);
    }

    #[test]
    fn test_missing_file_errors_with_path() {
        let err = load_wallet_list(Path::new("/nonexistent/wallets.csv")).unwrap_err();
        assert!(err.to_string().contains("wallet list"));
    }
}
