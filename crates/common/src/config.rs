use anyhow::Result;
use serde::Deserialize;
use std::str::FromStr;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub general: General,
    pub collector: Collector,
    pub etherscan: Etherscan,
    pub scoring: Scoring,
}

#[derive(Debug, Deserialize)]
pub struct General {
    pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Collector {
    pub wallets_csv: String,
    pub output_path: String,
    pub autosave_every: usize,
}

#[derive(Debug, Deserialize)]
pub struct Etherscan {
    pub base_url: String,
    pub timeout_secs: u64,
    pub rate_limit_delay_ms: u64,
    pub max_retries: u32,
    pub backoff_base_ms: u64,
    pub page_size: u32,
    pub max_txns_per_wallet: usize,
}

#[derive(Debug, Deserialize)]
pub struct Scoring {
    pub transactions_path: String,
    pub output_csv: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        let content = std::fs::read_to_string("config/default.toml")?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }
}

impl FromStr for Config {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_toml_str(s)
    }
}
