pub mod config;
pub mod dataset;
pub mod etherscan;
pub mod observability;
pub mod types;
