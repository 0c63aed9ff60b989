use crate::types::ApiTransaction;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Etherscan-compatible explorer client focused on per-address transaction lists.
pub struct EtherscanClient {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
    rate_limit_delay: Duration,
    max_retries: u32,
    backoff_base: Duration,
}

/// Failure classification for a single txlist request. Rate limits and
/// server-side failures are retryable; API rejections are not.
#[derive(Debug, thiserror::Error)]
pub enum ExplorerError {
    #[error("explorer rate limit hit")]
    RateLimited,
    #[error("explorer server error: {0}")]
    Server(reqwest::StatusCode),
    #[error("explorer API error: {0}")]
    Api(String),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl ExplorerError {
    fn is_retryable(&self) -> bool {
        match self {
            Self::RateLimited | Self::Server(_) => true,
            Self::Http(e) => e.is_timeout() || e.is_connect(),
            Self::Api(_) => false,
        }
    }
}

/// Etherscan wraps every response in `{status, message, result}`. `result`
/// is a record array on success but a bare string on errors, so it stays a
/// raw value until the status is known.
#[derive(Debug, Deserialize)]
struct TxListEnvelope {
    status: Option<String>,
    message: Option<String>,
    result: serde_json::Value,
}

impl EtherscanClient {
    pub fn new_with_settings(
        base_url: &str,
        api_key: &str,
        timeout: Duration,
        rate_limit_delay: Duration,
        max_retries: u32,
        backoff_base: Duration,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("failed to build HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            client,
            rate_limit_delay,
            max_retries,
            backoff_base,
        }
    }

    /// URL for one page of `account/txlist` results. The API key is appended
    /// at request time so this stays safe to log and assert on.
    pub fn txlist_url(&self, address: &str, page: u32, offset: u32) -> String {
        let encoded = urlencoding::encode(address);
        format!(
            "{}?module=account&action=txlist&address={encoded}&startblock=0&endblock=99999999&page={page}&offset={offset}&sort=asc",
            self.base_url
        )
    }

    /// Fetch one page of transactions for a wallet, retrying rate limits and
    /// server errors with exponential backoff.
    pub async fn fetch_txlist_page(
        &self,
        address: &str,
        page: u32,
        offset: u32,
    ) -> Result<Vec<ApiTransaction>> {
        let url = self.txlist_url(address, page, offset);
        let mut attempt = 0_u32;

        loop {
            // Rate limiting: the free explorer tier allows ~5 req/s.
            tokio::time::sleep(self.rate_limit_delay).await;

            match self.try_fetch_txlist(&url).await {
                Ok(txns) => {
                    debug!(address, page, count = txns.len(), "fetched txlist page");
                    return Ok(txns);
                }
                Err(e) if e.is_retryable() && attempt < self.max_retries => {
                    let backoff = self.backoff_base * 2_u32.pow(attempt);
                    warn!(
                        address,
                        attempt,
                        wait_for = ?backoff,
                        error = %e,
                        "txlist fetch failed; retrying"
                    );
                    tokio::time::sleep(backoff).await;
                    attempt += 1;
                }
                Err(e) => {
                    return Err(e).with_context(|| format!("failed to fetch txlist for {address}"))
                }
            }
        }
    }

    async fn try_fetch_txlist(&self, url: &str) -> Result<Vec<ApiTransaction>, ExplorerError> {
        debug!(url, "fetching txlist");

        let request_url = format!("{url}&apikey={}", self.api_key);
        let resp = self.client.get(&request_url).send().await?;

        let status = resp.status();
        if status.as_u16() == 429 {
            return Err(ExplorerError::RateLimited);
        }
        if status.is_server_error() {
            return Err(ExplorerError::Server(status));
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ExplorerError::Api(format!("{status}: {body}")));
        }

        let envelope: TxListEnvelope = resp.json().await?;
        parse_envelope(envelope)
    }
}

fn parse_envelope(envelope: TxListEnvelope) -> Result<Vec<ApiTransaction>, ExplorerError> {
    if envelope.status.as_deref() == Some("1") {
        return serde_json::from_value(envelope.result)
            .map_err(|e| ExplorerError::Api(format!("malformed txlist result: {e}")));
    }

    let message = envelope.message.unwrap_or_default();
    if message.eq_ignore_ascii_case("no transactions found") {
        return Ok(vec![]);
    }
    if message.to_ascii_lowercase().contains("rate limit") {
        return Err(ExplorerError::RateLimited);
    }
    // Some mirrors report an empty page as status 0 with an empty result array.
    if envelope.result.as_array().is_some_and(|a| a.is_empty()) {
        return Ok(vec![]);
    }
    Err(ExplorerError::Api(message))
}
