//! Helius enhanced-API adapter supplying Solana wallet history.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize};
use tracing::debug;

use crate::{
    chains::{
        client::{ProviderClientConfig, WalletDataProvider},
        resilience::{retry_with_backoff, RetryConfig},
    },
    models::{
        Chain, FundingSource, Result, ScoutError, WalletBalances, WalletTransaction,
    },
};

const PROVIDER: &str = "helius";
const LAMPORTS_PER_SOL: f64 = 1_000_000_000.0;
/// Page size used when scanning transfers for the funding source. The
/// endpoint returns newest first and caps a page at this size, so the funder
/// reported is the earliest inbound transfer within the latest 100 transfers,
/// not necessarily the wallet's first funder.
const FUNDING_SCAN_LIMIT: usize = 100;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BalancesResponse {
    #[serde(default)]
    native_balance: u64,
    #[serde(default)]
    tokens: Vec<TokenHolding>,
}

#[derive(Debug, Deserialize)]
struct TokenHolding {
    #[serde(default)]
    amount: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EnhancedTransaction {
    #[serde(default, rename = "type")]
    kind: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    timestamp: i64,
    #[serde(default)]
    native_transfers: Vec<NativeTransfer>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NativeTransfer {
    #[serde(default)]
    from_user_account: String,
    #[serde(default)]
    to_user_account: String,
    #[serde(default)]
    amount: u64,
}

impl From<EnhancedTransaction> for WalletTransaction {
    fn from(tx: EnhancedTransaction) -> Self {
        WalletTransaction {
            kind: tx.kind,
            timestamp: DateTime::<Utc>::from_timestamp(tx.timestamp, 0).unwrap_or_default(),
            description: tx.description,
        }
    }
}

pub struct HeliusClient {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
    retry: RetryConfig,
}

impl HeliusClient {
    pub fn new(config: ProviderClientConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| ScoutError::Config("Helius API key is not configured".to_string()))?;

        let http_client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| ScoutError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            retry: RetryConfig::with_retries(config.max_retries),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let url = url.as_str();
        retry_with_backoff(&self.retry, path, || self.fetch(url, query)).await
    }

    async fn fetch<T: DeserializeOwned>(&self, url: &str, query: &[(&str, String)]) -> Result<T> {
        debug!("GET {}", url);
        let response = self
            .http_client
            .get(url)
            .query(&[("api-key", self.api_key.as_str())])
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScoutError::rpc(PROVIDER, format!("HTTP {} for {}", status, url)));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn enhanced_transactions(
        &self,
        address: &str,
        limit: usize,
        kind: Option<&str>,
    ) -> Result<Vec<EnhancedTransaction>> {
        let mut query = vec![("limit", limit.to_string())];
        if let Some(kind) = kind {
            query.push(("type", kind.to_string()));
        }
        self.get_json(&format!("/v0/addresses/{}/transactions", address), &query)
            .await
    }
}

/// Sender of the oldest inbound native transfer, if any.
fn earliest_funder(address: &str, transactions: &[EnhancedTransaction]) -> FundingSource {
    transactions
        .iter()
        .flat_map(|tx| tx.native_transfers.iter().map(move |t| (tx.timestamp, t)))
        .filter(|(_, t)| t.to_user_account == address && t.from_user_account != address && t.amount > 0)
        .min_by_key(|(timestamp, _)| *timestamp)
        .map(|(_, t)| FundingSource::Known(t.from_user_account.clone()))
        .unwrap_or(FundingSource::Unknown)
}

#[async_trait]
impl WalletDataProvider for HeliusClient {
    async fn balances(&self, address: &str) -> Result<WalletBalances> {
        Chain::Solana.validate_address(address)?;

        let response: BalancesResponse = self
            .get_json(&format!("/v0/addresses/{}/balances", address), &[])
            .await?;

        Ok(WalletBalances {
            native_balance: response.native_balance as f64 / LAMPORTS_PER_SOL,
            token_count: response.tokens.iter().filter(|t| t.amount > 0).count() as u32,
        })
    }

    async fn transactions(&self, address: &str, limit: usize) -> Result<Vec<WalletTransaction>> {
        Chain::Solana.validate_address(address)?;

        let transactions = self.enhanced_transactions(address, limit, None).await?;
        Ok(transactions.into_iter().map(WalletTransaction::from).collect())
    }

    async fn funding_source(&self, address: &str) -> Result<FundingSource> {
        Chain::Solana.validate_address(address)?;

        let transfers = self
            .enhanced_transactions(address, FUNDING_SCAN_LIMIT, Some("TRANSFER"))
            .await?;
        Ok(earliest_funder(address, &transfers))
    }
}
