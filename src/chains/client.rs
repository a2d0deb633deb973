use async_trait::async_trait;

use crate::models::{
    Chain, FundingSource, MarketSnapshot, Result, WalletBalances, WalletTransaction,
};

/// Source of normalized trading-pair snapshots.
///
/// An empty vec means nothing was found; `Err` means the lookup itself failed.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Free-text search over pairs (symbol, name or address)
    async fn search(&self, query: &str) -> Result<Vec<MarketSnapshot>>;

    /// All pairs trading the token at `address` on `chain`
    async fn by_contract_address(&self, chain: Chain, address: &str) -> Result<Vec<MarketSnapshot>>;

    /// One snapshot per currently promoted token
    async fn trending(&self) -> Result<Vec<MarketSnapshot>>;
}

/// Source of on-chain wallet history for forensics.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WalletDataProvider: Send + Sync {
    async fn balances(&self, address: &str) -> Result<WalletBalances>;

    /// Most recent transactions, newest first, at most `limit` of them
    async fn transactions(&self, address: &str, limit: usize) -> Result<Vec<WalletTransaction>>;

    /// Earliest wallet observed sending native currency to `address`
    async fn funding_source(&self, address: &str) -> Result<FundingSource>;
}

/// Connection settings shared by the HTTP adapters.
#[derive(Debug, Clone)]
pub struct ProviderClientConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout_seconds: u64,
    pub max_retries: u32,
}
