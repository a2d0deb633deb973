use std::collections::HashMap;

use async_trait::async_trait;

use crate::{
    chains::client::{MarketDataProvider, WalletDataProvider},
    models::{
        Chain, FundingSource, MarketSnapshot, Result, ScoutError, WalletBalances,
        WalletTransaction,
    },
};

/// In-memory market provider backed by fixture snapshots.
#[derive(Debug, Clone, Default)]
pub struct StaticMarketData {
    pub snapshots: Vec<MarketSnapshot>,
    pub trending: Vec<MarketSnapshot>,
    pub fail: bool,
}

impl StaticMarketData {
    pub fn new(snapshots: Vec<MarketSnapshot>) -> Self {
        Self {
            snapshots,
            ..Default::default()
        }
    }

    fn check(&self) -> Result<()> {
        if self.fail {
            return Err(ScoutError::rpc("mock", "market data unavailable"));
        }
        Ok(())
    }
}

#[async_trait]
impl MarketDataProvider for StaticMarketData {
    async fn search(&self, query: &str) -> Result<Vec<MarketSnapshot>> {
        self.check()?;
        let query = query.to_lowercase();
        Ok(self
            .snapshots
            .iter()
            .filter(|s| {
                s.base_token.symbol.to_lowercase().contains(&query)
                    || s.base_token.name.to_lowercase().contains(&query)
                    || s.base_token.address.eq_ignore_ascii_case(&query)
            })
            .cloned()
            .collect())
    }

    async fn by_contract_address(&self, chain: Chain, address: &str) -> Result<Vec<MarketSnapshot>> {
        self.check()?;
        Ok(self
            .snapshots
            .iter()
            .filter(|s| s.chain_id == chain.as_str() && s.base_token.address == address)
            .cloned()
            .collect())
    }

    async fn trending(&self) -> Result<Vec<MarketSnapshot>> {
        self.check()?;
        Ok(self.trending.clone())
    }
}

/// Fixture wallet history for one or more addresses, with per-lookup failure
/// switches.
#[derive(Debug, Clone, Default)]
pub struct StaticWalletData {
    pub balances: HashMap<String, WalletBalances>,
    pub transactions: HashMap<String, Vec<WalletTransaction>>,
    pub funding: HashMap<String, FundingSource>,
    pub fail_balances: bool,
    pub fail_transactions: bool,
    pub fail_funding: bool,
}

impl StaticWalletData {
    pub fn with_wallet(
        mut self,
        address: &str,
        balances: WalletBalances,
        transactions: Vec<WalletTransaction>,
        funding: FundingSource,
    ) -> Self {
        self.balances.insert(address.to_string(), balances);
        self.transactions.insert(address.to_string(), transactions);
        self.funding.insert(address.to_string(), funding);
        self
    }
}

#[async_trait]
impl WalletDataProvider for StaticWalletData {
    async fn balances(&self, address: &str) -> Result<WalletBalances> {
        if self.fail_balances {
            return Err(ScoutError::rpc("mock", "balance lookup failed"));
        }
        Ok(self.balances.get(address).copied().unwrap_or_default())
    }

    async fn transactions(&self, address: &str, limit: usize) -> Result<Vec<WalletTransaction>> {
        if self.fail_transactions {
            return Err(ScoutError::rpc("mock", "transaction lookup failed"));
        }
        Ok(self
            .transactions
            .get(address)
            .map(|txs| txs.iter().take(limit).cloned().collect())
            .unwrap_or_default())
    }

    async fn funding_source(&self, address: &str) -> Result<FundingSource> {
        if self.fail_funding {
            return Err(ScoutError::rpc("mock", "funding lookup failed"));
        }
        Ok(self
            .funding
            .get(address)
            .cloned()
            .unwrap_or(FundingSource::Unknown))
    }
}
