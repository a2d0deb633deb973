use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{
    chains::WalletDataProvider,
    forensics::engine::{ForensicsEngine, WalletEvidence},
    models::{Chain, FundingSource, Result, ScoutError, WalletForensicsResult},
};

/// What to do when the funding-source lookup fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FundingLookupPolicy {
    /// Fall back to `UNKNOWN` and keep going
    #[default]
    Degrade,
    /// Fail the whole analysis
    Strict,
}

/// Gathers wallet evidence from a provider and runs the rule engine over it.
pub struct WalletForensics {
    provider: Arc<dyn WalletDataProvider>,
    engine: ForensicsEngine,
    transaction_sample: usize,
    funding_policy: FundingLookupPolicy,
}

impl WalletForensics {
    pub fn new(
        provider: Arc<dyn WalletDataProvider>,
        engine: ForensicsEngine,
        transaction_sample: usize,
        funding_policy: FundingLookupPolicy,
    ) -> Self {
        Self {
            provider,
            engine,
            transaction_sample,
            funding_policy,
        }
    }

    /// Forensics for a wallet on `chain`. Only chains with a wallet data
    /// provider are accepted.
    pub async fn analyze_on(
        &self,
        chain: Chain,
        address: &str,
        now: DateTime<Utc>,
    ) -> Result<WalletForensicsResult> {
        if !chain.supports_wallet_forensics() {
            return Err(ScoutError::ChainNotSupported(format!(
                "wallet forensics is not available on {}",
                chain
            )));
        }
        self.analyze(address, now).await
    }

    /// Balance, history and funding lookups run concurrently. Balance and
    /// history failures abort; a funding failure follows the configured policy.
    pub async fn analyze(&self, address: &str, now: DateTime<Utc>) -> Result<WalletForensicsResult> {
        Chain::Solana.validate_address(address)?;
        info!("Running wallet forensics for {}", address);

        let (balances, transactions, funding) = tokio::join!(
            self.provider.balances(address),
            self.provider.transactions(address, self.transaction_sample),
            self.provider.funding_source(address),
        );

        let funding_source = match (funding, self.funding_policy) {
            (Ok(source), _) => source,
            (Err(e), FundingLookupPolicy::Degrade) => {
                warn!("Funding source lookup failed for {}: {}", address, e);
                FundingSource::Unknown
            }
            (Err(e), FundingLookupPolicy::Strict) => return Err(e),
        };

        let evidence = WalletEvidence {
            address: address.to_string(),
            chain: Chain::Solana.as_str().to_string(),
            funding_source,
            balances: balances?,
            transactions: transactions?,
        };

        let result = self.engine.evaluate(&evidence, now);
        info!(
            "Forensics for {}: {} flags, adjustment {:+}, risk {}",
            address,
            result.flags.len(),
            result.score_adjustment,
            result.risk_level.as_str()
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chains::client::MockWalletDataProvider;
    use crate::forensics::engine::AddressLists;
    use crate::models::{RiskLevel, WalletBalances, WalletFlag};

    const SUBJECT: &str = "7VXNe1r6nTqVw6TKyBzt1TNSSQqPqNcEYizv8TduLWpU";
    const MIXER: &str = "MixerAddr1111111111111111111111111111111111";

    fn forensics(mock: MockWalletDataProvider, policy: FundingLookupPolicy) -> WalletForensics {
        let engine = ForensicsEngine::new(AddressLists::new([MIXER], Vec::<&str>::new()));
        WalletForensics::new(Arc::new(mock), engine, 50, policy)
    }

    fn healthy_mock() -> MockWalletDataProvider {
        let mut mock = MockWalletDataProvider::new();
        mock.expect_balances().returning(|_| {
            Ok(WalletBalances {
                native_balance: 3.0,
                token_count: 2,
            })
        });
        mock.expect_transactions()
            .withf(|_, limit| *limit == 50)
            .returning(|_, _| Ok(vec![]));
        mock
    }

    #[tokio::test]
    async fn test_funding_failure_degrades_to_unknown() {
        let mut mock = healthy_mock();
        mock.expect_funding_source()
            .returning(|_| Err(ScoutError::rpc("test", "timeout")));

        let result = forensics(mock, FundingLookupPolicy::Degrade)
            .analyze(SUBJECT, Utc::now())
            .await
            .unwrap();

        assert_eq!(result.funding_source, FundingSource::Unknown);
        assert!(result.has_flag(WalletFlag::NetPositive));
        assert_eq!(result.risk_level, RiskLevel::Low);
    }

    #[tokio::test]
    async fn test_funding_failure_is_fatal_when_strict() {
        let mut mock = healthy_mock();
        mock.expect_funding_source()
            .returning(|_| Err(ScoutError::rpc("test", "timeout")));

        let result = forensics(mock, FundingLookupPolicy::Strict)
            .analyze(SUBJECT, Utc::now())
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_balance_failure_is_fatal() {
        let mut mock = MockWalletDataProvider::new();
        mock.expect_balances()
            .returning(|_| Err(ScoutError::rpc("test", "503")));
        mock.expect_transactions().returning(|_, _| Ok(vec![]));
        mock.expect_funding_source()
            .returning(|_| Ok(FundingSource::Unknown));

        let result = forensics(mock, FundingLookupPolicy::Degrade)
            .analyze(SUBJECT, Utc::now())
            .await;
        assert!(matches!(result, Err(ScoutError::Rpc { .. })));
    }

    #[tokio::test]
    async fn test_transaction_failure_is_fatal() {
        let mut mock = MockWalletDataProvider::new();
        mock.expect_balances().returning(|_| Ok(WalletBalances::default()));
        mock.expect_transactions()
            .returning(|_, _| Err(ScoutError::rpc("test", "503")));
        mock.expect_funding_source()
            .returning(|_| Ok(FundingSource::Unknown));

        let result = forensics(mock, FundingLookupPolicy::Degrade)
            .analyze(SUBJECT, Utc::now())
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_mixer_funding_is_critical() {
        let mut mock = healthy_mock();
        mock.expect_funding_source()
            .returning(|_| Ok(FundingSource::Known(MIXER.to_string())));

        let result = forensics(mock, FundingLookupPolicy::Degrade)
            .analyze(SUBJECT, Utc::now())
            .await
            .unwrap();
        assert_eq!(result.risk_level, RiskLevel::Critical);
        assert_eq!(result.score_adjustment, -100);
    }

    #[tokio::test]
    async fn test_invalid_address_rejected_before_lookup() {
        let mock = MockWalletDataProvider::new();
        let result = forensics(mock, FundingLookupPolicy::Degrade)
            .analyze("not-a-wallet", Utc::now())
            .await;
        assert!(matches!(result, Err(ScoutError::InvalidAddress(_))));
    }

    #[tokio::test]
    async fn test_unsupported_chain_rejected() {
        let mock = MockWalletDataProvider::new();
        let result = forensics(mock, FundingLookupPolicy::Degrade)
            .analyze_on(Chain::Ethereum, "0x1111111111111111111111111111111111111111", Utc::now())
            .await;
        assert!(matches!(result, Err(ScoutError::ChainNotSupported(_))));
    }

    #[tokio::test]
    async fn test_solana_chain_accepted() {
        let mut mock = healthy_mock();
        mock.expect_funding_source()
            .returning(|_| Ok(FundingSource::Unknown));

        let result = forensics(mock, FundingLookupPolicy::Degrade)
            .analyze_on(Chain::Solana, SUBJECT, Utc::now())
            .await
            .unwrap();
        assert_eq!(result.chain, "solana");
    }
}
