use crate::{
    chains::MarketDataProvider,
    forensics::WalletForensics,
    models::{Chain, MarketSnapshot, Result, TokenScore, WalletForensicsResult},
    scoring::{adjustment::apply_wallet_adjustment, ScoringAlgorithm},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Full evaluation of one token: market score, deployer forensics and the
/// merged result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evaluation {
    pub base: TokenScore,
    pub forensics: Option<WalletForensicsResult>,
    pub adjusted: TokenScore,
}

pub struct TokenEvaluator {
    market: Arc<dyn MarketDataProvider>,
    forensics: Option<WalletForensics>,
    algorithm: ScoringAlgorithm,
}

impl TokenEvaluator {
    pub fn new(market: Arc<dyn MarketDataProvider>, forensics: Option<WalletForensics>) -> Self {
        Self {
            market,
            forensics,
            algorithm: ScoringAlgorithm::new(),
        }
    }

    /// Scores the deepest pair for a token. `Ok(None)` means no pairs exist.
    pub async fn score_contract(
        &self,
        chain: Chain,
        address: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<TokenScore>> {
        let pairs = self.market.by_contract_address(chain, address).await?;
        let Some(snapshot) = MarketSnapshot::deepest(pairs) else {
            info!("No trading pairs found for {} on {}", address, chain);
            return Ok(None);
        };

        let score = self.algorithm.calculate_score(&snapshot, now);
        info!(
            "Scored {} ({}): {}/{} {}",
            score.token_symbol,
            address,
            score.total_score,
            score.max_score,
            score.action.as_str()
        );
        Ok(Some(score))
    }

    pub async fn score_search(&self, query: &str, now: DateTime<Utc>) -> Result<Vec<TokenScore>> {
        let pairs = self.market.search(query).await?;
        info!("Search '{}' returned {} pairs", query, pairs.len());
        Ok(self.rank(&pairs, now))
    }

    pub async fn score_trending(&self, now: DateTime<Utc>) -> Result<Vec<TokenScore>> {
        let pairs = self.market.trending().await?;
        info!("Scoring {} trending tokens", pairs.len());
        Ok(self.rank(&pairs, now))
    }

    /// Scores the token and, when wallet data is available for the chain,
    /// folds in forensics on the deployer. The deployer defaults to the token
    /// address.
    pub async fn evaluate(
        &self,
        chain: Chain,
        address: &str,
        deployer: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Option<Evaluation>> {
        let Some(base) = self.score_contract(chain, address, now).await? else {
            return Ok(None);
        };

        let forensics = match &self.forensics {
            Some(analyzer) if chain.supports_wallet_forensics() => {
                let subject = deployer.unwrap_or(address);
                Some(analyzer.analyze(subject, now).await?)
            }
            _ => {
                info!("Wallet forensics unavailable for {}; using market score only", chain);
                None
            }
        };

        let adjusted = match &forensics {
            Some(result) => apply_wallet_adjustment(&base, result),
            None => base.clone(),
        };

        Ok(Some(Evaluation {
            base,
            forensics,
            adjusted,
        }))
    }

    fn rank(&self, pairs: &[MarketSnapshot], now: DateTime<Utc>) -> Vec<TokenScore> {
        let mut scores: Vec<TokenScore> = pairs
            .iter()
            .map(|snapshot| self.algorithm.calculate_score(snapshot, now))
            .collect();
        scores.sort_by(|a, b| b.total_score.cmp(&a.total_score));
        scores
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chains::client::MockMarketDataProvider;
    use crate::models::{Action, TokenIdentity};

    fn pair(symbol: &str, liquidity: f64) -> MarketSnapshot {
        MarketSnapshot {
            chain_id: "solana".to_string(),
            base_token: TokenIdentity {
                address: format!("{}Mint", symbol),
                name: symbol.to_string(),
                symbol: symbol.to_string(),
            },
            liquidity_usd: liquidity,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_no_pairs_is_not_an_error() {
        let mut market = MockMarketDataProvider::new();
        market
            .expect_by_contract_address()
            .returning(|_, _| Ok(vec![]));

        let evaluator = TokenEvaluator::new(Arc::new(market), None);
        let result = evaluator
            .evaluate(Chain::Solana, "missing", None, Utc::now())
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_search_results_ranked_by_score() {
        let mut market = MockMarketDataProvider::new();
        market
            .expect_search()
            .returning(|_| Ok(vec![pair("LOW", 1_000.0), pair("HIGH", 900_000.0)]));

        let evaluator = TokenEvaluator::new(Arc::new(market), None);
        let scores = evaluator.score_search("x", Utc::now()).await.unwrap();
        assert_eq!(scores[0].token_symbol, "HIGH");
        assert!(scores[0].total_score > scores[1].total_score);
    }

    #[tokio::test]
    async fn test_without_forensics_adjusted_equals_base() {
        let mut market = MockMarketDataProvider::new();
        market
            .expect_by_contract_address()
            .returning(|_, _| Ok(vec![pair("ABC", 10_000.0), pair("ABC", 300_000.0)]));

        let evaluator = TokenEvaluator::new(Arc::new(market), None);
        let evaluation = evaluator
            .evaluate(Chain::Solana, "ABCMint", None, Utc::now())
            .await
            .unwrap()
            .unwrap();

        // deepest pair is scored
        assert_eq!(evaluation.base.breakdown[0].score, 20);
        assert!(evaluation.forensics.is_none());
        assert_eq!(evaluation.adjusted, evaluation.base);
        assert_eq!(evaluation.base.action, Action::Skip);
    }

    #[tokio::test]
    async fn test_market_failure_propagates() {
        let mut market = MockMarketDataProvider::new();
        market
            .expect_trending()
            .returning(|| Err(crate::models::ScoutError::rpc("test", "down")));

        let evaluator = TokenEvaluator::new(Arc::new(market), None);
        assert!(evaluator.score_trending(Utc::now()).await.is_err());
    }
}
