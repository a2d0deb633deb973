use serde::{Deserialize, Serialize};

use crate::chains::ProviderClientConfig;

/// Remote data providers feeding the scoring core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderEndpoints {
    pub dexscreener_url: String,
    pub helius_url: String,
    pub helius_api_key: Option<String>,
    pub timeout_seconds: u64,
    pub max_retries: u32,
    /// Boosted tokens scored by the trending command
    pub trending_limit: usize,
    /// Transactions sampled per forensics run
    pub transaction_sample: usize,
}

impl Default for ProviderEndpoints {
    fn default() -> Self {
        Self {
            dexscreener_url: "https://api.dexscreener.com".to_string(),
            helius_url: "https://api.helius.xyz".to_string(),
            helius_api_key: None,
            timeout_seconds: 15,
            max_retries: 2,
            trending_limit: 10,
            transaction_sample: 100,
        }
    }
}

impl ProviderEndpoints {
    pub fn dexscreener_config(&self) -> ProviderClientConfig {
        ProviderClientConfig {
            base_url: self.dexscreener_url.clone(),
            api_key: None,
            timeout_seconds: self.timeout_seconds,
            max_retries: self.max_retries,
        }
    }

    pub fn helius_config(&self) -> ProviderClientConfig {
        ProviderClientConfig {
            base_url: self.helius_url.clone(),
            api_key: self.helius_api_key.clone(),
            timeout_seconds: self.timeout_seconds,
            max_retries: self.max_retries,
        }
    }

    pub fn has_wallet_provider(&self) -> bool {
        self.helius_api_key
            .as_deref()
            .is_some_and(|k| !k.trim().is_empty())
    }
}
