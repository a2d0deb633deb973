//! DexScreener market data adapter.
//!
//! Endpoints used:
//! - `/latest/dex/search?q={query}`
//! - `/tokens/v1/{chain}/{address}`
//! - `/token-boosts/top/v1`

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::future::join_all;
use serde::{de::DeserializeOwned, Deserialize};
use tracing::{debug, warn};

use crate::{
    chains::{
        client::{MarketDataProvider, ProviderClientConfig},
        resilience::{retry_with_backoff, RetryConfig},
    },
    models::{
        Chain, MarketSnapshot, Result, ScoutError, SocialPresence, TokenIdentity, TxnCounts,
        Windowed,
    },
};

const PROVIDER: &str = "dexscreener";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DexPair {
    #[serde(default)]
    chain_id: String,
    #[serde(default)]
    dex_id: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    pair_address: String,
    base_token: Option<DexToken>,
    quote_token: Option<DexToken>,
    price_usd: Option<String>,
    txns: Option<DexWindows<Option<DexTxns>>>,
    volume: Option<DexWindows<Option<f64>>>,
    price_change: Option<DexWindows<Option<f64>>>,
    liquidity: Option<DexLiquidity>,
    fdv: Option<f64>,
    market_cap: Option<f64>,
    pair_created_at: Option<i64>,
    info: Option<DexInfo>,
}

#[derive(Debug, Default, Deserialize)]
struct DexToken {
    #[serde(default)]
    address: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    symbol: String,
}

#[derive(Debug, Default, Deserialize)]
struct DexWindows<T> {
    #[serde(default)]
    m5: T,
    #[serde(default)]
    h1: T,
    #[serde(default)]
    h6: T,
    #[serde(default)]
    h24: T,
}

#[derive(Debug, Default, Clone, Copy, Deserialize)]
struct DexTxns {
    buys: Option<u64>,
    sells: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct DexLiquidity {
    usd: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct DexInfo {
    websites: Option<Vec<serde_json::Value>>,
    socials: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    pairs: Option<Vec<DexPair>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenBoost {
    chain_id: String,
    token_address: String,
}

impl DexWindows<Option<f64>> {
    fn normalize(&self) -> Windowed<f64> {
        Windowed {
            m5: self.m5.unwrap_or(0.0),
            h1: self.h1.unwrap_or(0.0),
            h6: self.h6.unwrap_or(0.0),
            h24: self.h24.unwrap_or(0.0),
        }
    }
}

impl DexWindows<Option<DexTxns>> {
    fn normalize(&self) -> Windowed<TxnCounts> {
        let counts = |t: Option<DexTxns>| {
            let t = t.unwrap_or_default();
            TxnCounts {
                buys: t.buys.unwrap_or(0),
                sells: t.sells.unwrap_or(0),
            }
        };
        Windowed {
            m5: counts(self.m5),
            h1: counts(self.h1),
            h6: counts(self.h6),
            h24: counts(self.h24),
        }
    }
}

impl From<DexToken> for TokenIdentity {
    fn from(token: DexToken) -> Self {
        TokenIdentity {
            address: token.address,
            name: token.name,
            symbol: token.symbol,
        }
    }
}

impl From<DexPair> for MarketSnapshot {
    fn from(pair: DexPair) -> Self {
        let social = pair
            .info
            .as_ref()
            .map(|info| SocialPresence {
                websites: info.websites.as_ref().map_or(0, |w| w.len() as u32),
                socials: info.socials.as_ref().map_or(0, |s| s.len() as u32),
            })
            .unwrap_or_default();

        MarketSnapshot {
            chain_id: pair.chain_id,
            dex_id: pair.dex_id,
            pair_address: pair.pair_address,
            url: pair.url,
            base_token: pair.base_token.unwrap_or_default().into(),
            quote_token: pair.quote_token.unwrap_or_default().into(),
            price_usd: pair
                .price_usd
                .as_deref()
                .and_then(|p| p.parse().ok())
                .unwrap_or(0.0),
            liquidity_usd: pair.liquidity.and_then(|l| l.usd).unwrap_or(0.0),
            market_cap_usd: pair.market_cap.or(pair.fdv).unwrap_or(0.0),
            volume: pair.volume.map(|v| v.normalize()).unwrap_or_default(),
            price_change: pair.price_change.map(|p| p.normalize()).unwrap_or_default(),
            txns: pair.txns.map(|t| t.normalize()).unwrap_or_default(),
            pair_created_at: pair.pair_created_at.and_then(|ms| {
                DateTime::<Utc>::from_timestamp(
                    ms.div_euclid(1000),
                    (ms.rem_euclid(1000) * 1_000_000) as u32,
                )
            }),
            social,
        }
    }
}

pub struct DexScreenerClient {
    http_client: reqwest::Client,
    base_url: String,
    retry: RetryConfig,
    trending_limit: usize,
}

impl DexScreenerClient {
    pub fn new(config: ProviderClientConfig, trending_limit: usize) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| ScoutError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            retry: RetryConfig::with_retries(config.max_retries),
            trending_limit,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let url = url.as_str();
        retry_with_backoff(&self.retry, path, || self.fetch(url, query)).await
    }

    fn request(&self, url: &str, query: &[(&str, &str)]) -> reqwest::RequestBuilder {
        self.http_client.get(url).query(query)
    }

    async fn fetch<T: DeserializeOwned>(&self, url: &str, query: &[(&str, &str)]) -> Result<T> {
        debug!("GET {} {:?}", url, query);
        let response = self.request(url, query).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScoutError::rpc(PROVIDER, format!("HTTP {} for {}", status, url)));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn pairs_for_token(&self, chain_id: &str, address: &str) -> Result<Vec<MarketSnapshot>> {
        let pairs: Vec<DexPair> = self
            .get_json(&format!("/tokens/v1/{}/{}", chain_id, address), &[])
            .await?;
        Ok(pairs.into_iter().map(MarketSnapshot::from).collect())
    }
}

#[async_trait]
impl MarketDataProvider for DexScreenerClient {
    async fn search(&self, query: &str) -> Result<Vec<MarketSnapshot>> {
        let response: SearchResponse = self
            .get_json("/latest/dex/search", &[("q", query.trim())])
            .await?;
        Ok(response
            .pairs
            .unwrap_or_default()
            .into_iter()
            .map(MarketSnapshot::from)
            .collect())
    }

    async fn by_contract_address(&self, chain: Chain, address: &str) -> Result<Vec<MarketSnapshot>> {
        chain.validate_address(address)?;
        self.pairs_for_token(chain.as_str(), address).await
    }

    async fn trending(&self) -> Result<Vec<MarketSnapshot>> {
        let boosts: Vec<TokenBoost> = self.get_json("/token-boosts/top/v1", &[]).await?;

        let mut seen = HashSet::new();
        let tokens: Vec<TokenBoost> = boosts
            .into_iter()
            .filter(|b| seen.insert((b.chain_id.clone(), b.token_address.clone())))
            .take(self.trending_limit)
            .collect();

        let lookups = tokens
            .iter()
            .map(|t| self.pairs_for_token(&t.chain_id, &t.token_address));
        let results = join_all(lookups).await;

        let mut snapshots = Vec::new();
        for (token, result) in tokens.iter().zip(results) {
            match result {
                Ok(pairs) => snapshots.extend(MarketSnapshot::deepest(pairs)),
                Err(e) => warn!(
                    "Skipping trending token {} on {}: {}",
                    token.token_address, token.chain_id, e
                ),
            }
        }

        Ok(snapshots)
    }
}
