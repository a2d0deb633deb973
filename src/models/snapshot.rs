use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Base or quote side of a trading pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenIdentity {
    pub address: String,
    pub name: String,
    pub symbol: String,
}

/// A metric bucketed over the provider's rolling windows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Windowed<T> {
    pub m5: T,
    pub h1: T,
    pub h6: T,
    pub h24: T,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxnCounts {
    pub buys: u64,
    pub sells: u64,
}

/// Web footprint declared for the token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialPresence {
    pub websites: u32,
    pub socials: u32,
}

impl SocialPresence {
    pub fn total_links(&self) -> u32 {
        self.websites + self.socials
    }
}

/// Normalized view of one trading pair at evaluation time.
///
/// Adapters fill absent numeric fields with zero, so scoring never sees a
/// missing value. Market cap already carries the FDV fallback.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub chain_id: String,
    pub dex_id: String,
    pub pair_address: String,
    pub url: String,
    pub base_token: TokenIdentity,
    pub quote_token: TokenIdentity,
    pub price_usd: f64,
    pub liquidity_usd: f64,
    pub market_cap_usd: f64,
    pub volume: Windowed<f64>,
    pub price_change: Windowed<f64>,
    pub txns: Windowed<TxnCounts>,
    pub pair_created_at: Option<DateTime<Utc>>,
    pub social: SocialPresence,
}

impl MarketSnapshot {
    /// Whole days since the pair was created, `None` when the creation time is
    /// unknown or lies in the future.
    pub fn age_days(&self, now: DateTime<Utc>) -> Option<i64> {
        let created = self.pair_created_at?;
        let days = now.signed_duration_since(created).num_days();
        (days >= 0).then_some(days)
    }

    /// The pair with the most liquidity, used as the token's reference market.
    pub fn deepest(pairs: impl IntoIterator<Item = MarketSnapshot>) -> Option<MarketSnapshot> {
        pairs
            .into_iter()
            .max_by(|a, b| a.liquidity_usd.total_cmp(&b.liquidity_usd))
    }
}
