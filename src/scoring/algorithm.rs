use chrono::{DateTime, Utc};

use crate::{
    models::{Action, MarketSnapshot, TokenScore, MAX_SCORE},
    scoring::{catalysts, factors},
};

/// Clamps a raw signed total into `0..=MAX_SCORE`.
pub fn clamp_score(raw: i64) -> u32 {
    raw.clamp(0, MAX_SCORE as i64) as u32
}

/// Composite aggregator: six factor scores plus catalyst deltas.
#[derive(Debug, Clone, Default)]
pub struct ScoringAlgorithm;

impl ScoringAlgorithm {
    pub fn new() -> Self {
        Self
    }

    /// Scores one snapshot. `now` drives the age factor and is stamped on the
    /// result, so identical inputs yield identical scores.
    pub fn calculate_score(&self, snapshot: &MarketSnapshot, now: DateTime<Utc>) -> TokenScore {
        let breakdown = factors::score_factors(snapshot, now);
        let catalysts = catalysts::detect(snapshot);

        let factor_total: i64 = breakdown.iter().map(|b| b.score as i64).sum();
        let catalyst_total: i64 = catalysts.iter().map(|c| c.points as i64).sum();
        let total_score = clamp_score(factor_total + catalyst_total);
        let action = Action::from_score(total_score);

        TokenScore {
            token_address: snapshot.base_token.address.clone(),
            token_name: snapshot.base_token.name.clone(),
            token_symbol: snapshot.base_token.symbol.clone(),
            chain_id: snapshot.chain_id.clone(),
            dex_id: snapshot.dex_id.clone(),
            pair_address: snapshot.pair_address.clone(),
            pair_url: snapshot.url.clone(),
            price_usd: snapshot.price_usd,
            total_score,
            max_score: MAX_SCORE,
            action,
            breakdown,
            catalysts,
            recommendation: action.recommendation().to_string(),
            scored_at: now,
        }
    }
}
