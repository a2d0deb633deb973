use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Ceiling of every composite score.
pub const MAX_SCORE: u32 = 100;

/// Outreach tier derived from the final clamped score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    Hot,
    Qualified,
    Watch,
    Skip,
}

impl Action {
    pub fn from_score(score: u32) -> Self {
        match score {
            s if s >= 85 => Action::Hot,
            s if s >= 70 => Action::Qualified,
            s if s >= 50 => Action::Watch,
            _ => Action::Skip,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Hot => "HOT",
            Action::Qualified => "QUALIFIED",
            Action::Watch => "WATCH",
            Action::Skip => "SKIP",
        }
    }

    pub fn recommendation(&self) -> &'static str {
        match self {
            Action::Hot => "Priority outreach: contact the team now and fast-track a listing review",
            Action::Qualified => "Qualified lead: schedule outreach and prepare a listing proposal",
            Action::Watch => "Watchlist: track metrics and revisit once traction improves",
            Action::Skip => "Skip: fundamentals do not justify outreach at this time",
        }
    }
}

/// Score awarded for one weighted factor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub category: String,
    pub weight: u32,
    pub score: u32,
    pub max_score: u32,
    pub value: String,
    pub rationale: String,
}

/// Signed point delta applied on top of the factor subtotal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalystAdjustment {
    pub name: String,
    pub points: i32,
    pub rationale: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenScore {
    pub token_address: String,
    pub token_name: String,
    pub token_symbol: String,
    pub chain_id: String,
    pub dex_id: String,
    pub pair_address: String,
    pub pair_url: String,
    pub price_usd: f64,
    pub total_score: u32,
    pub max_score: u32,
    pub action: Action,
    pub breakdown: Vec<ScoreBreakdown>,
    pub catalysts: Vec<CatalystAdjustment>,
    pub recommendation: String,
    pub scored_at: DateTime<Utc>,
}

impl TokenScore {
    pub fn factor_subtotal(&self) -> u32 {
        self.breakdown.iter().map(|b| b.score).sum()
    }

    pub fn catalyst_total(&self) -> i32 {
        self.catalysts.iter().map(|c| c.points).sum()
    }
}
