use serde::{Deserialize, Serialize};

/// Percentage weight of each factor. A factor's top tier awards exactly its weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub liquidity: u32,
    pub market_cap: u32,
    pub volume: u32,
    pub social: u32,
    pub age: u32,
    pub team: u32,
}

pub const WEIGHTS: ScoringWeights = ScoringWeights {
    liquidity: 25,
    market_cap: 20,
    volume: 20,
    social: 15,
    age: 10,
    team: 10,
};

impl Default for ScoringWeights {
    fn default() -> Self {
        WEIGHTS
    }
}

impl ScoringWeights {
    pub fn total(&self) -> u32 {
        self.liquidity + self.market_cap + self.volume + self.social + self.age + self.team
    }

    pub fn validate(&self) -> Result<(), String> {
        let total = self.total();
        if total != 100 {
            return Err(format!("Weights must sum to 100, got {}", total));
        }
        Ok(())
    }
}
