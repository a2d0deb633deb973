pub mod adjustment;
pub mod algorithm;
pub mod calculator;
pub mod catalysts;
pub mod factors;
pub mod weights;

pub use adjustment::apply_wallet_adjustment;
pub use algorithm::ScoringAlgorithm;
pub use calculator::{Evaluation, TokenEvaluator};
pub use weights::{ScoringWeights, WEIGHTS};
