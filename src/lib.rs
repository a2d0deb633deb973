pub mod chains;
pub mod config;
pub mod forensics;
pub mod models;
pub mod scoring;

pub use config::Settings;
pub use forensics::{AddressLists, ForensicsEngine, WalletForensics};
pub use models::{Action, MarketSnapshot, RiskLevel, ScoutError, TokenScore, WalletForensicsResult, Result};
pub use scoring::{apply_wallet_adjustment, ScoringAlgorithm, TokenEvaluator};
