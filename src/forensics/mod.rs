pub mod analyzer;
pub mod classifier;
pub mod engine;

pub use analyzer::{FundingLookupPolicy, WalletForensics};
pub use engine::{AddressLists, ForensicsEngine, WalletEvidence};
