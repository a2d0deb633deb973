pub mod client;
pub mod dexscreener;
pub mod helius;
pub mod mock;
pub mod resilience;

pub use client::{MarketDataProvider, ProviderClientConfig, WalletDataProvider};
pub use dexscreener::DexScreenerClient;
pub use helius::HeliusClient;
pub use resilience::{retry_with_backoff, RetryConfig};
