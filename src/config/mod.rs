pub mod rpc;
pub mod settings;

pub use rpc::ProviderEndpoints;
pub use settings::{AppSettings, Environment, ForensicsSettings, Settings};
