use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::config::rpc::ProviderEndpoints;
use crate::forensics::{AddressLists, FundingLookupPolicy};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub app: AppSettings,
    pub providers: ProviderEndpoints,
    pub forensics: ForensicsSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub name: String,
    pub version: String,
    pub log_level: String,
    pub environment: Environment,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ForensicsSettings {
    pub mixer_addresses: Vec<String>,
    pub institutional_addresses: Vec<String>,
    pub funding_lookup_policy: FundingLookupPolicy,
}

impl ForensicsSettings {
    pub fn address_lists(&self) -> AddressLists {
        AddressLists::new(
            self.mixer_addresses.iter().map(|a| a.trim().to_string()),
            self.institutional_addresses.iter().map(|a| a.trim().to_string()),
        )
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app: AppSettings {
                name: "Token Scout".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                log_level: "info".to_string(),
                environment: Environment::Development,
            },
            providers: ProviderEndpoints::default(),
            forensics: ForensicsSettings::default(),
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_dir("config")
    }

    /// Layers `default` and `local` from `dir` (both optional) and
    /// `TOKEN_SCOUT__*` env vars over the built-in defaults. A source that is
    /// present but malformed is an error.
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Result<Self, ConfigError> {
        let dir = dir.as_ref();
        let s = Config::builder()
            .add_source(Config::try_from(&Settings::default())?)
            .add_source(File::from(dir.join("default")).required(false))
            .add_source(File::from(dir.join("local")).required(false))
            .add_source(
                config::Environment::with_prefix("TOKEN_SCOUT")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("forensics.mixer_addresses")
                    .with_list_parse_key("forensics.institutional_addresses")
                    .try_parsing(true),
            )
            .build()?;

        s.try_deserialize()
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(Config::try_from(&Settings::default())?)
            .add_source(File::from(path.as_ref()))
            .build()?;

        s.try_deserialize()
    }

    pub fn validate(&self) -> Result<(), String> {
        let providers = &self.providers;
        if providers.timeout_seconds == 0 {
            return Err("Provider timeout must be greater than zero".to_string());
        }
        if providers.transaction_sample == 0 {
            return Err("Transaction sample size must be greater than zero".to_string());
        }
        if providers.trending_limit == 0 {
            return Err("Trending limit must be greater than zero".to_string());
        }

        let forensics = &self.forensics;
        if forensics
            .mixer_addresses
            .iter()
            .chain(forensics.institutional_addresses.iter())
            .any(|a| a.trim().is_empty())
        {
            return Err("Forensics address lists must not contain blank entries".to_string());
        }

        let mixers: HashSet<&str> = forensics.mixer_addresses.iter().map(|a| a.trim()).collect();
        if let Some(both) = forensics
            .institutional_addresses
            .iter()
            .find(|a| mixers.contains(a.trim()))
        {
            return Err(format!(
                "Address {} is listed as both mixer and institutional",
                both
            ));
        }

        Ok(())
    }
}
