use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sentinel used wherever a funding source could not be resolved.
pub const UNKNOWN_FUNDING: &str = "UNKNOWN";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WalletFlag {
    WalletVerified,
    Institutional,
    NetPositive,
    SerialCreator,
    DumpAlert,
    MixerReject,
    Unknown,
}

impl WalletFlag {
    pub fn as_str(&self) -> &'static str {
        match self {
            WalletFlag::WalletVerified => "WALLET_VERIFIED",
            WalletFlag::Institutional => "INSTITUTIONAL",
            WalletFlag::NetPositive => "NET_POSITIVE",
            WalletFlag::SerialCreator => "SERIAL_CREATOR",
            WalletFlag::DumpAlert => "DUMP_ALERT",
            WalletFlag::MixerReject => "MIXER_REJECT",
            WalletFlag::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for WalletFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletFlagDetail {
    pub flag: WalletFlag,
    pub impact: i32,
    pub rationale: String,
}

impl WalletFlagDetail {
    pub fn new(flag: WalletFlag, impact: i32, rationale: impl Into<String>) -> Self {
        Self {
            flag,
            impact,
            rationale: rationale.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
            RiskLevel::Critical => "CRITICAL",
        }
    }

    pub fn summary(&self, address: &str, adjustment: i32) -> String {
        let short = shorten(address);
        match self {
            RiskLevel::Low => format!(
                "Deployer {} looks clean; wallet adjustment {:+}",
                short, adjustment
            ),
            RiskLevel::Medium => format!(
                "Deployer {} shows caution signals; wallet adjustment {:+}",
                short, adjustment
            ),
            RiskLevel::High => format!(
                "Deployer {} shows an active dump pattern; wallet adjustment {:+}",
                short, adjustment
            ),
            RiskLevel::Critical => format!(
                "Deployer {} was funded through a known mixer; automatic reject",
                short
            ),
        }
    }
}

fn shorten(address: &str) -> String {
    if address.len() <= 12 || !address.is_ascii() {
        return address.to_string();
    }
    format!("{}...{}", &address[..4], &address[address.len() - 4..])
}

/// Earliest wallet that sent native currency to the subject, if resolved.
///
/// Serializes as the bare address or the `UNKNOWN` sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum FundingSource {
    Known(String),
    Unknown,
}

impl FundingSource {
    pub fn address(&self) -> Option<&str> {
        match self {
            FundingSource::Known(address) => Some(address),
            FundingSource::Unknown => None,
        }
    }
}

impl From<String> for FundingSource {
    fn from(value: String) -> Self {
        if value.is_empty() || value == UNKNOWN_FUNDING {
            FundingSource::Unknown
        } else {
            FundingSource::Known(value)
        }
    }
}

impl From<FundingSource> for String {
    fn from(value: FundingSource) -> Self {
        match value {
            FundingSource::Known(address) => address,
            FundingSource::Unknown => UNKNOWN_FUNDING.to_string(),
        }
    }
}

impl std::fmt::Display for FundingSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.address().unwrap_or(UNKNOWN_FUNDING))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WalletBalances {
    /// Native balance in whole units (SOL, not lamports).
    pub native_balance: f64,
    pub token_count: u32,
}

/// One sampled transaction from the subject's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletTransaction {
    pub kind: String,
    pub timestamp: DateTime<Utc>,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletForensicsResult {
    pub address: String,
    pub chain: String,
    pub funding_source: FundingSource,
    pub native_balance: f64,
    pub token_count: u32,
    pub transaction_count: usize,
    pub flags: Vec<WalletFlagDetail>,
    pub score_adjustment: i32,
    pub risk_level: RiskLevel,
    pub summary: String,
}

impl WalletForensicsResult {
    pub fn has_flag(&self, flag: WalletFlag) -> bool {
        self.flags.iter().any(|f| f.flag == flag)
    }

    pub fn is_rejected(&self) -> bool {
        self.has_flag(WalletFlag::MixerReject)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_funding_source_serializes_flat() {
        let known = FundingSource::Known("Abc123".to_string());
        assert_eq!(serde_json::to_string(&known).unwrap(), "\"Abc123\"");
        assert_eq!(serde_json::to_string(&FundingSource::Unknown).unwrap(), "\"UNKNOWN\"");

        let parsed: FundingSource = serde_json::from_str("\"UNKNOWN\"").unwrap();
        assert_eq!(parsed, FundingSource::Unknown);
    }

    #[test]
    fn test_summary_shortens_address() {
        let summary = RiskLevel::Low.summary("7VXNe1r6nTqVw6TKyBzt1TNSSQqPqNcEYizv8TduLWpU", 3);
        assert!(summary.contains("7VXN...LWpU"));
        assert!(summary.contains("+3"));
    }

    #[test]
    fn test_flag_names() {
        assert_eq!(WalletFlag::MixerReject.to_string(), "MIXER_REJECT");
        assert_eq!(
            serde_json::to_string(&WalletFlag::SerialCreator).unwrap(),
            "\"SERIAL_CREATOR\""
        );
    }
}
