use serde::{Deserialize, Serialize};

/// Chains the market data provider indexes under a stable id.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Chain {
    Solana,
    Ethereum,
    Base,
    Bsc,
    Arbitrum,
}

impl Chain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Chain::Solana => "solana",
            Chain::Ethereum => "ethereum",
            Chain::Base => "base",
            Chain::Bsc => "bsc",
            Chain::Arbitrum => "arbitrum",
        }
    }

    pub fn from_id(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "solana" | "sol" => Some(Chain::Solana),
            "ethereum" | "eth" => Some(Chain::Ethereum),
            "base" => Some(Chain::Base),
            "bsc" | "bnb" => Some(Chain::Bsc),
            "arbitrum" | "arb" => Some(Chain::Arbitrum),
            _ => None,
        }
    }

    /// Wallet history is only indexed for Solana deployers.
    pub fn supports_wallet_forensics(&self) -> bool {
        matches!(self, Chain::Solana)
    }

    pub fn is_evm(&self) -> bool {
        matches!(self, Chain::Ethereum | Chain::Base | Chain::Bsc | Chain::Arbitrum)
    }

    /// Checks that `address` is plausible for this chain before any request is made.
    pub fn validate_address(&self, address: &str) -> crate::models::Result<()> {
        use crate::models::ScoutError;

        if self.is_evm() {
            let hex = address
                .strip_prefix("0x")
                .ok_or_else(|| ScoutError::InvalidAddress(format!("Missing 0x prefix: {}", address)))?;
            if hex.len() != 40 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(ScoutError::InvalidAddress(format!("Invalid EVM address: {}", address)));
            }
            return Ok(());
        }

        if address.len() < 32 || address.len() > 44 {
            return Err(ScoutError::InvalidAddress(format!(
                "Invalid Solana address length: {}",
                address
            )));
        }

        bs58::decode(address)
            .into_vec()
            .map_err(|_| ScoutError::InvalidAddress(format!("Invalid base58 in address: {}", address)))?;

        Ok(())
    }
}

impl std::fmt::Display for Chain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
