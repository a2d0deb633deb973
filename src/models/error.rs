use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoutError {
    #[error("Invalid address format: {0}")]
    InvalidAddress(String),

    #[error("Request to {provider} failed: {message}")]
    Rpc { provider: String, message: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Chain not supported: {0}")]
    ChainNotSupported(String),
}

impl ScoutError {
    pub fn rpc(provider: &str, message: impl Into<String>) -> Self {
        ScoutError::Rpc {
            provider: provider.to_string(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScoutError>;
