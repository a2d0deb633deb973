//! Free-text heuristics over sampled transactions.

use crate::models::WalletTransaction;

/// Transaction type tags that denote a token or mint creation.
pub const CREATION_TYPES: &[&str] = &["CREATE", "TOKEN_MINT", "INITIALIZE_MINT"];

pub const SWAP_TYPE: &str = "SWAP";

const CREATION_PHRASES: &[&str] = &["created", "initialize mint"];

const SALE_PHRASE: &str = "sold";

pub fn is_creation(tx: &WalletTransaction) -> bool {
    if CREATION_TYPES.iter().any(|t| tx.kind.eq_ignore_ascii_case(t)) {
        return true;
    }
    let description = tx.description.to_lowercase();
    CREATION_PHRASES.iter().any(|phrase| description.contains(phrase))
}

pub fn is_sale(tx: &WalletTransaction) -> bool {
    tx.kind.eq_ignore_ascii_case(SWAP_TYPE) && tx.description.to_lowercase().contains(SALE_PHRASE)
}
