use crate::{
    models::{Action, CatalystAdjustment, TokenScore, WalletForensicsResult},
    scoring::algorithm::clamp_score,
};

pub const WALLET_CATALYST_PREFIX: &str = "Wallet";

pub const MIXER_REJECTION: &str =
    "Rejected: deployer wallet was funded through a known mixer";

/// Folds a forensics result into a previously computed score and returns the
/// adjusted copy. The input score is left untouched.
///
/// A `MIXER_REJECT` flag forces a zero score and `SKIP` regardless of every
/// other value.
pub fn apply_wallet_adjustment(score: &TokenScore, forensics: &WalletForensicsResult) -> TokenScore {
    let mut adjusted = score.clone();

    adjusted
        .catalysts
        .extend(forensics.flags.iter().map(|detail| CatalystAdjustment {
            name: format!("{}: {}", WALLET_CATALYST_PREFIX, detail.flag),
            points: detail.impact,
            rationale: detail.rationale.clone(),
        }));

    if forensics.is_rejected() {
        adjusted.total_score = 0;
        adjusted.action = Action::Skip;
        adjusted.recommendation = MIXER_REJECTION.to_string();
        return adjusted;
    }

    adjusted.total_score =
        clamp_score(score.total_score as i64 + forensics.score_adjustment as i64);
    adjusted.action = Action::from_score(adjusted.total_score);
    adjusted.recommendation = adjusted.action.recommendation().to_string();
    adjusted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        FundingSource, MarketSnapshot, RiskLevel, WalletFlag, WalletFlagDetail,
    };
    use crate::scoring::ScoringAlgorithm;
    use chrono::Utc;

    fn forensics(flags: Vec<WalletFlagDetail>, risk_level: RiskLevel) -> WalletForensicsResult {
        let score_adjustment = flags.iter().map(|f| f.impact).sum();
        WalletForensicsResult {
            address: "subject".to_string(),
            chain: "solana".to_string(),
            funding_source: FundingSource::Unknown,
            native_balance: 0.0,
            token_count: 0,
            transaction_count: 0,
            flags,
            score_adjustment,
            risk_level,
            summary: String::new(),
        }
    }

    fn base_score(total: u32) -> TokenScore {
        let mut score = ScoringAlgorithm::new().calculate_score(&MarketSnapshot::default(), Utc::now());
        score.total_score = total;
        score.action = Action::from_score(total);
        score
    }

    #[test]
    fn test_adjustment_appends_wallet_entries() {
        let base = base_score(72);
        let result = forensics(
            vec![
                WalletFlagDetail::new(WalletFlag::SerialCreator, -5, "8 creations"),
                WalletFlagDetail::new(WalletFlag::NetPositive, 2, "holds tokens"),
            ],
            RiskLevel::Medium,
        );

        let adjusted = apply_wallet_adjustment(&base, &result);
        assert_eq!(adjusted.total_score, 69);
        assert_eq!(adjusted.action, Action::Watch);
        assert_eq!(adjusted.catalysts.len(), base.catalysts.len() + 2);
        assert_eq!(adjusted.catalysts[base.catalysts.len()].name, "Wallet: SERIAL_CREATOR");
        // the base value is not mutated
        assert_eq!(base.total_score, 72);
    }

    #[test]
    fn test_adjustment_clamps() {
        let result = forensics(
            vec![
                WalletFlagDetail::new(WalletFlag::Institutional, 8, "exchange funded"),
                WalletFlagDetail::new(WalletFlag::WalletVerified, 3, "clean"),
            ],
            RiskLevel::Low,
        );
        let adjusted = apply_wallet_adjustment(&base_score(97), &result);
        assert_eq!(adjusted.total_score, 100);
        assert_eq!(adjusted.action, Action::Hot);
    }

    #[test]
    fn test_mixer_overrides_everything() {
        let mut result = forensics(
            vec![WalletFlagDetail::new(WalletFlag::MixerReject, -100, "mixer")],
            RiskLevel::Critical,
        );
        // even a contradictory positive adjustment cannot rescue it
        result.score_adjustment = 50;

        let adjusted = apply_wallet_adjustment(&base_score(100), &result);
        assert_eq!(adjusted.total_score, 0);
        assert_eq!(adjusted.action, Action::Skip);
        assert_eq!(adjusted.recommendation, MIXER_REJECTION);
    }
}
