use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};

use crate::{
    forensics::classifier,
    models::{
        FundingSource, RiskLevel, WalletBalances, WalletFlag, WalletFlagDetail,
        WalletForensicsResult, WalletTransaction,
    },
};

pub const MIXER_IMPACT: i32 = -100;
pub const INSTITUTIONAL_IMPACT: i32 = 8;
pub const SERIAL_CREATOR_IMPACT: i32 = -5;
pub const DUMP_IMPACT: i32 = -10;
pub const HEAVY_DUMP_IMPACT: i32 = -15;
pub const NET_POSITIVE_IMPACT: i32 = 2;
pub const VERIFIED_IMPACT: i32 = 3;

/// More creations than this marks a serial token launcher.
const SERIAL_CREATOR_THRESHOLD: usize = 5;
const DUMP_WINDOW_DAYS: i64 = 7;
const DUMP_PERCENT_THRESHOLD: f64 = 50.0;
const HEAVY_DUMP_PERCENT: f64 = 70.0;
const MIN_DUMP_SALES: usize = 3;
const NET_POSITIVE_MIN_BALANCE: f64 = 1.0;

/// Known mixer and institutional addresses, supplied at construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressLists {
    pub mixers: HashSet<String>,
    pub institutional: HashSet<String>,
}

impl AddressLists {
    pub fn new<M, I, S>(mixers: M, institutional: I) -> Self
    where
        M: IntoIterator<Item = S>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            mixers: mixers.into_iter().map(Into::into).collect(),
            institutional: institutional.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_mixer(&self, address: &str) -> bool {
        self.mixers.contains(address)
    }

    pub fn is_institutional(&self, address: &str) -> bool {
        self.institutional.contains(address)
    }
}

/// Everything the rule engine looks at for one subject wallet.
#[derive(Debug, Clone)]
pub struct WalletEvidence {
    pub address: String,
    pub chain: String,
    pub funding_source: FundingSource,
    pub balances: WalletBalances,
    pub transactions: Vec<WalletTransaction>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct DumpStats {
    sales: usize,
    recent: usize,
    percent: f64,
}

#[derive(Debug, Clone, Default)]
pub struct ForensicsEngine {
    lists: AddressLists,
}

impl ForensicsEngine {
    pub fn new(lists: AddressLists) -> Self {
        Self { lists }
    }

    pub fn address_lists(&self) -> &AddressLists {
        &self.lists
    }

    /// Applies the wallet rules in order. A mixer-funded wallet short-circuits
    /// with a single `MIXER_REJECT` flag.
    pub fn evaluate(&self, evidence: &WalletEvidence, now: DateTime<Utc>) -> WalletForensicsResult {
        let flags = self.collect_flags(evidence, now);
        let score_adjustment = flags.iter().map(|f| f.impact).sum();
        let risk_level = classify_risk(&flags);

        WalletForensicsResult {
            address: evidence.address.clone(),
            chain: evidence.chain.clone(),
            funding_source: evidence.funding_source.clone(),
            native_balance: evidence.balances.native_balance,
            token_count: evidence.balances.token_count,
            transaction_count: evidence.transactions.len(),
            summary: risk_level.summary(&evidence.address, score_adjustment),
            flags,
            score_adjustment,
            risk_level,
        }
    }

    fn collect_flags(&self, evidence: &WalletEvidence, now: DateTime<Utc>) -> Vec<WalletFlagDetail> {
        let funder = evidence.funding_source.address();

        if let Some(mixer) = funder.filter(|a| self.lists.is_mixer(a)) {
            return vec![WalletFlagDetail::new(
                WalletFlag::MixerReject,
                MIXER_IMPACT,
                format!("Funded by known mixer {}", mixer),
            )];
        }

        let mut flags = Vec::new();

        if funder.is_some_and(|a| self.lists.is_institutional(a))
            || self.lists.is_institutional(&evidence.address)
        {
            flags.push(WalletFlagDetail::new(
                WalletFlag::Institutional,
                INSTITUTIONAL_IMPACT,
                "Funded by or belonging to a known institutional wallet",
            ));
        }

        let creations = evidence
            .transactions
            .iter()
            .filter(|tx| classifier::is_creation(tx))
            .count();
        if creations > SERIAL_CREATOR_THRESHOLD {
            flags.push(WalletFlagDetail::new(
                WalletFlag::SerialCreator,
                SERIAL_CREATOR_IMPACT,
                format!("{} token creations in sampled history", creations),
            ));
        }

        let dump = dump_stats(&evidence.transactions, now);
        let dumping = dump.percent > DUMP_PERCENT_THRESHOLD && dump.sales >= MIN_DUMP_SALES;
        if dumping {
            let impact = if dump.percent > HEAVY_DUMP_PERCENT {
                HEAVY_DUMP_IMPACT
            } else {
                DUMP_IMPACT
            };
            flags.push(WalletFlagDetail::new(
                WalletFlag::DumpAlert,
                impact,
                format!(
                    "{}% of the last {} days' transactions are sells ({} of {})",
                    dump.percent.round() as i64,
                    DUMP_WINDOW_DAYS,
                    dump.sales,
                    dump.recent
                ),
            ));
        }

        if !dumping
            && evidence.balances.native_balance > NET_POSITIVE_MIN_BALANCE
            && evidence.balances.token_count > 0
        {
            flags.push(WalletFlagDetail::new(
                WalletFlag::NetPositive,
                NET_POSITIVE_IMPACT,
                format!(
                    "Holds {:.2} native and {} tokens",
                    evidence.balances.native_balance, evidence.balances.token_count
                ),
            ));
        }

        if flags.iter().all(|f| f.impact >= 0) {
            flags.push(WalletFlagDetail::new(
                WalletFlag::WalletVerified,
                VERIFIED_IMPACT,
                "No negative wallet signals found",
            ));
        }

        flags
    }
}

fn dump_stats(transactions: &[WalletTransaction], now: DateTime<Utc>) -> DumpStats {
    let cutoff = now - Duration::days(DUMP_WINDOW_DAYS);
    let recent: Vec<&WalletTransaction> = transactions
        .iter()
        .filter(|tx| tx.timestamp >= cutoff)
        .collect();
    let sales = recent.iter().filter(|tx| classifier::is_sale(tx)).count();
    let percent = if recent.is_empty() {
        0.0
    } else {
        sales as f64 / recent.len() as f64 * 100.0
    };

    DumpStats {
        sales,
        recent: recent.len(),
        percent,
    }
}

/// Risk precedence: mixer, then heavy dump, then any negative flag.
pub fn classify_risk(flags: &[WalletFlagDetail]) -> RiskLevel {
    if flags.iter().any(|f| f.flag == WalletFlag::MixerReject) {
        RiskLevel::Critical
    } else if flags
        .iter()
        .any(|f| f.flag == WalletFlag::DumpAlert && f.impact <= HEAVY_DUMP_IMPACT)
    {
        RiskLevel::High
    } else if flags.iter().any(|f| f.impact < 0) {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}
