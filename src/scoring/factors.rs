//! Tiered scorers for the six weighted factors.
//!
//! Each table is ordered highest threshold first and ends with a catch-all
//! tier, so every input lands somewhere and no scorer can fail.

use chrono::{DateTime, Utc};

use crate::models::{MarketSnapshot, ScoreBreakdown};
use crate::scoring::weights::WEIGHTS;

#[derive(Debug, Clone, Copy)]
enum Bound {
    AtLeast(f64),
    Above(f64),
    Otherwise,
}

impl Bound {
    fn admits(&self, metric: f64) -> bool {
        match *self {
            Bound::AtLeast(threshold) => metric >= threshold,
            Bound::Above(threshold) => metric > threshold,
            Bound::Otherwise => true,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Tier {
    bound: Bound,
    score: u32,
    rationale: &'static str,
}

const fn tier(bound: Bound, score: u32, rationale: &'static str) -> Tier {
    Tier { bound, score, rationale }
}

const LIQUIDITY_TIERS: [Tier; 5] = [
    tier(Bound::AtLeast(500_000.0), 25, "Deep liquidity supports large orders with minimal slippage"),
    tier(Bound::AtLeast(200_000.0), 20, "Strong liquidity for a listing candidate"),
    tier(Bound::AtLeast(100_000.0), 15, "Moderate liquidity"),
    tier(Bound::AtLeast(50_000.0), 10, "Thin liquidity, slippage on mid-size orders"),
    tier(Bound::Otherwise, 5, "Very low liquidity, high slippage risk"),
];

const MARKET_CAP_TIERS: [Tier; 5] = [
    tier(Bound::AtLeast(10_000_000.0), 20, "Established market cap"),
    tier(Bound::AtLeast(1_000_000.0), 16, "Healthy market cap with room to grow"),
    tier(Bound::AtLeast(500_000.0), 12, "Small cap"),
    tier(Bound::AtLeast(100_000.0), 8, "Micro cap"),
    tier(Bound::Otherwise, 4, "Nano cap, highly speculative"),
];

const VOLUME_TIERS: [Tier; 5] = [
    tier(Bound::AtLeast(1_000_000.0), 20, "Heavy 24h trading activity"),
    tier(Bound::AtLeast(500_000.0), 16, "Strong 24h trading activity"),
    tier(Bound::AtLeast(100_000.0), 12, "Moderate 24h trading activity"),
    tier(Bound::AtLeast(50_000.0), 8, "Light 24h trading activity"),
    tier(Bound::Otherwise, 4, "Minimal 24h trading activity"),
];

const SOCIAL_TIERS: [Tier; 4] = [
    tier(Bound::AtLeast(4.0), 15, "Broad presence across websites and social platforms"),
    tier(Bound::AtLeast(2.0), 10, "Some social presence"),
    tier(Bound::AtLeast(1.0), 6, "Single public link"),
    tier(Bound::Otherwise, 2, "No websites or social links listed"),
];

const AGE_TIERS: [Tier; 5] = [
    tier(Bound::Above(180.0), 10, "Pair has traded for more than six months"),
    tier(Bound::Above(30.0), 8, "Pair has traded for more than a month"),
    tier(Bound::Above(7.0), 5, "Pair is a few weeks old"),
    tier(Bound::AtLeast(0.0), 3, "Pair launched within the last week"),
    tier(Bound::Otherwise, 2, "Pair creation time unknown"),
];

fn reach(tiers: &'static [Tier], metric: f64) -> &'static Tier {
    tiers
        .iter()
        .find(|t| t.bound.admits(metric))
        .unwrap_or(&tiers[tiers.len() - 1])
}

fn breakdown(category: &str, weight: u32, tier: &Tier, value: String) -> ScoreBreakdown {
    ScoreBreakdown {
        category: category.to_string(),
        weight,
        score: tier.score.min(weight),
        max_score: weight,
        value,
        rationale: tier.rationale.to_string(),
    }
}

pub fn score_liquidity(liquidity_usd: f64) -> ScoreBreakdown {
    let tier = reach(&LIQUIDITY_TIERS, liquidity_usd);
    breakdown("Liquidity", WEIGHTS.liquidity, tier, format_usd(liquidity_usd))
}

pub fn score_market_cap(market_cap_usd: f64) -> ScoreBreakdown {
    let tier = reach(&MARKET_CAP_TIERS, market_cap_usd);
    breakdown("Market Cap", WEIGHTS.market_cap, tier, format_usd(market_cap_usd))
}

pub fn score_volume(volume_24h_usd: f64) -> ScoreBreakdown {
    let tier = reach(&VOLUME_TIERS, volume_24h_usd);
    breakdown("Volume 24h", WEIGHTS.volume, tier, format_usd(volume_24h_usd))
}

pub fn score_social(link_count: u32) -> ScoreBreakdown {
    let tier = reach(&SOCIAL_TIERS, link_count as f64);
    breakdown("Social Presence", WEIGHTS.social, tier, format!("{} links", link_count))
}

/// `age_days` is `None` when the pair creation time is unknown.
pub fn score_age(age_days: Option<i64>) -> ScoreBreakdown {
    let metric = age_days.map(|d| d as f64).unwrap_or(-1.0);
    let tier = reach(&AGE_TIERS, metric);
    let value = match age_days {
        Some(days) => format!("{} days", days),
        None => "Unknown".to_string(),
    };
    breakdown("Age", WEIGHTS.age, tier, value)
}

pub fn score_team(websites: u32, socials: u32) -> ScoreBreakdown {
    let has_site = websites >= 1;
    let has_socials = socials >= 2;
    let (score, rationale) = if has_site && has_socials {
        (10, "Website and multiple social channels published")
    } else if has_site || has_socials {
        (7, "Partial public footprint")
    } else if socials >= 1 {
        (4, "Single social channel, team largely anonymous")
    } else {
        (2, "No public team footprint")
    };

    let tier = Tier {
        bound: Bound::Otherwise,
        score,
        rationale,
    };
    let value = format!("{} website(s), {} social(s)", websites, socials);
    breakdown("Team Transparency", WEIGHTS.team, &tier, value)
}

/// All six factors in their fixed reporting order.
pub fn score_factors(snapshot: &MarketSnapshot, now: DateTime<Utc>) -> Vec<ScoreBreakdown> {
    vec![
        score_liquidity(snapshot.liquidity_usd),
        score_market_cap(snapshot.market_cap_usd),
        score_volume(snapshot.volume.h24),
        score_social(snapshot.social.total_links()),
        score_age(snapshot.age_days(now)),
        score_team(snapshot.social.websites, snapshot.social.socials),
    ]
}

pub fn format_usd(amount: f64) -> String {
    let abs = amount.abs();
    let sign = if amount < 0.0 { "-" } else { "" };
    if abs >= 1_000_000_000.0 {
        format!("{}${:.2}B", sign, abs / 1_000_000_000.0)
    } else if abs >= 1_000_000.0 {
        format!("{}${:.2}M", sign, abs / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("{}${:.2}K", sign, abs / 1_000.0)
    } else {
        format!("{}${:.2}", sign, abs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_liquidity_boundaries() {
        assert_eq!(score_liquidity(500_000.0).score, 25);
        assert_eq!(score_liquidity(499_999.99).score, 20);
        assert_eq!(score_liquidity(200_000.0).score, 20);
        assert_eq!(score_liquidity(100_000.0).score, 15);
        assert_eq!(score_liquidity(50_000.0).score, 10);
        assert_eq!(score_liquidity(49_999.99).score, 5);
        assert_eq!(score_liquidity(0.0).score, 5);
    }

    #[test]
    fn test_market_cap_and_volume_boundaries() {
        assert_eq!(score_market_cap(10_000_000.0).score, 20);
        assert_eq!(score_market_cap(1_000_000.0).score, 16);
        assert_eq!(score_market_cap(500_000.0).score, 12);
        assert_eq!(score_market_cap(100_000.0).score, 8);
        assert_eq!(score_market_cap(99_999.0).score, 4);

        assert_eq!(score_volume(1_000_000.0).score, 20);
        assert_eq!(score_volume(500_000.0).score, 16);
        assert_eq!(score_volume(100_000.0).score, 12);
        assert_eq!(score_volume(50_000.0).score, 8);
        assert_eq!(score_volume(40_000.0).score, 4);
    }

    #[test]
    fn test_social_boundaries() {
        assert_eq!(score_social(4).score, 15);
        assert_eq!(score_social(3).score, 10);
        assert_eq!(score_social(2).score, 10);
        assert_eq!(score_social(1).score, 6);
        assert_eq!(score_social(0).score, 2);
    }

    #[test]
    fn test_age_top_tier_is_exclusive() {
        assert_eq!(score_age(Some(181)).score, 10);
        assert_eq!(score_age(Some(180)).score, 8);
        assert_eq!(score_age(Some(31)).score, 8);
        assert_eq!(score_age(Some(30)).score, 5);
        assert_eq!(score_age(Some(8)).score, 5);
        assert_eq!(score_age(Some(7)).score, 3);
        assert_eq!(score_age(Some(0)).score, 3);
        assert_eq!(score_age(None).score, 2);
        assert_eq!(score_age(None).value, "Unknown");
    }

    #[test]
    fn test_team_tiers() {
        assert_eq!(score_team(1, 2).score, 10);
        assert_eq!(score_team(1, 0).score, 7);
        assert_eq!(score_team(0, 3).score, 7);
        assert_eq!(score_team(0, 1).score, 4);
        assert_eq!(score_team(0, 0).score, 2);
    }

    #[test]
    fn test_scores_never_exceed_weight() {
        let samples = [0.0, 1.0, 49_999.0, 100_000.0, 750_000.0, 5e6, 1e12];
        for metric in samples {
            for b in [score_liquidity(metric), score_market_cap(metric), score_volume(metric)] {
                assert!(b.score <= b.max_score, "{} exceeded weight", b.category);
                assert_eq!(b.weight, b.max_score);
            }
        }
        for count in 0..10 {
            let b = score_social(count);
            assert!(b.score <= b.max_score);
            for websites in 0..3 {
                let t = score_team(websites, count);
                assert!(t.score <= t.max_score);
            }
        }
    }

    #[test]
    fn test_monotonic_in_metric() {
        let mut previous = (0, 0, 0);
        for step in 0..200 {
            let metric = step as f64 * 75_000.0;
            let current = (
                score_liquidity(metric).score,
                score_market_cap(metric).score,
                score_volume(metric).score,
            );
            assert!(current.0 >= previous.0);
            assert!(current.1 >= previous.1);
            assert!(current.2 >= previous.2);
            previous = current;
        }

        let mut previous_age = score_age(None).score;
        for days in 0..400 {
            let score = score_age(Some(days)).score;
            assert!(score >= previous_age);
            previous_age = score;
        }

        for websites in 0..3 {
            for socials in 0..5 {
                let base = score_team(websites, socials).score;
                assert!(score_team(websites + 1, socials).score >= base);
                assert!(score_team(websites, socials + 1).score >= base);
            }
        }
    }

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(600_000.0), "$600.00K");
        assert_eq!(format_usd(12_000_000.0), "$12.00M");
        assert_eq!(format_usd(2_500_000_000.0), "$2.50B");
        assert_eq!(format_usd(999.5), "$999.50");
        assert_eq!(format_usd(0.0), "$0.00");
    }

    #[test]
    fn test_factor_order_is_fixed() {
        let categories: Vec<String> = score_factors(&MarketSnapshot::default(), Utc::now())
            .into_iter()
            .map(|b| b.category)
            .collect();
        assert_eq!(
            categories,
            vec![
                "Liquidity",
                "Market Cap",
                "Volume 24h",
                "Social Presence",
                "Age",
                "Team Transparency"
            ]
        );
    }
}
