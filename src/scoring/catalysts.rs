use crate::models::{CatalystAdjustment, MarketSnapshot};

pub const VOLUME_MOMENTUM: &str = "Volume Momentum";
pub const BUY_PRESSURE: &str = "Buy Pressure";
pub const MULTI_PLATFORM: &str = "Multi-Platform Presence";
pub const PRICE_DUMP: &str = "Price Dump";
pub const SELL_PRESSURE: &str = "Sell Pressure";

/// Ratio of two strictly positive operands, `None` otherwise.
fn guarded_ratio(numerator: f64, denominator: f64) -> Option<f64> {
    (numerator > 0.0 && denominator > 0.0).then(|| numerator / denominator)
}

/// Runs every catalyst rule over the snapshot. Rules are independent; all
/// that fire are returned.
pub fn detect(snapshot: &MarketSnapshot) -> Vec<CatalystAdjustment> {
    let mut catalysts = Vec::new();

    if let Some(share) = guarded_ratio(snapshot.volume.h6, snapshot.volume.h24) {
        if share > 0.5 {
            catalysts.push(CatalystAdjustment {
                name: VOLUME_MOMENTUM.to_string(),
                points: 5,
                rationale: format!(
                    "{:.0}% of 24h volume traded in the last 6h",
                    share * 100.0
                ),
            });
        }
    }

    let buys = snapshot.txns.h24.buys as f64;
    let sells = snapshot.txns.h24.sells as f64;

    if let Some(ratio) = guarded_ratio(buys, sells) {
        if ratio > 2.0 {
            catalysts.push(CatalystAdjustment {
                name: BUY_PRESSURE.to_string(),
                points: 3,
                rationale: format!("Buys outnumber sells {:.1}x over 24h", ratio),
            });
        }
    }

    let links = snapshot.social.total_links();
    if links >= 4 {
        catalysts.push(CatalystAdjustment {
            name: MULTI_PLATFORM.to_string(),
            points: 5,
            rationale: format!("{} websites and social links listed", links),
        });
    }

    if snapshot.price_change.h24 < -30.0 {
        catalysts.push(CatalystAdjustment {
            name: PRICE_DUMP.to_string(),
            points: -10,
            rationale: format!("Price moved {:.1}% in 24h", snapshot.price_change.h24),
        });
    }

    if let Some(ratio) = guarded_ratio(sells, buys) {
        if ratio > 3.0 {
            catalysts.push(CatalystAdjustment {
                name: SELL_PRESSURE.to_string(),
                points: -5,
                rationale: format!("Sells outnumber buys {:.1}x over 24h", ratio),
            });
        }
    }

    catalysts
}
