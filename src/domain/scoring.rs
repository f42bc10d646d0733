//! Compatibility scoring between classified instrument characteristics and
//! catalog profiles.
//!
//! score = 30·[volatility matches] + 25·[volume matches]
//!       + 25·[behavior matches] + 20·leverage_ramp, clamped to [0,100].

use crate::domain::catalog::{LeveragePreference, StrategyCatalog, StrategyProfile};
use crate::domain::classifier::InstrumentCharacteristics;
use serde::{Deserialize, Serialize};

pub const VOLATILITY_WEIGHT: f64 = 30.0;
pub const VOLUME_WEIGHT: f64 = 25.0;
pub const BEHAVIOR_WEIGHT: f64 = 25.0;
pub const LEVERAGE_WEIGHT: f64 = 20.0;

/// Ephemeral scoring result for one catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityScore {
    pub strategy_key: String,
    pub score: f64,
}

/// Fraction of full marks (0..=1) the instrument's leverage ceiling earns
/// for a profile's leverage preference. Full marks once the ceiling reaches
/// 25x/50x/75x for low/medium/high preference, scaling linearly below.
pub fn leverage_ramp(max_leverage: u32, preference: LeveragePreference) -> f64 {
    let full_at = match preference {
        LeveragePreference::Low => 25.0,
        LeveragePreference::Medium => 50.0,
        LeveragePreference::High => 75.0,
    };
    (max_leverage as f64 / full_at).min(1.0)
}

pub fn score_profile(chars: &InstrumentCharacteristics, profile: &StrategyProfile) -> f64 {
    let mut score = 0.0;

    if profile.optimal_volatility.contains(&chars.volatility) {
        score += VOLATILITY_WEIGHT;
    }
    if profile.optimal_volume.contains(&chars.volume) {
        score += VOLUME_WEIGHT;
    }
    if profile.optimal_behavior.contains(&chars.trend_behavior) {
        score += BEHAVIOR_WEIGHT;
    }
    score += LEVERAGE_WEIGHT * leverage_ramp(chars.max_leverage, profile.leverage_preference);

    score.clamp(0.0, 100.0)
}

/// Top-N catalog entries by score. Ties keep catalog declaration order
/// (stable sort).
pub fn find_best_strategies(
    catalog: &StrategyCatalog,
    chars: &InstrumentCharacteristics,
    n: usize,
) -> Vec<CompatibilityScore> {
    let mut scored: Vec<CompatibilityScore> = catalog
        .profiles()
        .iter()
        .map(|p| CompatibilityScore {
            strategy_key: p.key.to_string(),
            score: score_profile(chars, p),
        })
        .collect();

    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    scored.truncate(n);
    scored
}
