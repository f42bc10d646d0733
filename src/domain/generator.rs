//! Parameter generator: turns (strategy profile, instrument characteristics)
//! into a concrete, bounded strategy configuration.
//!
//! Randomized elements (leverage jitter, synthetic backtest statistics) are
//! pure functions of (seed, symbol) through [`SeededJitter`], so output is
//! reproducible.

use crate::domain::catalog::{IndicatorSpec, RiskLevel, StrategyCategory, StrategyProfile};
use crate::domain::classifier::{InstrumentCharacteristics, MarketCap, Volatility, VolumeTier};
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// The generated artifact, persisted by the external store. Keyed by the
/// business `name`: regenerating produces a replacement with a fresh `id`
/// rather than mutating in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyConfiguration {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub strategy: String,
    pub timeframe: String,
    pub leverage: u32,
    pub position_size: f64,
    pub take_profit_pct: f64,
    pub stop_loss_pct: f64,
    pub trailing_stop: bool,
    pub risk_score: u8,
    pub expected_win_rate: f64,
    pub indicators: Vec<IndicatorSpec>,
    pub synthetic_stats: SyntheticStats,
    pub created: DateTime<Utc>,
}

/// Synthetic performance figures attached to each configuration. These are
/// seeded estimates, not measured backtest results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyntheticStats {
    pub trades: u32,
    pub win_rate: f64,
    pub profit_factor: f64,
    pub max_drawdown_pct: f64,
}

/// Deterministic jitter source: the same (seed, symbol) pair always yields
/// the same stream.
#[derive(Debug, Clone, Copy)]
pub struct SeededJitter {
    seed: u64,
}

impl SeededJitter {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn rng_for(&self, symbol: &str) -> StdRng {
        let mut hasher = DefaultHasher::new();
        symbol.hash(&mut hasher);
        StdRng::seed_from_u64(self.seed ^ hasher.finish())
    }
}

/// Leverage ceiling by risk appetite. The aggressive cap scales with the
/// instrument's own ceiling instead of a fixed number.
pub fn leverage_cap(risk: RiskLevel, max_leverage: u32) -> u32 {
    match risk {
        RiskLevel::Conservative => 10,
        RiskLevel::Moderate => 20,
        RiskLevel::Aggressive => (max_leverage as f64 * 0.8).floor() as u32,
    }
}

/// Position size in quote-currency units: larger for lower volatility and
/// higher risk tolerance.
pub fn position_size(volatility: Volatility, risk: RiskLevel) -> f64 {
    match (volatility, risk) {
        (Volatility::Low, RiskLevel::Conservative) => 300.0,
        (Volatility::Low, RiskLevel::Moderate) => 500.0,
        (Volatility::Low, RiskLevel::Aggressive) => 800.0,
        (Volatility::Medium, RiskLevel::Conservative) => 200.0,
        (Volatility::Medium, RiskLevel::Moderate) => 350.0,
        (Volatility::Medium, RiskLevel::Aggressive) => 550.0,
        (Volatility::High, RiskLevel::Conservative) => 50.0,
        (Volatility::High, RiskLevel::Moderate) => 150.0,
        (Volatility::High, RiskLevel::Aggressive) => 250.0,
    }
}

/// Take-profit and stop-loss percentages by (volatility, category). The
/// category multiplier scales both legs, so the stop stays below the target
/// for every combination.
pub fn exit_levels(volatility: Volatility, category: StrategyCategory) -> (f64, f64) {
    let (tp, sl) = match volatility {
        Volatility::Low => (2.5, 1.0),
        Volatility::Medium => (4.0, 1.5),
        Volatility::High => (6.0, 2.5),
    };

    let mult = match category {
        StrategyCategory::Scalping => 0.6,
        StrategyCategory::Range => 0.7,
        StrategyCategory::MeanReversion => 0.8,
        StrategyCategory::Momentum => 1.0,
        StrategyCategory::TrendFollowing => 1.2,
        StrategyCategory::Breakout => 1.4,
    };

    (tp * mult, sl * mult)
}

fn risk_score(risk: RiskLevel, volatility: Volatility) -> u8 {
    let base: i8 = match risk {
        RiskLevel::Conservative => 3,
        RiskLevel::Moderate => 5,
        RiskLevel::Aggressive => 8,
    };
    let adjust: i8 = match volatility {
        Volatility::Low => -1,
        Volatility::Medium => 0,
        Volatility::High => 1,
    };
    (base + adjust).clamp(1, 10) as u8
}

/// expected_win_rate = clamp(55, 95, 50 + 0.3*score + bonuses). An estimate,
/// not a measured result.
pub fn expected_win_rate(score: f64, chars: &InstrumentCharacteristics) -> f64 {
    let mut rate = 50.0 + 0.3 * score;
    if chars.market_cap == MarketCap::Large {
        rate += 5.0;
    }
    if chars.volume == VolumeTier::High {
        rate += 3.0;
    }
    if chars.volatility == Volatility::Medium {
        rate += 2.0;
    }
    rate.clamp(55.0, 95.0)
}

pub fn generate_configuration(
    profile: &StrategyProfile,
    chars: &InstrumentCharacteristics,
    score: f64,
    jitter: &SeededJitter,
    now: DateTime<Utc>,
) -> StrategyConfiguration {
    let mut rng = jitter.rng_for(&chars.symbol);

    let cap = leverage_cap(profile.risk_level, chars.max_leverage);
    let base_leverage = chars.max_leverage.min(cap);
    // Jitter only shaves leverage, so the ceiling invariant holds.
    let shave: u32 = rng.gen_range(0..=2);
    let leverage = base_leverage.saturating_sub(shave).max(1);

    let (take_profit_pct, stop_loss_pct) = exit_levels(chars.volatility, profile.category);
    let win_rate = expected_win_rate(score, chars);

    let stats = SyntheticStats {
        trades: rng.gen_range(40..=220),
        win_rate: (win_rate + rng.gen_range(-5.0..=5.0)).clamp(50.0, 95.0),
        profit_factor: rng.gen_range(1.1..=2.4),
        max_drawdown_pct: rng.gen_range(4.0..=18.0),
    };

    StrategyConfiguration {
        id: format!(
            "{}_{}_{}",
            profile.key,
            chars.symbol.to_lowercase(),
            now.timestamp()
        ),
        name: format!("{} {}", profile.name, chars.symbol),
        symbol: chars.symbol.clone(),
        strategy: profile.key.to_string(),
        timeframe: profile.timeframe.to_string(),
        leverage,
        position_size: position_size(chars.volatility, profile.risk_level),
        take_profit_pct,
        stop_loss_pct,
        trailing_stop: chars.volatility == Volatility::High
            || profile.risk_level == RiskLevel::Aggressive,
        risk_score: risk_score(profile.risk_level, chars.volatility),
        expected_win_rate: win_rate,
        indicators: profile.indicators.clone(),
        synthetic_stats: stats,
        created: now,
    }
}
