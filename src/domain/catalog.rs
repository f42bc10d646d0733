//! Strategy catalog: static reference data describing the parameterized
//! strategy templates.
//!
//! The catalog is an injected, immutable registry rather than a module-level
//! singleton, so tests and callers can substitute alternate catalogs.
//! Declaration order is significant: it breaks score ties.

use crate::domain::classifier::{TrendBehavior, Volatility, VolumeTier};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrategyCategory {
    TrendFollowing,
    Momentum,
    MeanReversion,
    Breakout,
    Scalping,
    Range,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeveragePreference {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Conservative,
    Moderate,
    Aggressive,
}

/// One canonical indicator parameter set, reused unmodified for every
/// instrument assigned to the strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSpec {
    pub name: String,
    pub params: Vec<f64>,
}

impl IndicatorSpec {
    pub fn new(name: &str, params: &[f64]) -> Self {
        Self {
            name: name.to_string(),
            params: params.to_vec(),
        }
    }
}

impl fmt::Display for IndicatorSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params: Vec<String> = self.params.iter().map(|p| p.to_string()).collect();
        write!(f, "{}({})", self.name, params.join(","))
    }
}

/// One named strategy template and the conditions it targets.
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyProfile {
    pub key: &'static str,
    pub name: &'static str,
    pub category: StrategyCategory,
    pub timeframe: &'static str,
    pub optimal_volatility: Vec<Volatility>,
    pub optimal_volume: Vec<VolumeTier>,
    pub optimal_behavior: Vec<TrendBehavior>,
    pub leverage_preference: LeveragePreference,
    pub risk_level: RiskLevel,
    pub indicators: Vec<IndicatorSpec>,
}

/// Immutable, ordered registry of strategy profiles.
#[derive(Debug, Clone)]
pub struct StrategyCatalog {
    profiles: Vec<StrategyProfile>,
}

impl StrategyCatalog {
    pub fn new(profiles: Vec<StrategyProfile>) -> Self {
        Self { profiles }
    }

    pub fn profiles(&self) -> &[StrategyProfile] {
        &self.profiles
    }

    pub fn get(&self, key: &str) -> Option<&StrategyProfile> {
        self.profiles.iter().find(|p| p.key == key)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// The built-in catalog of twenty templates.
    pub fn builtin() -> Self {
        use LeveragePreference as Lp;
        use RiskLevel as Rl;
        use StrategyCategory as Cat;
        use TrendBehavior as Tb;
        use Volatility as Vol;
        use VolumeTier as Vt;

        let profiles = vec![
            StrategyProfile {
                key: "macd_trend",
                name: "MACD Trend Rider",
                category: Cat::TrendFollowing,
                timeframe: "1h",
                optimal_volatility: vec![Vol::Low, Vol::Medium],
                optimal_volume: vec![Vt::High, Vt::Medium],
                optimal_behavior: vec![Tb::Trending],
                leverage_preference: Lp::Medium,
                risk_level: Rl::Moderate,
                indicators: vec![
                    IndicatorSpec::new("MACD", &[12.0, 26.0, 9.0]),
                    IndicatorSpec::new("EMA", &[200.0]),
                ],
            },
            StrategyProfile {
                key: "ema_cross",
                name: "EMA Golden Cross",
                category: Cat::TrendFollowing,
                timeframe: "4h",
                optimal_volatility: vec![Vol::Low, Vol::Medium],
                optimal_volume: vec![Vt::High],
                optimal_behavior: vec![Tb::Trending],
                leverage_preference: Lp::Medium,
                risk_level: Rl::Conservative,
                indicators: vec![
                    IndicatorSpec::new("EMA", &[20.0]),
                    IndicatorSpec::new("EMA", &[50.0]),
                ],
            },
            StrategyProfile {
                key: "supertrend_momo",
                name: "SuperTrend Momentum",
                category: Cat::Momentum,
                timeframe: "1h",
                optimal_volatility: vec![Vol::Medium, Vol::High],
                optimal_volume: vec![Vt::High, Vt::Medium],
                optimal_behavior: vec![Tb::Trending, Tb::Volatile],
                leverage_preference: Lp::High,
                risk_level: Rl::Aggressive,
                indicators: vec![
                    IndicatorSpec::new("SuperTrend", &[10.0, 3.0]),
                    IndicatorSpec::new("RSI", &[14.0]),
                ],
            },
            StrategyProfile {
                key: "rsi_fade",
                name: "RSI Range Fader",
                category: Cat::MeanReversion,
                timeframe: "1h",
                optimal_volatility: vec![Vol::Low, Vol::Medium],
                optimal_volume: vec![Vt::Medium, Vt::Low],
                optimal_behavior: vec![Tb::Ranging],
                leverage_preference: Lp::Low,
                risk_level: Rl::Conservative,
                indicators: vec![IndicatorSpec::new("RSI", &[14.0, 30.0, 70.0])],
            },
            StrategyProfile {
                key: "bollinger_revert",
                name: "Bollinger Band Reversion",
                category: Cat::MeanReversion,
                timeframe: "1h",
                optimal_volatility: vec![Vol::Medium],
                optimal_volume: vec![Vt::Medium, Vt::High],
                optimal_behavior: vec![Tb::Ranging],
                leverage_preference: Lp::Medium,
                risk_level: Rl::Moderate,
                indicators: vec![
                    IndicatorSpec::new("Bollinger", &[20.0, 2.0]),
                    IndicatorSpec::new("RSI", &[14.0]),
                ],
            },
            StrategyProfile {
                key: "stoch_swing",
                name: "Stochastic Swing",
                category: Cat::MeanReversion,
                timeframe: "4h",
                optimal_volatility: vec![Vol::Medium],
                optimal_volume: vec![Vt::Medium],
                optimal_behavior: vec![Tb::Ranging, Tb::Trending],
                leverage_preference: Lp::Medium,
                risk_level: Rl::Moderate,
                indicators: vec![IndicatorSpec::new("Stochastic", &[14.0, 3.0, 3.0])],
            },
            StrategyProfile {
                key: "donchian_breakout",
                name: "Donchian Channel Breakout",
                category: Cat::Breakout,
                timeframe: "1h",
                optimal_volatility: vec![Vol::Medium, Vol::High],
                optimal_volume: vec![Vt::High],
                optimal_behavior: vec![Tb::Trending, Tb::Volatile],
                leverage_preference: Lp::High,
                risk_level: Rl::Aggressive,
                indicators: vec![IndicatorSpec::new("Donchian", &[20.0])],
            },
            StrategyProfile {
                key: "squeeze_breakout",
                name: "Volatility Squeeze Breakout",
                category: Cat::Breakout,
                timeframe: "1h",
                optimal_volatility: vec![Vol::High],
                optimal_volume: vec![Vt::High, Vt::Medium],
                optimal_behavior: vec![Tb::Volatile],
                leverage_preference: Lp::Medium,
                risk_level: Rl::Aggressive,
                indicators: vec![
                    IndicatorSpec::new("Bollinger", &[20.0, 2.0]),
                    IndicatorSpec::new("ATR", &[14.0]),
                ],
            },
            StrategyProfile {
                key: "vwap_scalp",
                name: "VWAP Scalper",
                category: Cat::Scalping,
                timeframe: "5m",
                optimal_volatility: vec![Vol::Low, Vol::Medium],
                optimal_volume: vec![Vt::High],
                optimal_behavior: vec![Tb::Ranging, Tb::Trending],
                leverage_preference: Lp::High,
                risk_level: Rl::Moderate,
                indicators: vec![
                    IndicatorSpec::new("VWAP", &[]),
                    IndicatorSpec::new("EMA", &[9.0]),
                ],
            },
            StrategyProfile {
                key: "grid_range",
                name: "Grid Accumulator",
                category: Cat::Range,
                timeframe: "1h",
                optimal_volatility: vec![Vol::Low],
                optimal_volume: vec![Vt::Medium, Vt::High],
                optimal_behavior: vec![Tb::Ranging],
                leverage_preference: Lp::Low,
                risk_level: Rl::Conservative,
                indicators: vec![IndicatorSpec::new("Grid", &[10.0, 0.5])],
            },
            StrategyProfile {
                key: "dca_ladder",
                name: "DCA Ladder",
                category: Cat::Range,
                timeframe: "4h",
                optimal_volatility: vec![Vol::Low, Vol::Medium],
                optimal_volume: vec![Vt::Low, Vt::Medium],
                optimal_behavior: vec![Tb::Ranging],
                leverage_preference: Lp::Low,
                risk_level: Rl::Conservative,
                indicators: vec![IndicatorSpec::new("Ladder", &[5.0, 1.5])],
            },
            StrategyProfile {
                key: "momentum_burst",
                name: "Momentum Burst",
                category: Cat::Momentum,
                timeframe: "15m",
                optimal_volatility: vec![Vol::High],
                optimal_volume: vec![Vt::High],
                optimal_behavior: vec![Tb::Volatile],
                leverage_preference: Lp::Medium,
                risk_level: Rl::Aggressive,
                indicators: vec![
                    IndicatorSpec::new("ROC", &[10.0]),
                    IndicatorSpec::new("VolumeMA", &[20.0]),
                ],
            },
            StrategyProfile {
                key: "trend_pullback",
                name: "Trend Pullback",
                category: Cat::TrendFollowing,
                timeframe: "1h",
                optimal_volatility: vec![Vol::Medium],
                optimal_volume: vec![Vt::High, Vt::Medium],
                optimal_behavior: vec![Tb::Trending],
                leverage_preference: Lp::Medium,
                risk_level: Rl::Moderate,
                indicators: vec![
                    IndicatorSpec::new("EMA", &[50.0]),
                    IndicatorSpec::new("RSI", &[14.0]),
                ],
            },
            StrategyProfile {
                key: "adx_rider",
                name: "ADX Strength Rider",
                category: Cat::TrendFollowing,
                timeframe: "1h",
                optimal_volatility: vec![Vol::Medium],
                optimal_volume: vec![Vt::Medium],
                optimal_behavior: vec![Tb::Trending],
                leverage_preference: Lp::High,
                risk_level: Rl::Moderate,
                indicators: vec![
                    IndicatorSpec::new("ADX", &[14.0, 25.0]),
                    IndicatorSpec::new("EMA", &[21.0]),
                ],
            },
            StrategyProfile {
                key: "micro_scalp",
                name: "Micro Scalper",
                category: Cat::Scalping,
                timeframe: "5m",
                optimal_volatility: vec![Vol::High],
                optimal_volume: vec![Vt::High],
                optimal_behavior: vec![Tb::Volatile],
                leverage_preference: Lp::High,
                risk_level: Rl::Aggressive,
                indicators: vec![
                    IndicatorSpec::new("EMA", &[5.0]),
                    IndicatorSpec::new("EMA", &[13.0]),
                    IndicatorSpec::new("RSI", &[7.0]),
                ],
            },
            StrategyProfile {
                key: "ichimoku_trend",
                name: "Ichimoku Baseline Trend",
                category: Cat::TrendFollowing,
                timeframe: "4h",
                optimal_volatility: vec![Vol::Low, Vol::Medium],
                optimal_volume: vec![Vt::Medium],
                optimal_behavior: vec![Tb::Trending],
                leverage_preference: Lp::Medium,
                risk_level: Rl::Moderate,
                indicators: vec![IndicatorSpec::new("Ichimoku", &[9.0, 26.0, 52.0])],
            },
            StrategyProfile {
                key: "macd_divergence",
                name: "MACD Divergence Hunter",
                category: Cat::MeanReversion,
                timeframe: "1h",
                optimal_volatility: vec![Vol::Medium, Vol::High],
                optimal_volume: vec![Vt::Medium],
                optimal_behavior: vec![Tb::Ranging, Tb::Volatile],
                leverage_preference: Lp::Medium,
                risk_level: Rl::Moderate,
                indicators: vec![IndicatorSpec::new("MACD", &[12.0, 26.0, 9.0])],
            },
            StrategyProfile {
                key: "channel_fade",
                name: "Channel Fade",
                category: Cat::MeanReversion,
                timeframe: "4h",
                optimal_volatility: vec![Vol::Low],
                optimal_volume: vec![Vt::Low, Vt::Medium],
                optimal_behavior: vec![Tb::Ranging],
                leverage_preference: Lp::Low,
                risk_level: Rl::Conservative,
                indicators: vec![IndicatorSpec::new("Keltner", &[20.0, 2.0])],
            },
            StrategyProfile {
                key: "volatility_harvest",
                name: "Volatility Harvester",
                category: Cat::Momentum,
                timeframe: "15m",
                optimal_volatility: vec![Vol::High],
                optimal_volume: vec![Vt::High, Vt::Medium],
                optimal_behavior: vec![Tb::Volatile],
                leverage_preference: Lp::Low,
                risk_level: Rl::Aggressive,
                indicators: vec![
                    IndicatorSpec::new("ATR", &[14.0]),
                    IndicatorSpec::new("RSI", &[14.0]),
                ],
            },
            StrategyProfile {
                key: "psar_flip",
                name: "Parabolic Flip",
                category: Cat::Momentum,
                timeframe: "1h",
                optimal_volatility: vec![Vol::Medium, Vol::High],
                optimal_volume: vec![Vt::Medium],
                optimal_behavior: vec![Tb::Trending, Tb::Volatile],
                leverage_preference: Lp::High,
                risk_level: Rl::Aggressive,
                indicators: vec![IndicatorSpec::new("PSAR", &[0.02, 0.2])],
            },
        ];

        Self { profiles }
    }
}

impl fmt::Display for StrategyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategyCategory::TrendFollowing => write!(f, "trend-following"),
            StrategyCategory::Momentum => write!(f, "momentum"),
            StrategyCategory::MeanReversion => write!(f, "mean-reversion"),
            StrategyCategory::Breakout => write!(f, "breakout"),
            StrategyCategory::Scalping => write!(f, "scalping"),
            StrategyCategory::Range => write!(f, "range"),
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Conservative => write!(f, "conservative"),
            RiskLevel::Moderate => write!(f, "moderate"),
            RiskLevel::Aggressive => write!(f, "aggressive"),
        }
    }
}
