//! Technical indicator implementations.
//!
//! Pure numeric functions over ordered close-price sequences (and OHLCV for
//! support/resistance). Every function absorbs short inputs and returns a
//! usable neutral value instead of erroring.

pub mod rsi;
pub mod ema;
pub mod macd;
pub mod support_resistance;

pub use ema::ema;
pub use macd::{macd, macd_default, MacdOutput};
pub use rsi::rsi;
pub use support_resistance::support_resistance;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of the MACD line relative to its signal line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MacdTrend {
    Bullish,
    Bearish,
    Neutral,
}

/// Composite price trend from the EMA 20/50 relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    Uptrend,
    Downtrend,
    Sideways,
}

/// Five-level momentum classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Momentum {
    StrongBullish,
    Bullish,
    Neutral,
    Bearish,
    StrongBearish,
}

/// Snapshot of all indicators for one symbol, derived per call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSet {
    pub rsi: f64,
    pub macd: MacdOutput,
    pub ema20: f64,
    pub ema50: f64,
    pub support: f64,
    pub resistance: f64,
    pub trend: Trend,
    pub momentum: Momentum,
}

impl IndicatorSet {
    /// All-neutral set anchored on the last known price. Used whenever the
    /// price history is too short or the fetch failed.
    pub fn neutral(last_price: f64) -> Self {
        Self {
            rsi: 50.0,
            macd: MacdOutput::neutral(),
            ema20: last_price,
            ema50: last_price,
            support: last_price * 0.95,
            resistance: last_price * 1.05,
            trend: Trend::Sideways,
            momentum: Momentum::Neutral,
        }
    }
}

impl fmt::Display for MacdTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MacdTrend::Bullish => write!(f, "Bullish"),
            MacdTrend::Bearish => write!(f, "Bearish"),
            MacdTrend::Neutral => write!(f, "Neutral"),
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trend::Uptrend => write!(f, "Uptrend"),
            Trend::Downtrend => write!(f, "Downtrend"),
            Trend::Sideways => write!(f, "Sideways"),
        }
    }
}

impl fmt::Display for Momentum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Momentum::StrongBullish => write!(f, "Strong Bullish"),
            Momentum::Bullish => write!(f, "Bullish"),
            Momentum::Neutral => write!(f, "Neutral"),
            Momentum::Bearish => write!(f, "Bearish"),
            Momentum::StrongBearish => write!(f, "Strong Bearish"),
        }
    }
}
