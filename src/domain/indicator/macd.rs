//! MACD (Moving Average Convergence Divergence) indicator.
//!
//! MACD line = EMA(fast) - EMA(slow), computed over the window where both
//! EMAs exist. The SMA seeding makes the two EMA outputs start at different
//! offsets, so the shorter (slow) output is matched against the tail of the
//! fast output to keep both values on the same candle.
//!
//! Signal line = EMA(signal_period) of the MACD line.
//! Histogram = last(macd) - last(signal).
//!
//! Default parameters: fast=12, slow=26, signal=9.

use crate::domain::indicator::{ema, MacdTrend};
use serde::{Deserialize, Serialize};

pub const DEFAULT_FAST: usize = 12;
pub const DEFAULT_SLOW: usize = 26;
pub const DEFAULT_SIGNAL: usize = 9;

/// Latest MACD reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacdOutput {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
    pub trend: MacdTrend,
}

impl MacdOutput {
    pub fn neutral() -> Self {
        Self {
            macd: 0.0,
            signal: 0.0,
            histogram: 0.0,
            trend: MacdTrend::Neutral,
        }
    }
}

pub fn macd(prices: &[f64], fast: usize, slow: usize, signal_period: usize) -> MacdOutput {
    if fast == 0 || slow == 0 || signal_period == 0 {
        return MacdOutput::neutral();
    }

    let ema_fast = ema(prices, fast);
    let ema_slow = ema(prices, slow);

    let overlap = ema_fast.len().min(ema_slow.len());
    if overlap == 0 {
        return MacdOutput::neutral();
    }

    let fast_tail = &ema_fast[ema_fast.len() - overlap..];
    let slow_tail = &ema_slow[ema_slow.len() - overlap..];

    let macd_line: Vec<f64> = fast_tail
        .iter()
        .zip(slow_tail)
        .map(|(f, s)| f - s)
        .collect();

    let signal_line = ema(&macd_line, signal_period);

    let macd_value = *macd_line.last().unwrap_or(&0.0);
    let signal_value = *signal_line.last().unwrap_or(&macd_value);
    let histogram = macd_value - signal_value;

    // The histogram is a difference of near-equal floats: on a
    // constant-increment ramp both series converge to the same asymptote and
    // the subtraction leaves only rounding noise. Within tolerance of zero
    // the MACD line sign decides.
    let tol = 64.0 * f64::EPSILON * macd_value.abs().max(signal_value.abs()).max(1.0);
    let trend = if histogram > tol {
        MacdTrend::Bullish
    } else if histogram < -tol {
        MacdTrend::Bearish
    } else if macd_value > tol {
        MacdTrend::Bullish
    } else if macd_value < -tol {
        MacdTrend::Bearish
    } else {
        MacdTrend::Neutral
    };

    MacdOutput {
        macd: macd_value,
        signal: signal_value,
        histogram,
        trend,
    }
}

pub fn macd_default(prices: &[f64]) -> MacdOutput {
    macd(prices, DEFAULT_FAST, DEFAULT_SLOW, DEFAULT_SIGNAL)
}
