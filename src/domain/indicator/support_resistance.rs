//! Support and resistance levels from an OHLCV window.
//!
//! With fewer than 10 candles the levels are a ±5% band around the last
//! close. Otherwise resistance is the mean of the top 20% of highs and
//! support the mean of the bottom 20% of lows, which damps single-candle
//! outliers.

use crate::domain::candle::Candle;

const MIN_CANDLES: usize = 10;

/// Returns (support, resistance).
pub fn support_resistance(candles: &[Candle]) -> (f64, f64) {
    let last_close = candles.last().map(|c| c.close).unwrap_or(0.0);

    if candles.len() < MIN_CANDLES {
        return (last_close * 0.95, last_close * 1.05);
    }

    let count = (candles.len() / 5).max(1);

    let mut highs: Vec<f64> = candles.iter().map(|c| c.high).collect();
    highs.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));
    let resistance = highs[..count].iter().sum::<f64>() / count as f64;

    let mut lows: Vec<f64> = candles.iter().map(|c| c.low).collect();
    lows.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let support = lows[..count].iter().sum::<f64>() / count as f64;

    (support, resistance)
}
