//! OHLCV candle representation.

use chrono::{DateTime, Utc};

/// One time-bucketed price/volume record, immutable once fetched.
/// Sequences are ordered by ascending timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct Candle {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// Extract the close-price sequence from a candle window.
pub fn closes(candles: &[Candle]) -> Vec<f64> {
    candles.iter().map(|c| c.close).collect()
}
