//! RSI (Relative Strength Index) indicator.
//!
//! Simple (non-Wilder-smoothed) averages of gains/losses over the trailing
//! `period` price deltas:
//!
//! RSI = 100 - (100 / (1 + avg_gain / avg_loss))
//! If avg_loss == 0: RSI = 100
//!
//! Inputs shorter than `period + 1` yield the neutral default 50; the
//! function never errors.

pub const DEFAULT_PERIOD: usize = 14;

pub fn rsi(prices: &[f64], period: usize) -> f64 {
    if period == 0 || prices.len() < period + 1 {
        return 50.0;
    }

    let window = &prices[prices.len() - period - 1..];
    let mut gain_sum = 0.0;
    let mut loss_sum = 0.0;

    for pair in window.windows(2) {
        let change = pair[1] - pair[0];
        if change > 0.0 {
            gain_sum += change;
        } else {
            loss_sum += -change;
        }
    }

    let avg_gain = gain_sum / period as f64;
    let avg_loss = loss_sum / period as f64;

    if avg_loss == 0.0 {
        return 100.0;
    }

    100.0 - (100.0 / (1.0 + avg_gain / avg_loss))
}
