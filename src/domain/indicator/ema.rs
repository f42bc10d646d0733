//! Exponential Moving Average indicator.
//!
//! k = 2/(n+1), seeded with the SMA of the first n prices, then
//! EMA[i] = price[i]*k + EMA[i-1]*(1-k).
//!
//! The output starts at the seed, so its length is
//! max(0, len(prices) - period + 1).

pub fn ema(prices: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || prices.len() < period {
        return Vec::new();
    }

    let k = 2.0 / (period as f64 + 1.0);
    let mut out = Vec::with_capacity(prices.len() - period + 1);

    let seed: f64 = prices[..period].iter().sum::<f64>() / period as f64;
    out.push(seed);

    let mut current = seed;
    for &price in &prices[period..] {
        current = price * k + current * (1.0 - k);
        out.push(current);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn ema_empty_prices() {
        assert!(ema(&[], 3).is_empty());
    }

    #[test]
    fn ema_period_0() {
        assert!(ema(&[10.0, 20.0], 0).is_empty());
    }

    #[test]
    fn ema_input_shorter_than_period() {
        assert!(ema(&[10.0, 20.0], 3).is_empty());
    }

    #[test]
    fn ema_output_length() {
        let prices = vec![10.0, 20.0, 30.0, 40.0, 50.0];
        assert_eq!(ema(&prices, 3).len(), 3);
        assert_eq!(ema(&prices, 5).len(), 1);
        assert_eq!(ema(&prices, 1).len(), 5);
    }

    #[test]
    fn ema_seed_is_sma() {
        let out = ema(&[10.0, 20.0, 30.0], 3);
        assert_relative_eq!(out[0], 20.0);
    }

    #[test]
    fn ema_recursive_calculation() {
        let out = ema(&[10.0, 20.0, 30.0, 40.0, 50.0], 3);

        let k = 2.0 / 4.0;
        let seed = 20.0;
        let e1 = 40.0 * k + seed * (1.0 - k);
        let e2 = 50.0 * k + e1 * (1.0 - k);

        assert_relative_eq!(out[0], seed);
        assert_relative_eq!(out[1], e1);
        assert_relative_eq!(out[2], e2);
    }

    #[test]
    fn ema_period_1_tracks_price() {
        let out = ema(&[10.0, 20.0, 30.0], 1);
        assert_eq!(out, vec![10.0, 20.0, 30.0]);
    }

    #[test]
    fn ema_equal_prices() {
        let out = ema(&[100.0; 6], 3);
        for v in out {
            assert_relative_eq!(v, 100.0);
        }
    }
}
