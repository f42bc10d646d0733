//! Indicator snapshot for one symbol over the price-history port.
//!
//! The contract is "always return usable data": a failed or too-short candle
//! fetch is logged and replaced with an all-neutral snapshot, never surfaced
//! to the caller.

use crate::domain::candle::closes;
use crate::domain::indicator::rsi::DEFAULT_PERIOD;
use crate::domain::indicator::{
    ema, macd_default, rsi, support_resistance, IndicatorSet, MacdTrend, Momentum, Trend,
};
use crate::ports::market_port::MarketPort;

/// Candles requested per snapshot.
pub const CANDLE_LIMIT: usize = 100;
/// Below this many candles the snapshot degrades to all-neutral.
pub const MIN_CANDLES: usize = 50;

const RSI_OVERBOUGHT: f64 = 70.0;
const RSI_OVERSOLD: f64 = 30.0;
const RSI_LEAN_BULLISH: f64 = 55.0;
const RSI_LEAN_BEARISH: f64 = 45.0;

pub fn compute_indicators(
    market: &dyn MarketPort,
    symbol: &str,
    interval: &str,
    limit: usize,
) -> IndicatorSet {
    let candles = match market.fetch_candles(symbol, interval, limit) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("warning: candle fetch failed for {} ({})", symbol, e);
            return IndicatorSet::neutral(0.0);
        }
    };

    if candles.len() < MIN_CANDLES {
        eprintln!(
            "warning: {} has only {} candles (minimum {}), using neutral indicators",
            symbol,
            candles.len(),
            MIN_CANDLES
        );
        let last_price = candles.last().map(|c| c.close).unwrap_or(0.0);
        return IndicatorSet::neutral(last_price);
    }

    let prices = closes(&candles);
    let price = *prices.last().unwrap_or(&0.0);

    let rsi_value = rsi(&prices, DEFAULT_PERIOD);
    let macd_out = macd_default(&prices);
    let ema20 = ema(&prices, 20).last().copied().unwrap_or(price);
    let ema50 = ema(&prices, 50).last().copied().unwrap_or(price);
    let (support, resistance) = support_resistance(&candles);

    let trend = composite_trend(ema20, ema50, price);
    let momentum = derive_momentum(rsi_value, macd_out.trend, trend);

    IndicatorSet {
        rsi: rsi_value,
        macd: macd_out,
        ema20,
        ema50,
        support,
        resistance,
        trend,
        momentum,
    }
}

/// Uptrend iff ema20 > ema50 and price above ema20; mirror for Downtrend.
pub fn composite_trend(ema20: f64, ema50: f64, price: f64) -> Trend {
    if ema20 > ema50 && price > ema20 {
        Trend::Uptrend
    } else if ema20 < ema50 && price < ema20 {
        Trend::Downtrend
    } else {
        Trend::Sideways
    }
}

/// Strong labels need RSI extremity, MACD trend and composite trend agreeing
/// in direction simultaneously; two of three leaning signals give the plain
/// label; anything else is Neutral.
pub fn derive_momentum(rsi: f64, macd_trend: MacdTrend, trend: Trend) -> Momentum {
    if rsi >= RSI_OVERBOUGHT && macd_trend == MacdTrend::Bullish && trend == Trend::Uptrend {
        return Momentum::StrongBullish;
    }
    if rsi <= RSI_OVERSOLD && macd_trend == MacdTrend::Bearish && trend == Trend::Downtrend {
        return Momentum::StrongBearish;
    }

    let bullish = [
        rsi >= RSI_LEAN_BULLISH,
        macd_trend == MacdTrend::Bullish,
        trend == Trend::Uptrend,
    ]
    .iter()
    .filter(|&&b| b)
    .count();

    let bearish = [
        rsi <= RSI_LEAN_BEARISH,
        macd_trend == MacdTrend::Bearish,
        trend == Trend::Downtrend,
    ]
    .iter()
    .filter(|&&b| b)
    .count();

    if bullish >= 2 {
        Momentum::Bullish
    } else if bearish >= 2 {
        Momentum::Bearish
    } else {
        Momentum::Neutral
    }
}
