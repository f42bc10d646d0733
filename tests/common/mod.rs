#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use std::collections::HashMap;
use std::sync::Mutex;
use stratgen::domain::candle::Candle;
use stratgen::domain::classifier::Instrument;
use stratgen::domain::error::StratgenError;
use stratgen::ports::market_port::MarketPort;
use stratgen::ports::store_port::StorePort;

pub struct MockMarketPort {
    pub instruments: Vec<Instrument>,
    pub candles: HashMap<String, Vec<Candle>>,
    pub universe_error: Option<String>,
    pub candle_errors: HashMap<String, String>,
}

impl MockMarketPort {
    pub fn new() -> Self {
        Self {
            instruments: Vec::new(),
            candles: HashMap::new(),
            universe_error: None,
            candle_errors: HashMap::new(),
        }
    }

    pub fn with_instrument(mut self, symbol: &str, base_coin: &str, max_leverage: u32) -> Self {
        self.instruments.push(Instrument {
            symbol: symbol.to_string(),
            base_coin: base_coin.to_string(),
            max_leverage,
        });
        self
    }

    pub fn with_candles(mut self, symbol: &str, candles: Vec<Candle>) -> Self {
        self.candles.insert(symbol.to_string(), candles);
        self
    }

    pub fn with_universe_error(mut self, reason: &str) -> Self {
        self.universe_error = Some(reason.to_string());
        self
    }

    pub fn with_candle_error(mut self, symbol: &str, reason: &str) -> Self {
        self.candle_errors
            .insert(symbol.to_string(), reason.to_string());
        self
    }
}

impl MarketPort for MockMarketPort {
    fn list_instruments(&self) -> Result<Vec<Instrument>, StratgenError> {
        if let Some(reason) = &self.universe_error {
            return Err(StratgenError::Universe {
                reason: reason.clone(),
            });
        }
        Ok(self.instruments.clone())
    }

    fn fetch_candles(
        &self,
        symbol: &str,
        _interval: &str,
        limit: usize,
    ) -> Result<Vec<Candle>, StratgenError> {
        if let Some(reason) = self.candle_errors.get(symbol) {
            return Err(StratgenError::Data {
                reason: reason.clone(),
            });
        }
        let mut candles = self.candles.get(symbol).cloned().unwrap_or_default();
        if candles.len() > limit {
            candles.drain(..candles.len() - limit);
        }
        Ok(candles)
    }
}

pub struct MemoryStore {
    pub entries: Mutex<HashMap<String, String>>,
    pub fail_saves: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            fail_saves: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            fail_saves: true,
        }
    }
}

impl StorePort for MemoryStore {
    fn save(&self, key: &str, value: &str) -> Result<(), StratgenError> {
        if self.fail_saves {
            return Err(StratgenError::Store {
                key: key.to_string(),
                reason: "simulated store failure".to_string(),
            });
        }
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<String>, StratgenError> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }
}

pub fn ts(hours: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap() + Duration::hours(hours)
}

pub fn candle_at(hours: i64, close: f64) -> Candle {
    Candle {
        timestamp: ts(hours),
        open: close * 0.99,
        high: close * 1.01,
        low: close * 0.98,
        close,
        volume: 1000.0,
    }
}

/// Candles whose closes grow by a constant ratio, so the last close equals
/// `end` exactly.
pub fn geometric_candles(start: f64, end: f64, count: usize) -> Vec<Candle> {
    let ratio = if count > 1 {
        (end / start).powf(1.0 / (count - 1) as f64)
    } else {
        1.0
    };
    (0..count)
        .map(|i| candle_at(i as i64, start * ratio.powi(i as i32)))
        .collect()
}

pub fn flat_candles(price: f64, count: usize) -> Vec<Candle> {
    (0..count).map(|i| candle_at(i as i64, price)).collect()
}

/// Candles whose closes change by a constant increment from `start` to `end`.
pub fn linear_candles(start: f64, end: f64, count: usize) -> Vec<Candle> {
    let step = if count > 1 {
        (end - start) / (count - 1) as f64
    } else {
        0.0
    };
    (0..count)
        .map(|i| candle_at(i as i64, start + step * i as f64))
        .collect()
}

/// A decline whose absolute decrements grow each candle, mirroring a
/// geometric rise.
pub fn accelerating_fall_candles(start: f64, end: f64, count: usize) -> Vec<Candle> {
    geometric_candles(end, start, count)
        .into_iter()
        .enumerate()
        .map(|(i, c)| candle_at(i as i64, start + end - c.close))
        .collect()
}
