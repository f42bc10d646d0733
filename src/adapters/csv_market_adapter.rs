//! CSV-backed market data adapter.
//!
//! The universe lives in a single `instruments.csv` with columns
//! `symbol,base_coin,max_leverage`. Candles live one file per symbol and
//! interval, named `<SYMBOL>_<interval>.csv`, with columns
//! `timestamp,open,high,low,close,volume` (RFC 3339 timestamps).

use crate::domain::candle::Candle;
use crate::domain::classifier::Instrument;
use crate::domain::error::StratgenError;
use crate::ports::market_port::MarketPort;
use chrono::{DateTime, Utc};
use std::fs;
use std::path::PathBuf;

#[derive(Debug)]
pub struct CsvMarketAdapter {
    instruments_file: PathBuf,
    candles_dir: PathBuf,
}

impl CsvMarketAdapter {
    pub fn new(instruments_file: PathBuf, candles_dir: PathBuf) -> Self {
        Self {
            instruments_file,
            candles_dir,
        }
    }

    fn candle_path(&self, symbol: &str, interval: &str) -> PathBuf {
        self.candles_dir.join(format!("{}_{}.csv", symbol, interval))
    }

    fn field<'a>(
        record: &'a csv::StringRecord,
        idx: usize,
        name: &str,
    ) -> Result<&'a str, StratgenError> {
        record.get(idx).ok_or_else(|| StratgenError::Data {
            reason: format!("missing {} column", name),
        })
    }

    fn parse_f64(record: &csv::StringRecord, idx: usize, name: &str) -> Result<f64, StratgenError> {
        Self::field(record, idx, name)?
            .parse()
            .map_err(|e| StratgenError::Data {
                reason: format!("invalid {} value: {}", name, e),
            })
    }
}

impl MarketPort for CsvMarketAdapter {
    fn list_instruments(&self) -> Result<Vec<Instrument>, StratgenError> {
        let content =
            fs::read_to_string(&self.instruments_file).map_err(|e| StratgenError::Universe {
                reason: format!(
                    "failed to read {}: {}",
                    self.instruments_file.display(),
                    e
                ),
            })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut instruments = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| StratgenError::Universe {
                reason: format!("CSV parse error: {}", e),
            })?;

            let symbol = Self::field(&record, 0, "symbol").map_err(universe)?;
            let base_coin = Self::field(&record, 1, "base_coin").map_err(universe)?;
            let max_leverage: u32 = Self::field(&record, 2, "max_leverage")
                .map_err(universe)?
                .parse()
                .map_err(|e| StratgenError::Universe {
                    reason: format!("invalid max_leverage value: {}", e),
                })?;

            instruments.push(Instrument {
                symbol: symbol.to_string(),
                base_coin: base_coin.to_string(),
                max_leverage,
            });
        }

        Ok(instruments)
    }

    fn fetch_candles(
        &self,
        symbol: &str,
        interval: &str,
        limit: usize,
    ) -> Result<Vec<Candle>, StratgenError> {
        let path = self.candle_path(symbol, interval);
        // An instrument without a history file has no candles, not an error.
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(StratgenError::Data {
                    reason: format!("failed to read {}: {}", path.display(), e),
                });
            }
        };

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut candles = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| StratgenError::Data {
                reason: format!("CSV parse error: {}", e),
            })?;

            let raw_ts = Self::field(&record, 0, "timestamp")?;
            let timestamp = DateTime::parse_from_rfc3339(raw_ts)
                .map_err(|e| StratgenError::Data {
                    reason: format!("invalid timestamp: {}", e),
                })?
                .with_timezone(&Utc);

            candles.push(Candle {
                timestamp,
                open: Self::parse_f64(&record, 1, "open")?,
                high: Self::parse_f64(&record, 2, "high")?,
                low: Self::parse_f64(&record, 3, "low")?,
                close: Self::parse_f64(&record, 4, "close")?,
                volume: Self::parse_f64(&record, 5, "volume")?,
            });
        }

        candles.sort_by_key(|c| c.timestamp);
        if candles.len() > limit {
            candles.drain(..candles.len() - limit);
        }
        Ok(candles)
    }
}

fn universe(err: StratgenError) -> StratgenError {
    match err {
        StratgenError::Data { reason } => StratgenError::Universe { reason },
        other => other,
    }
}
