//! Market data port trait: instrument universe and price history providers.

use crate::domain::candle::Candle;
use crate::domain::classifier::Instrument;
use crate::domain::error::StratgenError;

pub trait MarketPort {
    /// All tradable instruments. A failure here is terminal for the batch.
    fn list_instruments(&self) -> Result<Vec<Instrument>, StratgenError>;

    /// Up to `limit` candles for `symbol` at `interval`, ascending by
    /// timestamp. An unknown symbol yields an empty sequence, not an error.
    fn fetch_candles(
        &self,
        symbol: &str,
        interval: &str,
        limit: usize,
    ) -> Result<Vec<Candle>, StratgenError>;
}
