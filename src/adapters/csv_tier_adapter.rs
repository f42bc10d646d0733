//! CSV tier table loader.
//!
//! Overrides the compiled-in tier assignments from a `symbol,tier` CSV.
//! Recognised tiers: `large`, `mid`, `small`, `meme`, `retail`. A coin may
//! appear on several rows (e.g. `DOGE,mid` and `DOGE,meme`).

use crate::domain::classifier::{MarketCap, TierTable};
use crate::domain::error::StratgenError;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

pub fn load_tier_table<P: AsRef<Path>>(path: P) -> Result<TierTable, StratgenError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| StratgenError::Data {
        reason: format!("failed to read {}: {}", path.display(), e),
    })?;

    let mut rdr = csv::Reader::from_reader(content.as_bytes());
    let mut market_caps: HashMap<String, MarketCap> = HashMap::new();
    let mut meme = Vec::new();
    let mut retail = Vec::new();

    for result in rdr.records() {
        let record = result.map_err(|e| StratgenError::Data {
            reason: format!("CSV parse error: {}", e),
        })?;

        let symbol = record
            .get(0)
            .ok_or_else(|| StratgenError::Data {
                reason: "missing symbol column".into(),
            })?
            .to_uppercase();
        let tier = record.get(1).ok_or_else(|| StratgenError::Data {
            reason: "missing tier column".into(),
        })?;

        match tier.to_lowercase().as_str() {
            "large" => {
                market_caps.insert(symbol, MarketCap::Large);
            }
            "mid" => {
                market_caps.insert(symbol, MarketCap::Mid);
            }
            "small" => {
                market_caps.insert(symbol, MarketCap::Small);
            }
            "meme" => meme.push(symbol),
            "retail" => retail.push(symbol),
            other => {
                return Err(StratgenError::Data {
                    reason: format!("unknown tier '{}' for {}", other, symbol),
                });
            }
        }
    }

    Ok(TierTable::new(market_caps, meme, retail))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn loads_all_tier_kinds() {
        let file = write_csv(
            "symbol,tier\n\
             BTC,large\n\
             SOL,mid\n\
             TIA,small\n\
             PEPE,meme\n\
             DOGE,mid\n\
             DOGE,meme\n\
             DOGE,retail\n",
        );
        let table = load_tier_table(file.path()).unwrap();

        assert_eq!(table.market_cap("BTC"), MarketCap::Large);
        assert_eq!(table.market_cap("SOL"), MarketCap::Mid);
        assert_eq!(table.market_cap("TIA"), MarketCap::Small);
        assert_eq!(table.market_cap("DOGE"), MarketCap::Mid);
        assert!(table.is_meme("PEPE"));
        assert!(table.is_meme("DOGE"));
        assert!(table.is_retail_favourite("DOGE"));
    }

    #[test]
    fn absent_symbol_stays_micro() {
        let file = write_csv("symbol,tier\nBTC,large\n");
        let table = load_tier_table(file.path()).unwrap();
        assert_eq!(table.market_cap("ETH"), MarketCap::Micro);
    }

    #[test]
    fn symbols_are_uppercased() {
        let file = write_csv("symbol,tier\nbtc,large\n");
        let table = load_tier_table(file.path()).unwrap();
        assert_eq!(table.market_cap("BTC"), MarketCap::Large);
    }

    #[test]
    fn unknown_tier_is_an_error() {
        let file = write_csv("symbol,tier\nBTC,huge\n");
        assert!(matches!(
            load_tier_table(file.path()),
            Err(StratgenError::Data { .. })
        ));
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(matches!(
            load_tier_table("/nonexistent/tiers.csv"),
            Err(StratgenError::Data { .. })
        ));
    }
}
