//! Instrument characteristic classifier.
//!
//! Deterministic, priority-ordered rules mapping an instrument's identity and
//! leverage limit to volatility/volume/market-cap/behavior categories. The
//! membership lists are data-driven through [`TierTable`] so the classifier
//! can be extended without code changes.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// One tradable instrument as reported by the universe provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instrument {
    pub symbol: String,
    pub base_coin: String,
    pub max_leverage: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarketCap {
    Large,
    Mid,
    Small,
    Micro,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Volatility {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VolumeTier {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrendBehavior {
    Trending,
    Ranging,
    Volatile,
}

/// Classified characteristics, recomputed per batch run and immutable
/// within it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentCharacteristics {
    pub symbol: String,
    pub volatility: Volatility,
    pub volume: VolumeTier,
    pub market_cap: MarketCap,
    pub trend_behavior: TrendBehavior,
    pub max_leverage: u32,
}

/// Base-coin membership table driving the classifier rules.
///
/// `market_caps` maps base coins to their cap tier (anything absent is
/// micro); `meme` and `retail` are the meme-asset and popular-retail
/// override lists.
#[derive(Debug, Clone)]
pub struct TierTable {
    market_caps: HashMap<String, MarketCap>,
    meme: Vec<String>,
    retail: Vec<String>,
}

const LARGE_CAPS: &[&str] = &["BTC", "ETH"];

const MID_CAPS: &[&str] = &[
    "SOL", "XRP", "ADA", "DOGE", "BNB", "AVAX", "DOT", "LINK", "MATIC", "LTC",
];

const SMALL_CAPS: &[&str] = &[
    "UNI", "ATOM", "NEAR", "APT", "ARB", "OP", "FIL", "INJ", "SUI", "TIA", "SEI", "ALGO",
];

const MEME_COINS: &[&str] = &[
    "PEPE", "SHIB", "FLOKI", "DOGE", "MEME", "BABY", "ELON", "BONK", "WIF",
];

const RETAIL_FAVOURITES: &[&str] = &["DOGE", "SHIB", "PEPE", "SOL", "XRP", "LINK"];

impl TierTable {
    pub fn new(
        market_caps: HashMap<String, MarketCap>,
        meme: Vec<String>,
        retail: Vec<String>,
    ) -> Self {
        Self {
            market_caps,
            meme,
            retail,
        }
    }

    /// Compiled-in default membership lists.
    pub fn builtin() -> Self {
        let mut market_caps = HashMap::new();
        for coin in LARGE_CAPS {
            market_caps.insert((*coin).to_string(), MarketCap::Large);
        }
        for coin in MID_CAPS {
            market_caps.insert((*coin).to_string(), MarketCap::Mid);
        }
        for coin in SMALL_CAPS {
            market_caps.insert((*coin).to_string(), MarketCap::Small);
        }

        Self {
            market_caps,
            meme: MEME_COINS.iter().map(|s| s.to_string()).collect(),
            retail: RETAIL_FAVOURITES.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn market_cap(&self, base_coin: &str) -> MarketCap {
        self.market_caps
            .get(base_coin)
            .copied()
            .unwrap_or(MarketCap::Micro)
    }

    pub fn is_meme(&self, base_coin: &str) -> bool {
        self.meme.iter().any(|m| m == base_coin)
    }

    pub fn is_retail_favourite(&self, base_coin: &str) -> bool {
        self.retail.iter().any(|r| r == base_coin)
    }
}

/// Classify one instrument. Rules are evaluated in fixed order, so the
/// outcome is fully deterministic.
pub fn classify(instrument: &Instrument, tiers: &TierTable) -> InstrumentCharacteristics {
    let base = instrument.base_coin.as_str();
    let market_cap = tiers.market_cap(base);

    let volatility = if market_cap == MarketCap::Large && instrument.max_leverage >= 75 {
        Volatility::Low
    } else if tiers.is_meme(base) || instrument.max_leverage <= 25 {
        Volatility::High
    } else {
        Volatility::Medium
    };

    let volume = if market_cap == MarketCap::Large || tiers.is_retail_favourite(base) {
        VolumeTier::High
    } else if market_cap == MarketCap::Mid {
        VolumeTier::Medium
    } else {
        VolumeTier::Low
    };

    let trend_behavior = if volatility == Volatility::High {
        TrendBehavior::Volatile
    } else if market_cap == MarketCap::Large
        || (market_cap == MarketCap::Mid && volume == VolumeTier::High)
    {
        TrendBehavior::Trending
    } else {
        TrendBehavior::Ranging
    };

    InstrumentCharacteristics {
        symbol: instrument.symbol.clone(),
        volatility,
        volume,
        market_cap,
        trend_behavior,
        max_leverage: instrument.max_leverage,
    }
}

impl fmt::Display for MarketCap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarketCap::Large => write!(f, "large"),
            MarketCap::Mid => write!(f, "mid"),
            MarketCap::Small => write!(f, "small"),
            MarketCap::Micro => write!(f, "micro"),
        }
    }
}

impl fmt::Display for Volatility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Volatility::Low => write!(f, "low"),
            Volatility::Medium => write!(f, "medium"),
            Volatility::High => write!(f, "high"),
        }
    }
}

impl fmt::Display for VolumeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VolumeTier::Low => write!(f, "low"),
            VolumeTier::Medium => write!(f, "medium"),
            VolumeTier::High => write!(f, "high"),
        }
    }
}

impl fmt::Display for TrendBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrendBehavior::Trending => write!(f, "trending"),
            TrendBehavior::Ranging => write!(f, "ranging"),
            TrendBehavior::Volatile => write!(f, "volatile"),
        }
    }
}
