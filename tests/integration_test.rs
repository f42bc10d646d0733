mod common;

use chrono::{Duration, TimeZone, Utc};
use common::*;
use std::sync::atomic::AtomicBool;
use stratgen::domain::analysis::{compute_indicators, CANDLE_LIMIT};
use stratgen::domain::batch::{run_batch, BatchOptions, CONFIGS_KEY};
use stratgen::domain::catalog::StrategyCatalog;
use stratgen::domain::classifier::{classify, TierTable};
use stratgen::domain::error::StratgenError;
use stratgen::domain::generator::{generate_configuration, SeededJitter, StrategyConfiguration};
use stratgen::domain::indicator::{MacdTrend, Momentum, Trend};
use stratgen::domain::scoring::find_best_strategies;
use stratgen::ports::store_port::{self, StorePort};

#[test]
fn batch_pipeline_persists_valid_configurations() {
    let market = MockMarketPort::new()
        .with_instrument("BTCUSDT", "BTC", 100)
        .with_instrument("SOLUSDT", "SOL", 50)
        .with_instrument("PEPEUSDT", "PEPE", 25);
    let store = MemoryStore::new();
    let catalog = StrategyCatalog::builtin();
    let tiers = TierTable::builtin();

    let summary = run_batch(
        &market,
        &store,
        &catalog,
        &tiers,
        &BatchOptions::default(),
        &AtomicBool::new(false),
    )
    .unwrap();

    assert_eq!(summary.total, 3);
    assert!(summary.generated >= 1);
    assert!(summary.generated <= 3);

    let raw = store.load(CONFIGS_KEY).unwrap().unwrap();
    let configs: Vec<StrategyConfiguration> = serde_json::from_str(&raw).unwrap();
    assert_eq!(configs.len(), summary.generated);

    for config in &configs {
        let max = market
            .instruments
            .iter()
            .find(|i| i.symbol == config.symbol)
            .unwrap()
            .max_leverage;
        assert!(config.leverage >= 1);
        assert!(config.leverage <= max);
        assert!(config.stop_loss_pct < config.take_profit_pct);
        assert!((1..=10).contains(&config.risk_score));
        assert!((55.0..=95.0).contains(&config.expected_win_rate));
        assert!(!config.indicators.is_empty());
    }

    // One configuration per instrument at most.
    let mut symbols: Vec<_> = configs.iter().map(|c| c.symbol.clone()).collect();
    symbols.dedup();
    assert_eq!(symbols.len(), configs.len());
}

#[test]
fn interactive_threshold_promotes_exactly_one_of_three() {
    // BTC matches a trend profile perfectly; the two thin micro caps top out
    // just under 60 (volatility profiles lose the volume term and most of
    // the leverage ramp).
    let market = MockMarketPort::new()
        .with_instrument("BTCUSDT", "BTC", 100)
        .with_instrument("AAAUSDT", "AAA", 5)
        .with_instrument("BBBUSDT", "BBB", 4);
    let store = MemoryStore::new();
    let opts = BatchOptions {
        threshold: 60.0,
        ..BatchOptions::default()
    };

    let summary = run_batch(
        &market,
        &store,
        &StrategyCatalog::builtin(),
        &TierTable::builtin(),
        &opts,
        &AtomicBool::new(false),
    )
    .unwrap();

    assert_eq!(summary.generated, 1);

    let raw = store.load(CONFIGS_KEY).unwrap().unwrap();
    let configs: Vec<StrategyConfiguration> = serde_json::from_str(&raw).unwrap();
    assert_eq!(configs[0].symbol, "BTCUSDT");
    assert!(configs[0].leverage <= 100);
}

#[test]
fn batch_writes_companion_timestamp() {
    let market = MockMarketPort::new().with_instrument("BTCUSDT", "BTC", 100);
    let store = MemoryStore::new();

    run_batch(
        &market,
        &store,
        &StrategyCatalog::builtin(),
        &TierTable::builtin(),
        &BatchOptions::default(),
        &AtomicBool::new(false),
    )
    .unwrap();

    let stamp = store
        .load(&store_port::timestamp_key(CONFIGS_KEY))
        .unwrap()
        .unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(&stamp).is_ok());

    let now = Utc::now();
    assert!(!store_port::is_stale(&store, CONFIGS_KEY, Duration::hours(1), now).unwrap());
    assert!(
        store_port::is_stale(&store, CONFIGS_KEY, Duration::hours(1), now + Duration::hours(2))
            .unwrap()
    );
}

#[test]
fn cancelled_batch_persists_nothing() {
    let market = MockMarketPort::new().with_instrument("BTCUSDT", "BTC", 100);
    let store = MemoryStore::new();

    let summary = run_batch(
        &market,
        &store,
        &StrategyCatalog::builtin(),
        &TierTable::builtin(),
        &BatchOptions::default(),
        &AtomicBool::new(true),
    )
    .unwrap();

    assert!(summary.cancelled);
    assert!(store.load(CONFIGS_KEY).unwrap().is_none());
}

#[test]
fn universe_failure_halts_batch() {
    let market = MockMarketPort::new().with_universe_error("exchange unreachable");
    let store = MemoryStore::new();

    let result = run_batch(
        &market,
        &store,
        &StrategyCatalog::builtin(),
        &TierTable::builtin(),
        &BatchOptions::default(),
        &AtomicBool::new(false),
    );

    assert!(matches!(result, Err(StratgenError::Universe { .. })));
}

#[test]
fn store_failure_halts_batch() {
    let market = MockMarketPort::new().with_instrument("BTCUSDT", "BTC", 100);
    let store = MemoryStore::failing();

    let result = run_batch(
        &market,
        &store,
        &StrategyCatalog::builtin(),
        &TierTable::builtin(),
        &BatchOptions::default(),
        &AtomicBool::new(false),
    );

    assert!(matches!(result, Err(StratgenError::Store { .. })));
}

#[test]
fn uptrend_snapshot_reads_bullish() {
    let market = MockMarketPort::new()
        .with_candles("BTCUSDT", geometric_candles(100.0, 200.0, CANDLE_LIMIT));

    let set = compute_indicators(&market, "BTCUSDT", "1h", CANDLE_LIMIT);

    assert!(set.rsi > 50.0);
    assert_eq!(set.macd.trend, MacdTrend::Bullish);
    assert_eq!(set.trend, Trend::Uptrend);
    assert_eq!(set.momentum, Momentum::StrongBullish);
    assert!(set.support < set.resistance);
}

#[test]
fn steady_climb_snapshot_reads_strong_bullish() {
    // Constant increments push the MACD histogram into rounding noise around
    // zero; the snapshot must still read the climb as strongly bullish.
    let market = MockMarketPort::new()
        .with_candles("BTCUSDT", linear_candles(100.0, 200.0, CANDLE_LIMIT));

    let set = compute_indicators(&market, "BTCUSDT", "1h", CANDLE_LIMIT);

    assert_eq!(set.macd.trend, MacdTrend::Bullish);
    assert_eq!(set.trend, Trend::Uptrend);
    assert_eq!(set.momentum, Momentum::StrongBullish);
}

#[test]
fn downtrend_snapshot_reads_bearish() {
    let market = MockMarketPort::new()
        .with_candles("BTCUSDT", accelerating_fall_candles(200.0, 100.0, CANDLE_LIMIT));

    let set = compute_indicators(&market, "BTCUSDT", "1h", CANDLE_LIMIT);

    assert!(set.rsi < 50.0);
    assert_eq!(set.macd.trend, MacdTrend::Bearish);
    assert_eq!(set.trend, Trend::Downtrend);
    assert_eq!(set.momentum, Momentum::StrongBearish);
}

#[test]
fn short_history_degrades_to_neutral_snapshot() {
    let market = MockMarketPort::new().with_candles("NEWUSDT", flat_candles(10.0, 12));

    let set = compute_indicators(&market, "NEWUSDT", "1h", CANDLE_LIMIT);

    assert_eq!(set.rsi, 50.0);
    assert_eq!(set.trend, Trend::Sideways);
    assert_eq!(set.momentum, Momentum::Neutral);
    assert_eq!(set.support, 10.0 * 0.95);
    assert_eq!(set.resistance, 10.0 * 1.05);
}

#[test]
fn candle_failure_degrades_to_neutral_snapshot() {
    let market = MockMarketPort::new().with_candle_error("BTCUSDT", "feed down");

    let set = compute_indicators(&market, "BTCUSDT", "1h", CANDLE_LIMIT);

    assert_eq!(set.rsi, 50.0);
    assert_eq!(set.momentum, Momentum::Neutral);
}

#[test]
fn classify_and_match_rank_sensible_profiles_for_btc() {
    let market = MockMarketPort::new().with_instrument("BTCUSDT", "BTC", 100);
    let instrument = &market.instruments[0];
    let chars = classify(instrument, &TierTable::builtin());
    let catalog = StrategyCatalog::builtin();

    let ranked = find_best_strategies(&catalog, &chars, 5);

    assert_eq!(ranked.len(), 5);
    for pair in ranked.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
    // A large-cap trending instrument should clear the interactive bar.
    assert!(ranked[0].score >= 60.0);
    let top = catalog.get(&ranked[0].strategy_key).unwrap();
    assert!(!top
        .optimal_behavior
        .contains(&stratgen::domain::classifier::TrendBehavior::Volatile));
}

#[test]
fn generation_is_deterministic_per_seed_and_symbol() {
    let tiers = TierTable::builtin();
    let catalog = StrategyCatalog::builtin();
    let market = MockMarketPort::new().with_instrument("SOLUSDT", "SOL", 50);
    let chars = classify(&market.instruments[0], &tiers);
    let ranked = find_best_strategies(&catalog, &chars, 1);
    let profile = catalog.get(&ranked[0].strategy_key).unwrap();
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();

    let a = generate_configuration(profile, &chars, ranked[0].score, &SeededJitter::new(7), now);
    let b = generate_configuration(profile, &chars, ranked[0].score, &SeededJitter::new(7), now);
    let c = generate_configuration(profile, &chars, ranked[0].score, &SeededJitter::new(8), now);

    assert_eq!(a, b);
    assert_eq!(a.synthetic_stats, b.synthetic_stats);
    // A different seed shifts the synthetic statistics.
    assert_ne!(a.synthetic_stats, c.synthetic_stats);
}
