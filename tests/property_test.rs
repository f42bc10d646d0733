use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use stratgen::domain::catalog::StrategyCatalog;
use stratgen::domain::classifier::{classify, Instrument, TierTable};
use stratgen::domain::generator::{generate_configuration, SeededJitter};
use stratgen::domain::indicator::{ema, macd_default, rsi, MacdTrend};
use stratgen::domain::scoring::{find_best_strategies, score_profile};

fn arb_prices(min_len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(1.0f64..10_000.0, min_len..200)
}

fn arb_base_coin() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "BTC", "ETH", "SOL", "DOGE", "PEPE", "TIA", "NONAME",
    ])
    .prop_map(str::to_string)
}

proptest! {
    #[test]
    fn rsi_stays_in_unit_range(prices in arb_prices(1), period in 1usize..50) {
        let value = rsi(&prices, period);
        prop_assert!((0.0..=100.0).contains(&value));
    }

    #[test]
    fn rsi_is_neutral_on_short_history(prices in arb_prices(1), period in 1usize..200) {
        prop_assume!(prices.len() < period + 1);
        prop_assert_eq!(rsi(&prices, period), 50.0);
    }

    #[test]
    fn ema_output_length_law(prices in arb_prices(1), period in 1usize..100) {
        let out = ema(&prices, period);
        let expected = if prices.len() < period { 0 } else { prices.len() - period + 1 };
        prop_assert_eq!(out.len(), expected);
    }

    #[test]
    fn macd_trend_agrees_with_histogram(prices in arb_prices(1)) {
        let out = macd_default(&prices);
        match out.trend {
            MacdTrend::Bullish => prop_assert!(out.macd > out.signal && out.histogram > 0.0),
            MacdTrend::Bearish => prop_assert!(out.macd < out.signal && out.histogram < 0.0),
            MacdTrend::Neutral => {}
        }
    }

    #[test]
    fn scores_stay_in_range_for_any_instrument(
        base in arb_base_coin(),
        max_leverage in 1u32..150,
    ) {
        let instrument = Instrument {
            symbol: format!("{}USDT", base),
            base_coin: base,
            max_leverage,
        };
        let chars = classify(&instrument, &TierTable::builtin());
        let catalog = StrategyCatalog::builtin();

        for profile in catalog.profiles() {
            let score = score_profile(&chars, profile);
            prop_assert!((0.0..=100.0).contains(&score));
        }
    }

    #[test]
    fn ranking_is_sorted_and_bounded(
        base in arb_base_coin(),
        max_leverage in 1u32..150,
        n in 0usize..30,
    ) {
        let instrument = Instrument {
            symbol: format!("{}USDT", base),
            base_coin: base,
            max_leverage,
        };
        let chars = classify(&instrument, &TierTable::builtin());
        let catalog = StrategyCatalog::builtin();

        let ranked = find_best_strategies(&catalog, &chars, n);
        prop_assert!(ranked.len() <= n.min(catalog.len()));
        for pair in ranked.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn generated_configs_respect_hard_limits(
        base in arb_base_coin(),
        max_leverage in 1u32..150,
        seed in any::<u64>(),
    ) {
        let instrument = Instrument {
            symbol: format!("{}USDT", base),
            base_coin: base,
            max_leverage,
        };
        let tiers = TierTable::builtin();
        let catalog = StrategyCatalog::builtin();
        let chars = classify(&instrument, &tiers);
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let jitter = SeededJitter::new(seed);

        for profile in catalog.profiles() {
            let score = score_profile(&chars, profile);
            let config = generate_configuration(profile, &chars, score, &jitter, now);

            prop_assert!(config.leverage >= 1);
            prop_assert!(config.leverage <= max_leverage.max(1));
            prop_assert!(config.stop_loss_pct < config.take_profit_pct);
            prop_assert!((1..=10).contains(&config.risk_score));
            prop_assert!((55.0..=95.0).contains(&config.expected_win_rate));
            prop_assert!((50.0..=95.0).contains(&config.synthetic_stats.win_rate));
            prop_assert!(config.synthetic_stats.profit_factor >= 1.1);
            prop_assert!(config.synthetic_stats.max_drawdown_pct <= 18.0);
        }
    }
}
