//! Batch orchestrator: drives classification, scoring and generation across
//! the full instrument universe and hands results to persistence.
//!
//! Strictly sequential. Cancellation is cooperative: the flag is checked
//! between instruments, never mid-call.

use crate::domain::catalog::StrategyCatalog;
use crate::domain::classifier::{classify, TierTable};
use crate::domain::error::StratgenError;
use crate::domain::generator::{generate_configuration, SeededJitter, StrategyConfiguration};
use crate::domain::scoring::find_best_strategies;
use crate::ports::market_port::MarketPort;
use crate::ports::store_port::{save_with_timestamp, StorePort};
use chrono::Utc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Default acceptance threshold: the single configurable gate for the
/// "is this instrument strategy-worthy" decision.
pub const DEFAULT_THRESHOLD: f64 = 30.0;
/// Store key for the generated configuration list.
pub const CONFIGS_KEY: &str = "strategy_configurations";

#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub threshold: f64,
    pub progress_every: usize,
    pub seed: u64,
    pub store_key: String,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            progress_every: 50,
            seed: 42,
            store_key: CONFIGS_KEY.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    pub generated: usize,
    pub total: usize,
    pub cancelled: bool,
}

/// Run one generation pass over the universe. At most one configuration per
/// instrument: the top-scoring profile, and only when it clears the
/// threshold. Classification failures cannot occur; universe-fetch and
/// persistence failures propagate and halt the batch.
pub fn run_batch(
    market: &dyn MarketPort,
    store: &dyn StorePort,
    catalog: &StrategyCatalog,
    tiers: &TierTable,
    opts: &BatchOptions,
    cancel: &AtomicBool,
) -> Result<BatchSummary, StratgenError> {
    let instruments = market.list_instruments()?;
    let total = instruments.len();
    let jitter = SeededJitter::new(opts.seed);
    let now = Utc::now();

    eprintln!("Scanning {} instruments...", total);

    let mut configs: Vec<StrategyConfiguration> = Vec::new();
    let mut cancelled = false;

    for (i, instrument) in instruments.iter().enumerate() {
        if cancel.load(Ordering::Relaxed) {
            eprintln!("Cancelled after {} of {} instruments", i, total);
            cancelled = true;
            break;
        }

        let chars = classify(instrument, tiers);
        let best = find_best_strategies(catalog, &chars, 1);

        if let Some(top) = best.first() {
            if top.score >= opts.threshold {
                let profile = catalog.get(&top.strategy_key).ok_or_else(|| {
                    StratgenError::UnknownStrategy {
                        key: top.strategy_key.clone(),
                    }
                })?;
                configs.push(generate_configuration(
                    profile, &chars, top.score, &jitter, now,
                ));
            }
        }

        let done = i + 1;
        if opts.progress_every > 0 && done % opts.progress_every == 0 {
            eprintln!(
                "  {}/{} instruments scanned, {} configurations",
                done,
                total,
                configs.len()
            );
        }
    }

    let generated = configs.len();

    if !cancelled {
        let payload =
            serde_json::to_string(&configs).map_err(|e| StratgenError::Store {
                key: opts.store_key.clone(),
                reason: format!("serialize failed: {}", e),
            })?;
        save_with_timestamp(store, &opts.store_key, &payload, now)?;
        eprintln!(
            "Generated {} configurations from {} instruments",
            generated, total
        );
    }

    Ok(BatchSummary {
        generated,
        total,
        cancelled,
    })
}
