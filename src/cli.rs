//! CLI definition and dispatch.
//!
//! Human-readable progress goes to stderr; machine-consumable output (JSON,
//! symbol lists) goes to stdout.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::atomic::AtomicBool;

use crate::adapters::csv_market_adapter::CsvMarketAdapter;
use crate::adapters::csv_tier_adapter::load_tier_table;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::json_store_adapter::JsonStoreAdapter;
use crate::domain::analysis::{self, compute_indicators};
use crate::domain::batch::{run_batch, BatchOptions};
use crate::domain::catalog::StrategyCatalog;
use crate::domain::classifier::{classify, Instrument, TierTable};
use crate::domain::error::StratgenError;
use crate::domain::scoring::find_best_strategies;
use crate::ports::config_port::ConfigPort;
use crate::ports::market_port::MarketPort;

#[derive(Parser, Debug)]
#[command(name = "stratgen", about = "Trading strategy configuration generator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate configurations for the whole instrument universe
    Generate {
        #[arg(short, long)]
        config: PathBuf,
        /// Override the acceptance threshold from the config file
        #[arg(long)]
        threshold: Option<f64>,
        /// Override the jitter seed from the config file
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Classify one instrument's characteristics
    Classify {
        symbol: String,
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Rank strategy profiles for one instrument
    Match {
        symbol: String,
        /// Number of profiles to show
        #[arg(long, default_value_t = 5)]
        top: usize,
        /// Scores below this are flagged as weak matches
        #[arg(long, default_value_t = 60.0)]
        threshold: f64,
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Compute an indicator snapshot for one symbol
    Indicators {
        symbol: String,
        #[arg(short, long)]
        config: PathBuf,
    },
    /// List the built-in strategy catalog
    ListStrategies,
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Generate {
            config,
            threshold,
            seed,
        } => run_generate(&config, threshold, seed),
        Command::Classify { symbol, config } => run_classify(&symbol, &config),
        Command::Match {
            symbol,
            top,
            threshold,
            config,
        } => run_match(&symbol, top, threshold, &config),
        Command::Indicators { symbol, config } => run_indicators(&symbol, &config),
        Command::ListStrategies => run_list_strategies(),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = StratgenError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

pub fn build_market(config: &dyn ConfigPort) -> Result<CsvMarketAdapter, StratgenError> {
    let instruments_file = config
        .get_string("universe", "instruments_file")
        .ok_or_else(|| StratgenError::ConfigMissing {
            section: "universe".into(),
            key: "instruments_file".into(),
        })?;
    let candles_dir =
        config
            .get_string("data", "candles_dir")
            .ok_or_else(|| StratgenError::ConfigMissing {
                section: "data".into(),
                key: "candles_dir".into(),
            })?;
    Ok(CsvMarketAdapter::new(
        PathBuf::from(instruments_file),
        PathBuf::from(candles_dir),
    ))
}

pub fn build_tiers(config: &dyn ConfigPort) -> Result<TierTable, StratgenError> {
    match config.get_string("universe", "tiers_file") {
        Some(path) => load_tier_table(&path),
        None => Ok(TierTable::builtin()),
    }
}

pub fn build_store(config: &dyn ConfigPort) -> JsonStoreAdapter {
    let dir = config
        .get_string("store", "dir")
        .unwrap_or_else(|| "stratgen_store".to_string());
    JsonStoreAdapter::new(PathBuf::from(dir))
}

pub fn build_batch_options(
    config: &dyn ConfigPort,
    threshold_override: Option<f64>,
    seed_override: Option<u64>,
) -> BatchOptions {
    let defaults = BatchOptions::default();
    BatchOptions {
        threshold: threshold_override
            .unwrap_or_else(|| config.get_double("generation", "threshold", defaults.threshold)),
        progress_every: config.get_int(
            "generation",
            "progress_every",
            defaults.progress_every as i64,
        ) as usize,
        seed: seed_override
            .unwrap_or_else(|| config.get_int("generation", "seed", defaults.seed as i64) as u64),
        store_key: config
            .get_string("store", "key")
            .unwrap_or(defaults.store_key),
    }
}

/// Look up one instrument in the universe, case-insensitively.
pub fn find_instrument(
    market: &dyn MarketPort,
    symbol: &str,
) -> Result<Instrument, StratgenError> {
    market
        .list_instruments()?
        .into_iter()
        .find(|i| i.symbol.eq_ignore_ascii_case(symbol))
        .ok_or_else(|| StratgenError::UnknownInstrument {
            symbol: symbol.to_uppercase(),
        })
}

fn run_generate(
    config_path: &PathBuf,
    threshold_override: Option<f64>,
    seed_override: Option<u64>,
) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let market = match build_market(&config) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let tiers = match build_tiers(&config) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let store = build_store(&config);
    let opts = build_batch_options(&config, threshold_override, seed_override);
    let catalog = StrategyCatalog::builtin();

    eprintln!(
        "Generating configurations (threshold {}, seed {})",
        opts.threshold, opts.seed
    );

    let cancel = AtomicBool::new(false);
    match run_batch(&market, &store, &catalog, &tiers, &opts, &cancel) {
        Ok(summary) => {
            println!(
                "{{\"generated\":{},\"total\":{},\"store_key\":\"{}\"}}",
                summary.generated, summary.total, opts.store_key
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_classify(symbol: &str, config_path: &PathBuf) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let market = match build_market(&config) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let tiers = match build_tiers(&config) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let instrument = match find_instrument(&market, symbol) {
        Ok(i) => i,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let chars = classify(&instrument, &tiers);
    eprintln!(
        "{}: {} cap, {} volatility, {} volume, {}",
        instrument.symbol, chars.market_cap, chars.volatility, chars.volume, chars.trend_behavior
    );

    match serde_json::to_string_pretty(&chars) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to serialize characteristics: {e}");
            ExitCode::from(1)
        }
    }
}

fn run_match(symbol: &str, top: usize, threshold: f64, config_path: &PathBuf) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let market = match build_market(&config) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let tiers = match build_tiers(&config) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let instrument = match find_instrument(&market, symbol) {
        Ok(i) => i,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let catalog = StrategyCatalog::builtin();
    let chars = classify(&instrument, &tiers);
    let ranked = find_best_strategies(&catalog, &chars, top);

    eprintln!("Top {} matches for {}:", ranked.len(), instrument.symbol);
    for entry in &ranked {
        let flag = if entry.score >= threshold { "" } else { "  (weak)" };
        eprintln!("  {:<20} {:>5.1}{}", entry.strategy_key, entry.score, flag);
    }

    match serde_json::to_string_pretty(&ranked) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to serialize matches: {e}");
            ExitCode::from(1)
        }
    }
}

fn run_indicators(symbol: &str, config_path: &PathBuf) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let market = match build_market(&config) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let interval = config
        .get_string("data", "interval")
        .unwrap_or_else(|| "1h".to_string());
    let limit =
        config.get_int("data", "candle_limit", analysis::CANDLE_LIMIT as i64) as usize;

    let symbol = symbol.to_uppercase();
    eprintln!("Computing indicators for {} ({} candles @ {})", symbol, limit, interval);
    let set = compute_indicators(&market, &symbol, &interval, limit);

    eprintln!(
        "  RSI {:.1}, MACD {}, trend {}, momentum {}",
        set.rsi, set.macd.trend, set.trend, set.momentum
    );

    match serde_json::to_string_pretty(&set) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to serialize indicators: {e}");
            ExitCode::from(1)
        }
    }
}

fn run_list_strategies() -> ExitCode {
    let catalog = StrategyCatalog::builtin();

    for profile in catalog.profiles() {
        println!(
            "{:<20} {:<24} {:<16} {:<5} {}",
            profile.key, profile.name, profile.category, profile.timeframe, profile.risk_level
        );
    }
    eprintln!("{} strategies", catalog.len());
    ExitCode::SUCCESS
}
