//! Domain error types.
//!
//! Only transport and configuration failures become errors. Data
//! insufficiency (short candle history, empty inputs) is absorbed locally
//! with neutral defaults and never surfaces here.

/// Top-level error type for stratgen.
#[derive(Debug, thiserror::Error)]
pub enum StratgenError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("universe fetch failed: {reason}")]
    Universe { reason: String },

    #[error("data error: {reason}")]
    Data { reason: String },

    #[error("store error for key {key}: {reason}")]
    Store { key: String, reason: String },

    #[error("unknown instrument: {symbol}")]
    UnknownInstrument { symbol: String },

    #[error("unknown strategy: {key}")]
    UnknownStrategy { key: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&StratgenError> for std::process::ExitCode {
    fn from(err: &StratgenError) -> Self {
        let code: u8 = match err {
            StratgenError::Io(_) => 1,
            StratgenError::ConfigParse { .. }
            | StratgenError::ConfigMissing { .. }
            | StratgenError::ConfigInvalid { .. } => 2,
            StratgenError::Store { .. } => 3,
            StratgenError::UnknownInstrument { .. } | StratgenError::UnknownStrategy { .. } => 4,
            StratgenError::Universe { .. } | StratgenError::Data { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
