//! Domain error types.

/// Top-level error type for pickwise.
#[derive(Debug, thiserror::Error)]
pub enum PickwiseError {
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

    #[error("trade store error: {reason}")]
    TradeStore { reason: String },

    #[error("invalid trade at index {index}: {reason}")]
    InvalidTrade { index: usize, reason: String },

    #[error("no trades selected; cannot derive an analysis window")]
    EmptyTradeSet,

    #[error("price data error for {symbol}: {reason}")]
    PriceData { symbol: String, reason: String },

    #[error("report error: {reason}")]
    Report { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&PickwiseError> for std::process::ExitCode {
    fn from(err: &PickwiseError) -> Self {
        let code: u8 = match err {
            PickwiseError::Io(_) | PickwiseError::Report { .. } => 1,
            PickwiseError::ConfigParse { .. }
            | PickwiseError::ConfigMissing { .. }
            | PickwiseError::ConfigInvalid { .. } => 2,
            PickwiseError::TradeStore { .. } => 3,
            PickwiseError::InvalidTrade { .. } | PickwiseError::EmptyTradeSet => 4,
            PickwiseError::PriceData { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
