//! Domain error types.

/// Top-level error type for tradesim.
#[derive(Debug, thiserror::Error)]
pub enum TradesimError {
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

    #[error("invalid strategy: {reason}")]
    InvalidStrategy { reason: String },

    #[error("no data available: {reason}")]
    DataUnavailable { reason: String },

    #[error("report error: {reason}")]
    Report { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&TradesimError> for std::process::ExitCode {
    fn from(err: &TradesimError) -> Self {
        let code: u8 = match err {
            TradesimError::Io(_) => 1,
            TradesimError::ConfigParse { .. }
            | TradesimError::ConfigMissing { .. }
            | TradesimError::ConfigInvalid { .. } => 2,
            TradesimError::InvalidStrategy { .. } => 3,
            TradesimError::DataUnavailable { .. } => 4,
            TradesimError::Report { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let err = TradesimError::ConfigMissing {
            section: "backtest".into(),
            key: "symbol".into(),
        };
        assert_eq!(err.to_string(), "missing config key [backtest] symbol");

        let err = TradesimError::DataUnavailable {
            reason: "no bars for AAPL".into(),
        };
        assert_eq!(err.to_string(), "no data available: no bars for AAPL");
    }

    #[test]
    fn invalid_strategy_message() {
        let err = TradesimError::InvalidStrategy {
            reason: "no strategy supplied".into(),
        };
        assert_eq!(err.to_string(), "invalid strategy: no strategy supplied");
    }
}
