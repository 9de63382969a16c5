use std::num::ParseFloatError;
use thiserror::Error;

/// Coarse classification of an [`AnalysisError`], used by callers that only
/// care about which stage rejected the input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Parse,
    LengthMismatch,
    WeightSumInvalid,
    Computation,
}

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("could not convert {field} #{position} ('{token}') to a number: {source}")]
    Parse {
        field: &'static str,
        position: usize,
        token: String,
        #[source]
        source: ParseFloatError,
    },

    #[error("stock name #{position} is empty")]
    EmptyTicker { position: usize },

    #[error(
        "Number of stocks, returns, and weights must match (stocks: {tickers}, weights: {weights}, returns: {returns})"
    )]
    LengthMismatch {
        tickers: usize,
        weights: usize,
        returns: usize,
    },

    #[error("Weights must add up to 1.0 (got {sum:.4})")]
    WeightSumInvalid { sum: f64 },

    #[error("{0}")]
    Computation(String),
}

impl AnalysisError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Parse { .. } | Self::EmptyTicker { .. } => ErrorKind::Parse,
            Self::LengthMismatch { .. } => ErrorKind::LengthMismatch,
            Self::WeightSumInvalid { .. } => ErrorKind::WeightSumInvalid,
            Self::Computation(_) => ErrorKind::Computation,
        }
    }

    /// Message shown to the person at the form.
    pub fn user_message(&self) -> String {
        match self.kind() {
            ErrorKind::Computation => format!("Something went wrong:\n{}", self),
            _ => self.to_string(),
        }
    }
}

impl From<serde_json::Error> for AnalysisError {
    fn from(e: serde_json::Error) -> Self {
        Self::Computation(format!("failed to serialize result: {}", e))
    }
}
