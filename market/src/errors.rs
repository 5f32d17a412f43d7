use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarketError {
    /// Collaborator unreachable, timed out, or rejected the credentials.
    #[error("connectivity error: {0}")]
    Connectivity(String),

    #[error("unknown instrument: {0}")]
    UnknownInstrument(String),

    /// Series too short for the configured warm-up. The instrument is skipped
    /// for this cycle.
    #[error("insufficient data: have {have} bars, need {need}")]
    InsufficientData { have: usize, need: usize },

    /// Contract violation by the caller (mismatched lengths, bad parameters,
    /// unordered bars).
    #[error("invalid input: {0}")]
    InvalidInput(String),
}
