use thiserror::Error;

use market::MarketError;

/// Error code BingX returns for a symbol it does not list.
pub const CODE_UNKNOWN_SYMBOL: i64 = 109400;

#[derive(Error, Debug)]
pub enum BingxError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("bingx api error {code}: {msg}")]
    Api { code: i64, msg: String },

    #[error("unknown symbol: {0}")]
    UnknownSymbol(String),

    #[error("invalid response from bingx: {0}")]
    InvalidResponse(String),
}

impl From<BingxError> for MarketError {
    fn from(e: BingxError) -> Self {
        match e {
            BingxError::UnknownSymbol(symbol) => MarketError::UnknownInstrument(symbol),
            other => MarketError::Connectivity(other.to_string()),
        }
    }
}
