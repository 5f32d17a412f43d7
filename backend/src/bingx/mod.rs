//! BingX perpetual-swap market data over REST.

pub mod client;
pub mod errors;
pub mod types;

pub use client::BingxClient;
pub use errors::BingxError;

pub const DEFAULT_BINGX_ENDPOINT: &str = "https://open-api.bingx.com";
