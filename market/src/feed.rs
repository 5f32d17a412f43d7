//! Collaborator seams for market data.
//!
//! The scan engine only talks to these traits; concrete HTTP adapters live in
//! the binary crate and tests plug in in-memory mocks.

use async_trait::async_trait;

use crate::errors::MarketError;
use crate::types::{BarInterval, BarSeries, Instrument};

#[async_trait]
pub trait BarFeed: Send + Sync {
    /// Returns up to `limit` most recent bars, oldest first.
    ///
    /// Must distinguish `UnknownInstrument` from `Connectivity` failures.
    async fn fetch_bars(
        &self,
        symbol: &str,
        interval: BarInterval,
        limit: usize,
    ) -> Result<BarSeries, MarketError>;
}

#[async_trait]
pub trait InstrumentUniverse: Send + Sync {
    /// Instruments to consider this cycle, in scan order.
    async fn instruments(&self) -> Result<Vec<Instrument>, MarketError>;
}
