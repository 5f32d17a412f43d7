use serde::Serialize;

use crate::pipeline::IndicatorRow;
use crate::signal::Signal;

/// One classified instrument and the row that produced its signal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanEntry {
    pub symbol: String,
    pub row: IndicatorRow,
}

/// Classified instruments for a single scan cycle.
///
/// Grouped by signal; within a group entries keep insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScanResultSet {
    bullish: Vec<ScanEntry>,
    bearish: Vec<ScanEntry>,
}

impl ScanResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `symbol` under `signal`. `Signal::None` is dropped; returns
    /// whether the entry was kept.
    pub fn record(&mut self, symbol: impl Into<String>, signal: Signal, row: IndicatorRow) -> bool {
        let entry = ScanEntry {
            symbol: symbol.into(),
            row,
        };
        match signal {
            Signal::Bullish => self.bullish.push(entry),
            Signal::Bearish => self.bearish.push(entry),
            Signal::None => return false,
        }
        true
    }

    pub fn entries(&self, signal: Signal) -> &[ScanEntry] {
        match signal {
            Signal::Bullish => &self.bullish,
            Signal::Bearish => &self.bearish,
            Signal::None => &[],
        }
    }

    pub fn len(&self) -> usize {
        self.bullish.len() + self.bearish.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
