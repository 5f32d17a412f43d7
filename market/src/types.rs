use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::MarketError;

/// One OHLCV sample for a fixed interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Interval open time, unix milliseconds.
    pub ts_ms: u64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// Time-ordered bars for one instrument.
///
/// Timestamps are strictly increasing; construction rejects anything else.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BarSeries {
    bars: Vec<Bar>,
}

impl BarSeries {
    pub fn new(bars: Vec<Bar>) -> Result<Self, MarketError> {
        if let Some(pos) = bars.windows(2).position(|w| w[1].ts_ms <= w[0].ts_ms) {
            return Err(MarketError::InvalidInput(format!(
                "bar timestamps not strictly increasing at index {}",
                pos + 1
            )));
        }
        Ok(Self { bars })
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn last(&self) -> Option<&Bar> {
        self.bars.last()
    }

    pub fn highs(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.high).collect()
    }

    pub fn lows(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.low).collect()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }
}

/// Bar sampling interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BarInterval {
    OneMinute,
    FiveMinutes,
    FifteenMinutes,
    ThirtyMinutes,
    OneHour,
    FourHours,
    OneDay,
}

impl BarInterval {
    /// Wire representation used by exchange kline endpoints.
    pub fn as_str(&self) -> &'static str {
        match self {
            BarInterval::OneMinute => "1m",
            BarInterval::FiveMinutes => "5m",
            BarInterval::FifteenMinutes => "15m",
            BarInterval::ThirtyMinutes => "30m",
            BarInterval::OneHour => "1h",
            BarInterval::FourHours => "4h",
            BarInterval::OneDay => "1d",
        }
    }

    pub fn duration(&self) -> Duration {
        let minutes = match self {
            BarInterval::OneMinute => 1,
            BarInterval::FiveMinutes => 5,
            BarInterval::FifteenMinutes => 15,
            BarInterval::ThirtyMinutes => 30,
            BarInterval::OneHour => 60,
            BarInterval::FourHours => 240,
            BarInterval::OneDay => 1_440,
        };
        Duration::from_secs(minutes * 60)
    }
}

impl fmt::Display for BarInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BarInterval {
    type Err = MarketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1m" => Ok(BarInterval::OneMinute),
            "5m" => Ok(BarInterval::FiveMinutes),
            "15m" => Ok(BarInterval::FifteenMinutes),
            "30m" => Ok(BarInterval::ThirtyMinutes),
            "1h" => Ok(BarInterval::OneHour),
            "4h" => Ok(BarInterval::FourHours),
            "1d" => Ok(BarInterval::OneDay),
            other => Err(MarketError::InvalidInput(format!(
                "unsupported bar interval: {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContractKind {
    Spot,
    /// Perpetual swap contract.
    Perpetual,
}

/// A tradeable instrument plus the metadata needed to decide inclusion.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Instrument {
    pub symbol: String,
    pub kind: ContractKind,
    /// Settlement / quote currency, e.g. `USDT`.
    pub settlement: String,
}

impl Instrument {
    pub fn new(symbol: impl Into<String>, kind: ContractKind, settlement: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            kind,
            settlement: settlement.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(ts_ms: u64) -> Bar {
        Bar {
            ts_ms,
            open: 1.0,
            high: 1.0,
            low: 1.0,
            close: 1.0,
            volume: 0.0,
        }
    }

    #[test]
    fn series_rejects_duplicate_timestamps() {
        let err = BarSeries::new(vec![bar(0), bar(1), bar(1)]).unwrap_err();
        assert!(matches!(err, MarketError::InvalidInput(_)));
    }

    #[test]
    fn series_rejects_out_of_order_bars() {
        assert!(BarSeries::new(vec![bar(5), bar(3)]).is_err());
    }

    #[test]
    fn empty_series_is_valid() {
        let s = BarSeries::new(vec![]).unwrap();
        assert!(s.is_empty());
        assert!(s.last().is_none());
    }

    #[test]
    fn interval_round_trips_through_wire_string() {
        let i: BarInterval = "4h".parse().unwrap();
        assert_eq!(i, BarInterval::FourHours);
        assert_eq!(i.as_str(), "4h");
        assert_eq!(i.duration(), Duration::from_secs(4 * 3600));
        assert!("2h".parse::<BarInterval>().is_err());
    }
}
