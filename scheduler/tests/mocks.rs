#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use market::types::{Bar, BarInterval, BarSeries, ContractKind, Instrument};
use market::{BarFeed, InstrumentUniverse, MarketError};
use notifier::{DeliveryError, Notifier};
use scheduler::Clock;

const HOUR_MS: u64 = 3_600_000;

// -----------------------
// Series builders
// -----------------------

pub fn series(closes: &[f64]) -> BarSeries {
    let bars = closes
        .iter()
        .enumerate()
        .map(|(i, c)| Bar {
            ts_ms: 1_700_000_000_000 + i as u64 * HOUR_MS,
            open: *c,
            high: c + 0.5,
            low: c - 0.5,
            close: *c,
            volume: 10.0,
        })
        .collect();
    BarSeries::new(bars).expect("ordered bars")
}

fn reversal_path(start: f64, slide: f64, jump: [f64; 3], drift: f64) -> Vec<f64> {
    let mut closes: Vec<f64> = (0..50).map(|i| start + slide * i as f64).collect();
    closes.extend(jump);
    for _ in 0..7 {
        let last = *closes.last().unwrap();
        closes.push(last + drift);
    }
    closes
}

/// Classifies as Bullish on its last bar.
pub fn bullish_series() -> BarSeries {
    series(&reversal_path(150.0, -1.0, [110.0, 120.0, 130.0], -0.1))
}

/// Classifies as Bearish on its last bar.
pub fn bearish_series() -> BarSeries {
    series(&reversal_path(100.0, 1.0, [140.0, 130.0, 120.0], 0.1))
}

/// No signal: momentum disagrees with the other indicators.
pub fn neutral_series() -> BarSeries {
    series(&reversal_path(150.0, -1.0, [110.0, 120.0, 130.0], 0.1))
}

pub fn perp(symbol: &str) -> Instrument {
    Instrument::new(symbol, ContractKind::Perpetual, "USDT")
}

// -----------------------
// Collaborators
// -----------------------

#[derive(Default, Clone)]
pub struct MockFeed {
    pub series: Arc<Mutex<HashMap<String, Result<BarSeries, MarketError>>>>,
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl MockFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, symbol: &str, s: Result<BarSeries, MarketError>) {
        self.series.lock().await.insert(symbol.to_string(), s);
    }
}

#[async_trait]
impl BarFeed for MockFeed {
    async fn fetch_bars(
        &self,
        symbol: &str,
        _interval: BarInterval,
        _limit: usize,
    ) -> Result<BarSeries, MarketError> {
        self.calls.lock().await.push(symbol.to_string());
        self.series
            .lock()
            .await
            .get(symbol)
            .cloned()
            .unwrap_or_else(|| Err(MarketError::UnknownInstrument(symbol.to_string())))
    }
}

pub struct MockUniverse {
    pub instruments: Result<Vec<Instrument>, MarketError>,
}

#[async_trait]
impl InstrumentUniverse for MockUniverse {
    async fn instruments(&self) -> Result<Vec<Instrument>, MarketError> {
        self.instruments.clone()
    }
}

#[derive(Default, Clone)]
pub struct RecordingNotifier {
    pub sent: Arc<Mutex<Vec<String>>>,
    pub fail: bool,
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, text: &str) -> Result<(), DeliveryError> {
        if self.fail {
            return Err(DeliveryError::Rejected("bot was blocked by the user".into()));
        }
        self.sent.lock().await.push(text.to_string());
        Ok(())
    }
}

/// Manual clock: `sleep` records the request and advances `now` instantly.
pub struct ManualClock {
    pub now: std::sync::Mutex<DateTime<Utc>>,
    pub sleeps: std::sync::Mutex<Vec<Duration>>,
}

impl ManualClock {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now: std::sync::Mutex::new(now),
            sleeps: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }

    async fn sleep(&self, dur: Duration) {
        self.sleeps.lock().unwrap().push(dur);
        let mut now = self.now.lock().unwrap();
        *now += chrono::Duration::from_std(dur).unwrap();
    }
}
