//! Time source and bar-boundary alignment.
//!
//! The engine never reads the wall clock or sleeps directly; it goes through
//! [`Clock`] so tests can drive the schedule without real time passing.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Utc};

#[async_trait]
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    async fn sleep(&self, dur: Duration);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

#[async_trait]
impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    async fn sleep(&self, dur: Duration) {
        tokio::time::sleep(dur).await;
    }
}

/// First multiple of `interval` strictly after `now`, measured in the local
/// time of `offset`.
///
/// With `interval = 1h` this is the top of the next hour; with `1d` it is the
/// next local midnight.
pub fn next_boundary(now: DateTime<Utc>, interval: Duration, offset: FixedOffset) -> DateTime<Utc> {
    let step = (interval.as_millis() as i64).max(1);
    let shift = i64::from(offset.local_minus_utc()) * 1_000;

    let local = now.timestamp_millis() + shift;
    let next_local = (local.div_euclid(step) + 1) * step;

    DateTime::from_timestamp_millis(next_local - shift).unwrap_or(now)
}

pub fn delay_until_next_boundary(now: DateTime<Utc>, interval: Duration, offset: FixedOffset) -> Duration {
    (next_boundary(now, interval, offset) - now)
        .to_std()
        .unwrap_or(Duration::ZERO)
}
