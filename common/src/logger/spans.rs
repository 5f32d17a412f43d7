use std::time::{Duration, Instant};

use tracing::{Span, field};

use super::TraceId;

/// Root span for one scan cycle.
pub fn cycle_span(trace_id: &TraceId, cycle: u64) -> Span {
    tracing::info_span!(
        "scan_cycle",
        trace_id = %trace_id,
        cycle,
        instruments = field::Empty,
        signals = field::Empty
    )
}

/// Child span for work on a single instrument; inherits the cycle's trace id.
pub fn child_span(name: &'static str, symbol: &str) -> Span {
    tracing::info_span!("instrument", name = %name, symbol = %symbol)
}

pub async fn warn_if_slow<F, T>(label: &'static str, max: Duration, fut: F) -> T
where
    F: std::future::Future<Output = T>,
{
    let start = Instant::now();
    let out = fut.await;
    let elapsed = start.elapsed();
    if elapsed > max {
        tracing::warn!(
            target: "performance",
            label = label,
            elapsed_ms = elapsed.as_millis() as u64,
            "slow operation detected"
        );
    }
    out
}
