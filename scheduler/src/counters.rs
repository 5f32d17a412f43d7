use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Minimal counters for operational visibility. Cumulative across cycles.
#[derive(Clone, Default, Debug)]
pub struct ScanCounters {
    pub cycles: Arc<AtomicU64>,
    pub scanned: Arc<AtomicU64>,
    pub signals: Arc<AtomicU64>,

    // skip reasons
    pub skip_filtered: Arc<AtomicU64>,
    pub skip_insufficient: Arc<AtomicU64>,
    pub skip_failed: Arc<AtomicU64>,
}

impl ScanCounters {
    pub(crate) fn bump(counter: &AtomicU64) -> u64 {
        counter.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn get(counter: &AtomicU64) -> u64 {
        counter.load(Ordering::Relaxed)
    }
}
