//! Shared types used by the scan engine.

use std::time::Duration;

use chrono::{FixedOffset, Offset, Utc};

use market::indicator::IndicatorParams;
use market::types::{BarInterval, ContractKind, Instrument};
use market::SignalRules;
use notifier::DEFAULT_MAX_MESSAGE_LEN;

/// Decides which instruments from the universe are scanned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniverseFilter {
    /// Required contract kind; `None` admits every kind.
    pub kind: Option<ContractKind>,
    /// Required settlement currency (case-insensitive); `None` admits all.
    pub settlement: Option<String>,
}

impl Default for UniverseFilter {
    fn default() -> Self {
        Self {
            kind: Some(ContractKind::Perpetual),
            settlement: Some("USDT".to_string()),
        }
    }
}

impl UniverseFilter {
    pub fn admits(&self, inst: &Instrument) -> bool {
        let kind_ok = self.kind.is_none_or(|k| k == inst.kind);
        let settle_ok = self
            .settlement
            .as_deref()
            .is_none_or(|s| s.eq_ignore_ascii_case(&inst.settlement));
        kind_ok && settle_ok
    }
}

/// Configuration knobs for the scan engine.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub interval: BarInterval,

    /// Bars requested per instrument. Should be at least `params.min_bars`.
    pub bar_limit: usize,

    pub params: IndicatorParams,
    pub rules: SignalRules,
    pub filter: UniverseFilter,

    /// Per-message limit handed to the dispatcher.
    pub max_message_len: usize,

    /// Reference time zone for bar boundaries.
    pub utc_offset: FixedOffset,

    /// Instruments evaluated concurrently. 1 = strictly one at a time.
    /// Results are always consumed in universe order.
    pub fetch_concurrency: usize,

    /// Fetches slower than this are logged as slow.
    pub slow_fetch: Duration,
}

impl Default for ScanConfig {
    fn default() -> Self {
        let params = IndicatorParams::default();
        Self {
            interval: BarInterval::OneHour,
            bar_limit: params.min_bars,
            params,
            rules: SignalRules::default(),
            filter: UniverseFilter::default(),
            max_message_len: DEFAULT_MAX_MESSAGE_LEN,
            utc_offset: default_offset(),
            fetch_concurrency: 1,
            slow_fetch: Duration::from_secs(5),
        }
    }
}

/// UTC+8.
fn default_offset() -> FixedOffset {
    FixedOffset::east_opt(8 * 3_600).unwrap_or_else(|| Utc.fix())
}
