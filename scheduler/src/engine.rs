//! The scan engine.
//!
//! Each cycle it:
//!   1. Reads the instrument universe once and applies the filter.
//!   2. For every admitted instrument: fetches bars, runs the indicator
//!      pipeline and classifies the latest row.
//!   3. Collects Bullish / Bearish instruments into a `ScanResultSet`.
//!   4. Renders the result set and dispatches it through the notifier.
//!
//! Between cycles it sleeps until the next bar boundary.
//!
//! Failure isolation: a fetch or pipeline error on one instrument is logged
//! and counted, and the cycle moves on to the next instrument. Only a failed
//! universe read ends a cycle early (nothing to scan, nothing is sent).

use std::sync::Arc;
use std::time::Duration;

use futures::{StreamExt, stream};
use tracing::{Instrument as _, Span, debug, error, info, warn};

use common::logger::{TraceId, child_span, cycle_span, warn_if_slow};
use market::types::Instrument;
use market::{
    BarFeed, IndicatorRow, InstrumentUniverse, MarketError, ScanResultSet, Signal, classify,
    compute_indicators,
};
use notifier::{DispatchReport, Notifier, dispatch, render};

use crate::clock::{Clock, delay_until_next_boundary};
use crate::counters::ScanCounters;
use crate::types::ScanConfig;

/// What one completed cycle produced.
#[derive(Debug, Clone)]
pub struct CycleOutcome {
    pub results: ScanResultSet,
    pub report: DispatchReport,
}

pub struct ScanEngine<F, U, N, C> {
    cfg: ScanConfig,
    feed: Arc<F>,
    universe: Arc<U>,
    notifier: Arc<N>,
    clock: Arc<C>,
    counters: ScanCounters,
}

impl<F, U, N, C> ScanEngine<F, U, N, C>
where
    F: BarFeed,
    U: InstrumentUniverse,
    N: Notifier,
    C: Clock,
{
    pub fn new(
        cfg: ScanConfig,
        feed: Arc<F>,
        universe: Arc<U>,
        notifier: Arc<N>,
        clock: Arc<C>,
        counters: ScanCounters,
    ) -> Self {
        Self {
            cfg,
            feed,
            universe,
            notifier,
            clock,
            counters,
        }
    }

    pub fn counters(&self) -> &ScanCounters {
        &self.counters
    }

    /// Scans the universe once without notifying.
    ///
    /// Returns `Err` only when the universe itself cannot be read.
    pub async fn scan_once(&self) -> Result<ScanResultSet, MarketError> {
        let instruments = self.universe.instruments().await?;

        let admitted: Vec<&Instrument> = instruments
            .iter()
            .filter(|inst| {
                let ok = self.cfg.filter.admits(inst);
                if !ok {
                    ScanCounters::bump(&self.counters.skip_filtered);
                    debug!(symbol = %inst.symbol, "instrument filtered out");
                }
                ok
            })
            .collect();

        Span::current().record("instruments", admitted.len());

        // `buffered` yields in input order regardless of completion order.
        let mut outcomes = stream::iter(admitted)
            .map(|inst| async move {
                let outcome = self
                    .evaluate(inst)
                    .instrument(child_span("evaluate", &inst.symbol))
                    .await;
                (inst, outcome)
            })
            .buffered(self.cfg.fetch_concurrency.max(1));

        let mut results = ScanResultSet::new();

        while let Some((inst, outcome)) = outcomes.next().await {
            ScanCounters::bump(&self.counters.scanned);

            match outcome {
                Ok((signal, row)) => {
                    debug!(symbol = %inst.symbol, %signal, "instrument classified");
                    if results.record(inst.symbol.clone(), signal, row) {
                        ScanCounters::bump(&self.counters.signals);
                    }
                }
                Err(MarketError::InsufficientData { have, need }) => {
                    ScanCounters::bump(&self.counters.skip_insufficient);
                    warn!(symbol = %inst.symbol, have, need, "not enough bars; skipping instrument");
                }
                Err(e) => {
                    ScanCounters::bump(&self.counters.skip_failed);
                    error!(symbol = %inst.symbol, error = %e, "instrument scan failed; continuing");
                }
            }
        }

        Ok(results)
    }

    async fn evaluate(&self, inst: &Instrument) -> Result<(Signal, IndicatorRow), MarketError> {
        let series = warn_if_slow(
            "fetch_bars",
            self.cfg.slow_fetch,
            self.feed
                .fetch_bars(&inst.symbol, self.cfg.interval, self.cfg.bar_limit),
        )
        .await?;

        let frame = compute_indicators(&series, &self.cfg.params)?;
        let row = *frame.latest().ok_or(MarketError::InsufficientData {
            have: 0,
            need: self.cfg.params.min_bars.max(1),
        })?;

        Ok((classify(&row, &self.cfg.rules), row))
    }

    /// One full cycle: scan, render, dispatch.
    pub async fn run_cycle(&self) -> Result<CycleOutcome, MarketError> {
        let cycle = ScanCounters::bump(&self.counters.cycles);
        let trace_id = TraceId::new();

        async {
            info!("scan cycle started");

            let results = match self.scan_once().await {
                Ok(results) => results,
                Err(e) => {
                    error!(error = %e, "instrument universe unavailable; skipping cycle");
                    return Err(e);
                }
            };
            Span::current().record("signals", results.len());

            let text = render(&results, &self.cfg.params);
            let report = dispatch(self.notifier.as_ref(), &text, self.cfg.max_message_len).await;

            info!(
                bullish = results.entries(Signal::Bullish).len(),
                bearish = results.entries(Signal::Bearish).len(),
                scanned_total = ScanCounters::get(&self.counters.scanned),
                failed_total = ScanCounters::get(&self.counters.skip_failed),
                insufficient_total = ScanCounters::get(&self.counters.skip_insufficient),
                delivered = report.delivered,
                chunks = report.chunks,
                "scan cycle complete"
            );

            Ok(CycleOutcome { results, report })
        }
        .instrument(cycle_span(&trace_id, cycle))
        .await
    }

    /// Runs one cycle, then sleeps until the next bar boundary.
    ///
    /// Returns the delay that was slept.
    pub async fn tick(&self) -> Duration {
        // Errors are logged inside the cycle; the schedule continues regardless.
        let _ = self.run_cycle().await;

        let now = self.clock.now();
        let delay = delay_until_next_boundary(now, self.cfg.interval.duration(), self.cfg.utc_offset);

        info!(now = %now, delay_secs = delay.as_secs(), "sleeping until next bar boundary");
        self.clock.sleep(delay).await;

        delay
    }

    /// Cycles forever. Only process shutdown stops it.
    pub async fn run_forever(&self) {
        info!(
            interval = %self.cfg.interval,
            offset = %self.cfg.utc_offset,
            "scan loop started"
        );
        loop {
            self.tick().await;
        }
    }
}
