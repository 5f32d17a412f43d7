//! Indicator pipeline: one bar series in, one aligned indicator frame out.

use serde::{Deserialize, Serialize};

use crate::errors::MarketError;
use crate::indicator::{IndicatorParams, ema, macd, parabolic_sar, rsi};
use crate::types::BarSeries;

/// Derived indicator values for one bar. `None` means undefined.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorRow {
    pub ts_ms: u64,
    pub close: f64,
    pub rsi: Option<f64>,
    pub ema_short: Option<f64>,
    pub ema_long: Option<f64>,
    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
    pub macd_hist: Option<f64>,
    pub sar: Option<f64>,
}

/// Indicator rows aligned one-to-one with the source bars.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndicatorFrame {
    rows: Vec<IndicatorRow>,
}

impl IndicatorFrame {
    pub fn rows(&self) -> &[IndicatorRow] {
        &self.rows
    }

    pub fn latest(&self) -> Option<&IndicatorRow> {
        self.rows.last()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Computes every indicator from the same series snapshot.
///
/// Fails with `InsufficientData` when the series is shorter than
/// `params.min_bars`, and `InvalidInput` for unusable parameters.
pub fn compute_indicators(
    series: &BarSeries,
    params: &IndicatorParams,
) -> Result<IndicatorFrame, MarketError> {
    params.validate()?;

    if series.len() < params.min_bars {
        return Err(MarketError::InsufficientData {
            have: series.len(),
            need: params.min_bars,
        });
    }

    let closes = series.closes();
    let rsi_line = rsi(&closes, params.rsi_period);
    let ema_short = ema(&closes, params.ema_short);
    let ema_long = ema(&closes, params.ema_long);
    let conv = macd(&closes, params.macd_fast, params.macd_slow, params.macd_signal);
    let sar = parabolic_sar(&series.highs(), &series.lows(), params.sar_step, params.sar_cap)?;

    let rows = series
        .bars()
        .iter()
        .enumerate()
        .map(|(i, bar)| IndicatorRow {
            ts_ms: bar.ts_ms,
            close: bar.close,
            rsi: rsi_line[i],
            ema_short: finite(ema_short[i]),
            ema_long: finite(ema_long[i]),
            macd: finite(conv.macd[i]),
            macd_signal: finite(conv.signal[i]),
            macd_hist: finite(conv.hist[i]),
            sar: finite(sar[i]),
        })
        .collect();

    Ok(IndicatorFrame { rows })
}

fn finite(v: f64) -> Option<f64> {
    v.is_finite().then_some(v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Bar;

    fn series(closes: &[f64]) -> BarSeries {
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, c)| Bar {
                ts_ms: i as u64 * 3_600_000,
                open: *c,
                high: c + 0.5,
                low: c - 0.5,
                close: *c,
                volume: 1.0,
            })
            .collect();
        BarSeries::new(bars).unwrap()
    }

    #[test]
    fn short_series_is_insufficient() {
        let err = compute_indicators(&series(&[1.0; 49]), &IndicatorParams::default()).unwrap_err();
        assert_eq!(err, MarketError::InsufficientData { have: 49, need: 50 });
    }

    #[test]
    fn frame_is_aligned_with_bars() {
        let s = series(&(0..55).map(|i| 100.0 + i as f64).collect::<Vec<_>>());
        let frame = compute_indicators(&s, &IndicatorParams::default()).unwrap();
        assert_eq!(frame.len(), s.len());
        assert_eq!(frame.latest().unwrap().ts_ms, s.last().unwrap().ts_ms);
    }

    #[test]
    fn only_the_momentum_prefix_is_undefined() {
        let s = series(&(0..50).map(|i| 100.0 + (i % 3) as f64).collect::<Vec<_>>());
        let params = IndicatorParams::default();
        let frame = compute_indicators(&s, &params).unwrap();

        let undefined = frame.rows().iter().take_while(|r| r.rsi.is_none()).count();
        assert_eq!(undefined, params.rsi_period);

        let first = frame.rows()[0];
        assert!(first.ema_short.is_some());
        assert!(first.macd.is_some());
        assert!(first.sar.is_some());
    }

    #[test]
    fn constant_closes_converge() {
        let frame = compute_indicators(&series(&[10.0; 60]), &IndicatorParams::default()).unwrap();
        let last = frame.latest().unwrap();
        assert!((last.ema_short.unwrap() - 10.0).abs() < 1e-9);
        assert!((last.ema_long.unwrap() - 10.0).abs() < 1e-9);
        assert!(last.macd.unwrap().abs() < 1e-9);
        assert!(last.macd_signal.unwrap().abs() < 1e-9);
        assert!(last.macd_hist.unwrap().abs() < 1e-9);
    }

    #[test]
    fn invalid_params_surface_before_length_check() {
        let params = IndicatorParams {
            ema_long: 0,
            ..Default::default()
        };
        let err = compute_indicators(&series(&[1.0; 3]), &params).unwrap_err();
        assert!(matches!(err, MarketError::InvalidInput(_)));
    }
}
