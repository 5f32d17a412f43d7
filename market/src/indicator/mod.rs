//! Technical indicators derived from a bar series.
//!
//! Every function here is pure: same inputs, same outputs, no hidden state
//! carried between calls.

pub mod ema;
pub mod macd;
pub mod rsi;
pub mod sar;

pub use self::ema::{Ema, ema};
pub use self::macd::{MacdLines, macd};
pub use self::rsi::rsi;
pub use self::sar::{ReversalTracker, TrendDirection, parabolic_sar};

use serde::{Deserialize, Serialize};

use crate::errors::MarketError;

/// Indicator settings for one scan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorParams {
    /// Momentum oscillator lookback, in close-to-close moves.
    pub rsi_period: usize,
    pub ema_short: usize,
    pub ema_long: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    /// Initial value and increment of the SAR acceleration factor.
    pub sar_step: f64,
    /// Upper bound of the SAR acceleration factor.
    pub sar_cap: f64,
    /// Series shorter than this are rejected with `InsufficientData`.
    pub min_bars: usize,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        Self {
            rsi_period: 7,
            ema_short: 5,
            ema_long: 15,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            sar_step: 0.02,
            sar_cap: 0.2,
            min_bars: 50,
        }
    }
}

impl IndicatorParams {
    pub fn validate(&self) -> Result<(), MarketError> {
        let periods = [
            ("rsi_period", self.rsi_period),
            ("ema_short", self.ema_short),
            ("ema_long", self.ema_long),
            ("macd_fast", self.macd_fast),
            ("macd_slow", self.macd_slow),
            ("macd_signal", self.macd_signal),
        ];
        if let Some((name, _)) = periods.iter().find(|(_, p)| *p == 0) {
            return Err(MarketError::InvalidInput(format!("{name} must be positive")));
        }
        sar::validate_acceleration(self.sar_step, self.sar_cap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(IndicatorParams::default().validate().is_ok());
    }

    #[test]
    fn zero_period_is_rejected() {
        let p = IndicatorParams {
            macd_signal: 0,
            ..Default::default()
        };
        let err = p.validate().unwrap_err();
        assert_eq!(
            err,
            MarketError::InvalidInput("macd_signal must be positive".into())
        );
    }

    #[test]
    fn cap_below_step_is_rejected() {
        let p = IndicatorParams {
            sar_step: 0.1,
            sar_cap: 0.05,
            ..Default::default()
        };
        assert!(p.validate().is_err());
    }
}
