//! Directional classification of the latest indicator row.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::pipeline::IndicatorRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Signal {
    Bullish,
    Bearish,
    None,
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Signal::Bullish => "Bullish",
            Signal::Bearish => "Bearish",
            Signal::None => "None",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalRules {
    /// Momentum level separating the bullish and bearish sides.
    pub neutral_level: f64,
    /// Include the close-vs-SAR conjunct on both sides.
    pub require_reversal: bool,
}

impl Default for SignalRules {
    fn default() -> Self {
        Self {
            neutral_level: 50.0,
            require_reversal: true,
        }
    }
}

/// Classifies one row.
///
/// Bullish needs every one of: momentum below the neutral level, short EMA
/// above long EMA, MACD above its signal line and (optionally) close above
/// the SAR bound. Bearish is the exact mirror. Anything else is `None`.
///
/// Undefined or non-finite operands fail every comparison, so a row with a
/// missing required field is always `None`.
pub fn classify(row: &IndicatorRow, rules: &SignalRules) -> Signal {
    let close = Some(row.close);
    let neutral = Some(rules.neutral_level);

    let bullish = is(row.rsi, neutral, Ordering::Less)
        && is(row.ema_short, row.ema_long, Ordering::Greater)
        && is(row.macd, row.macd_signal, Ordering::Greater)
        && (!rules.require_reversal || is(close, row.sar, Ordering::Greater));

    if bullish {
        return Signal::Bullish;
    }

    let bearish = is(row.rsi, neutral, Ordering::Greater)
        && is(row.ema_short, row.ema_long, Ordering::Less)
        && is(row.macd, row.macd_signal, Ordering::Less)
        && (!rules.require_reversal || is(close, row.sar, Ordering::Less));

    if bearish { Signal::Bearish } else { Signal::None }
}

fn is(a: Option<f64>, b: Option<f64>, want: Ordering) -> bool {
    let defined = |v: Option<f64>| v.filter(|x| x.is_finite());
    match (defined(a), defined(b)) {
        (Some(a), Some(b)) => a.partial_cmp(&b) == Some(want),
        _ => false,
    }
}
