//! Parabolic stop-and-reverse (SAR).
//!
//! Produces a bound line that trails price and flips to the other side when
//! price crosses it.
//!
//! ## Recursion
//!
//! ```text
//! tentative = prev_bound + af * (extreme_point - prev_bound)
//! ```
//!
//! In an **up** run the extreme point is the highest high seen and the bound
//! sits below price. A new high raises the extreme point and bumps `af` by
//! `step` (capped at `cap`). When the tentative bound rises above the bar's low
//! the run reverses: the bound jumps to the extreme point, the extreme point
//! resets to the bar's low and `af` resets to `step`.
//!
//! A **down** run mirrors this with lows, highs and the opposite comparisons.
//!
//! ## Seeding
//!
//! The first bar always opens an up run with bound = `low[0]` and
//! extreme point = `high[0]`, whatever the price action looks like. This is a
//! known approximation: the first few bounds may sit on the wrong side until
//! the first reversal corrects them.
//!
//! ## Invariants
//! - One output per input bar.
//! - Direction only changes on a breach.
//! - `af` never decreases within a run, never exceeds `cap`, and is exactly
//!   `step` right after every flip.

use crate::errors::MarketError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendDirection {
    Up,
    Down,
}

#[derive(Debug, Clone, Copy)]
struct TrendState {
    bound: f64,
    extreme_point: f64,
    acceleration: f64,
    direction: TrendDirection,
}

impl TrendState {
    fn seed(high: f64, low: f64, step: f64) -> Self {
        Self {
            bound: low,
            extreme_point: high,
            acceleration: step,
            direction: TrendDirection::Up,
        }
    }

    fn advance(mut self, high: f64, low: f64, step: f64, cap: f64) -> Self {
        let tentative = self.bound + self.acceleration * (self.extreme_point - self.bound);

        match self.direction {
            TrendDirection::Up => {
                if high > self.extreme_point {
                    self.extreme_point = high;
                    self.acceleration = (self.acceleration + step).min(cap);
                }
                if tentative > low {
                    self.direction = TrendDirection::Down;
                    self.bound = self.extreme_point;
                    self.extreme_point = low;
                    self.acceleration = step;
                } else {
                    self.bound = tentative;
                }
            }
            TrendDirection::Down => {
                if low < self.extreme_point {
                    self.extreme_point = low;
                    self.acceleration = (self.acceleration + step).min(cap);
                }
                if tentative < high {
                    self.direction = TrendDirection::Up;
                    self.bound = self.extreme_point;
                    self.extreme_point = high;
                    self.acceleration = step;
                } else {
                    self.bound = tentative;
                }
            }
        }

        self
    }
}

/// Incremental SAR calculator; feed bars oldest first.
#[derive(Debug, Clone)]
pub struct ReversalTracker {
    step: f64,
    cap: f64,
    state: Option<TrendState>,
}

impl ReversalTracker {
    pub fn new(step: f64, cap: f64) -> Result<Self, MarketError> {
        validate_acceleration(step, cap)?;
        Ok(Self {
            step,
            cap,
            state: None,
        })
    }

    /// Ingests one bar and returns its bound.
    pub fn update(&mut self, high: f64, low: f64) -> f64 {
        let next = match self.state {
            None => TrendState::seed(high, low, self.step),
            Some(prev) => prev.advance(high, low, self.step, self.cap),
        };
        self.state = Some(next);
        next.bound
    }

    /// Current run direction; `None` before the first bar.
    pub fn direction(&self) -> Option<TrendDirection> {
        self.state.map(|s| s.direction)
    }

    /// Current acceleration factor; `None` before the first bar.
    pub fn acceleration(&self) -> Option<f64> {
        self.state.map(|s| s.acceleration)
    }
}

pub(crate) fn validate_acceleration(step: f64, cap: f64) -> Result<(), MarketError> {
    if !(step.is_finite() && step > 0.0) {
        return Err(MarketError::InvalidInput(format!(
            "sar step must be positive, got {step}"
        )));
    }
    if !(cap.is_finite() && cap >= step) {
        return Err(MarketError::InvalidInput(format!(
            "sar cap {cap} must be >= step {step}"
        )));
    }
    Ok(())
}

/// Computes the SAR bound for every bar.
///
/// Fails with `InvalidInput` on mismatched `high`/`low` lengths or bad
/// acceleration parameters.
pub fn parabolic_sar(high: &[f64], low: &[f64], step: f64, cap: f64) -> Result<Vec<f64>, MarketError> {
    if high.len() != low.len() {
        return Err(MarketError::InvalidInput(format!(
            "high/low length mismatch: {} vs {}",
            high.len(),
            low.len()
        )));
    }

    let mut tracker = ReversalTracker::new(step, cap)?;
    Ok(high
        .iter()
        .zip(low)
        .map(|(h, l)| tracker.update(*h, *l))
        .collect())
}
