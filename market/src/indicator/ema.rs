/// Exponentially weighted moving average with smoothing `2 / (period + 1)`.
///
/// Seeded with the first value, so it is defined from the first sample on.
/// Early values lean heavily on the seed and carry little information.
#[derive(Debug, Clone)]
pub struct Ema {
    alpha: f64,
    value: Option<f64>,
}

impl Ema {
    /// `period` must be positive; `IndicatorParams::validate` guards callers.
    pub fn new(period: usize) -> Self {
        Self {
            alpha: 2.0 / (period as f64 + 1.0),
            value: None,
        }
    }

    pub fn update(&mut self, x: f64) -> f64 {
        let next = match self.value {
            None => x,
            Some(prev) => self.alpha * x + (1.0 - self.alpha) * prev,
        };
        self.value = Some(next);
        next
    }
}

pub fn ema(values: &[f64], period: usize) -> Vec<f64> {
    let mut e = Ema::new(period);
    values.iter().map(|x| e.update(*x)).collect()
}
