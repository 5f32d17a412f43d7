use std::collections::VecDeque;

/// Count-bounded window of close-to-close price moves.
///
/// Holds at most `capacity` moves; the oldest is evicted on overflow. Gain and
/// loss totals are summed from the stored moves on demand so that a window of
/// zero moves always reports exactly zero.
#[derive(Debug, Clone)]
pub struct RollingWindow {
    moves: VecDeque<f64>,
    capacity: usize,
}

impl RollingWindow {
    pub fn new(capacity: usize) -> Self {
        Self {
            moves: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, delta: f64) {
        if self.capacity == 0 {
            return;
        }
        if self.moves.len() >= self.capacity {
            self.moves.pop_front();
        }
        self.moves.push_back(delta);
    }

    pub fn is_full(&self) -> bool {
        self.capacity > 0 && self.moves.len() == self.capacity
    }

    /// False once any non-finite move is inside the window.
    pub fn is_finite(&self) -> bool {
        self.moves.iter().all(|m| m.is_finite())
    }

    /// Sum of upward moves.
    pub fn gains(&self) -> f64 {
        self.moves.iter().filter(|m| **m > 0.0).sum()
    }

    /// Sum of downward moves, as a positive number.
    pub fn losses(&self) -> f64 {
        -self.moves.iter().filter(|m| **m < 0.0).sum::<f64>()
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}
