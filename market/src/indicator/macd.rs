use super::ema::ema;

/// Convergence oscillator lines, aligned with the input closes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MacdLines {
    /// Fast EMA minus slow EMA.
    pub macd: Vec<f64>,
    /// EMA of the main line.
    pub signal: Vec<f64>,
    /// Main line minus signal line.
    pub hist: Vec<f64>,
}

pub fn macd(closes: &[f64], fast: usize, slow: usize, signal: usize) -> MacdLines {
    let fast_line = ema(closes, fast);
    let slow_line = ema(closes, slow);
    let main: Vec<f64> = fast_line.iter().zip(&slow_line).map(|(f, s)| f - s).collect();
    let signal_line = ema(&main, signal);
    let hist = main.iter().zip(&signal_line).map(|(m, s)| m - s).collect();

    MacdLines {
        macd: main,
        signal: signal_line,
        hist,
    }
}
