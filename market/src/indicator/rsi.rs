use crate::rolling_window::RollingWindow;

/// Momentum oscillator in `[0, 100]` over the trailing `period` close-to-close
/// moves.
///
/// ```text
/// rsi = 100 - 100 / (1 + gains / losses)
/// ```
///
/// Row `i` is undefined while fewer than `period` moves are available, i.e.
/// for the first `period` rows. A window with no movement at all is also
/// undefined; a window of only gains is 100 and only losses is 0.
pub fn rsi(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut window = RollingWindow::new(period);
    let mut out = Vec::with_capacity(closes.len());

    for (i, close) in closes.iter().enumerate() {
        if i > 0 {
            window.push(close - closes[i - 1]);
        }
        out.push(score(&window));
    }

    out
}

fn score(window: &RollingWindow) -> Option<f64> {
    if !window.is_full() || !window.is_finite() {
        return None;
    }

    let gains = window.gains();
    let losses = window.losses();

    match (gains > 0.0, losses > 0.0) {
        (false, false) => None,
        (true, false) => Some(100.0),
        (false, true) => Some(0.0),
        (true, true) => Some(100.0 - 100.0 / (1.0 + gains / losses)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undefined_for_first_period_rows() {
        let closes: Vec<f64> = (0..10).map(|i| i as f64).collect();
        let out = rsi(&closes, 3);
        assert!(out[..3].iter().all(Option::is_none));
        assert!(out[3..].iter().all(Option::is_some));
    }

    #[test]
    fn balanced_moves_score_fifty() {
        let out = rsi(&[10.0, 11.0, 10.0, 11.0, 10.0], 4);
        assert_eq!(out[4], Some(50.0));
    }

    #[test]
    fn one_sided_windows_hit_the_bounds() {
        assert_eq!(rsi(&[1.0, 2.0, 3.0], 2)[2], Some(100.0));
        assert_eq!(rsi(&[3.0, 2.0, 1.0], 2)[2], Some(0.0));
    }

    #[test]
    fn flat_window_is_undefined() {
        assert_eq!(rsi(&[5.0; 6], 3)[5], None);
    }

    #[test]
    fn ratio_matches_formula() {
        // moves: +3, -1 -> rs = 3 -> 75
        let out = rsi(&[10.0, 13.0, 12.0], 2);
        assert!((out[2].unwrap() - 75.0).abs() < 1e-9);
    }

    #[test]
    fn nan_close_poisons_only_its_windows() {
        let out = rsi(&[1.0, f64::NAN, 2.0, 3.0, 4.0, 5.0], 2);
        assert_eq!(out[2], None);
        assert_eq!(out[3], None);
        assert_eq!(out[4], Some(100.0));
    }
}
