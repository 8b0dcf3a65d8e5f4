//! Window Statistics
//!
//! Population mean/standard deviation over a lookback window and the
//! z-score of a current observation against it.
//!
//! Z-Score Formula: z = (current_rate - window_mean) / window_std
//!
//! At |z| = 2.5 only ~1.2% of a normal distribution remains in the tail;
//! funding rates that far from their mean have historically reverted.

/// Minimum history length before a z-score is considered meaningful.
pub const MIN_SAMPLES_FOR_ZSCORE: usize = 10;

/// Default lookback window: ~30 days at 8-hour funding intervals.
pub const DEFAULT_LOOKBACK: usize = 90;

/// Mean and population standard deviation of a window.
///
/// Returns `(0.0, 0.0)` for an empty window rather than failing; callers
/// treat a zero std as "no deviation measurable".
pub fn window_stats(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values
        .iter()
        .map(|&v| {
            let diff = v - mean;
            diff * diff
        })
        .sum::<f64>()
        / n;

    (mean, variance.sqrt())
}

/// Z-score of `current` against the trailing `lookback` values of `history`.
///
/// Fewer than [`MIN_SAMPLES_FOR_ZSCORE`] observations, or a degenerate
/// (zero-std) window, yield a z-score of 0 - insufficient data is not an
/// error here.
pub fn z_score(history: &[f64], current: f64, lookback: usize) -> f64 {
    if history.len() < MIN_SAMPLES_FOR_ZSCORE {
        return 0.0;
    }

    let window = trailing_window(history, lookback);
    let (mean, std) = window_stats(window);

    if std == 0.0 {
        return 0.0;
    }

    (current - mean) / std
}

/// The last `lookback` elements of `history`, or all of it if shorter.
pub fn trailing_window(history: &[f64], lookback: usize) -> &[f64] {
    let start = history.len().saturating_sub(lookback);
    &history[start..]
}
