//! Funding Trend Detection
//!
//! Looks at the most recent few observations for a directional turn against
//! the prevailing extreme - a leading indicator that mean reversion has
//! started before the z-score itself normalizes.

use super::stats::window_stats;

/// Recent window for trend detection: ~2 days at 8-hour funding intervals.
pub const DEFAULT_TREND_WINDOW: usize = 6;

/// Outcome of trend detection over the recent window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendReading {
    /// Simple slope (last - first) / (n - 1) over the recent window
    pub slope: f64,
    /// True when momentum is turning against the prevailing extreme
    pub is_reversing: bool,
}

/// Detect a short-window reversal in the funding series.
///
/// "Reversing" means the current rate sits above the recent window's mean
/// while the slope is negative, or below it while the slope is positive.
/// Fewer than 2 recent samples give a flat, non-reversing reading.
pub fn detect_reversal(history: &[f64], current: f64, trend_window: usize) -> TrendReading {
    let start = history.len().saturating_sub(trend_window);
    let recent = &history[start..];

    if recent.len() < 2 {
        return TrendReading {
            slope: 0.0,
            is_reversing: false,
        };
    }

    let first = recent[0];
    let last = recent[recent.len() - 1];
    let slope = (last - first) / (recent.len() - 1) as f64;

    let (recent_mean, _) = window_stats(recent);
    let is_reversing =
        (current > recent_mean && slope < 0.0) || (current < recent_mean && slope > 0.0);

    TrendReading { slope, is_reversing }
}
