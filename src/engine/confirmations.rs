//! Confirmation Scoring
//!
//! A single z-score spike can be one noisy print. Before a signal is
//! trusted, independent corroborating conditions are counted; each true
//! condition contributes one confirmation and a human-readable explanation.
//! The threshold crossings are cumulative: a 3.1-sigma reading clears all
//! four bars and scores four confirmations from them alone.

use super::trend::TrendReading;

/// |z| thresholds evaluated as independent confirmations, in order.
pub const Z_CONFIRMATION_LEVELS: [f64; 4] = [1.8, 2.0, 2.5, 3.0];

/// A rate past this fraction of the window max (or min) counts as being at
/// a historical extreme.
pub const DEFAULT_EXTREME_PROXIMITY: f64 = 0.90;

/// Confirmation count plus one explanation per true condition.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmationScore {
    pub count: u32,
    pub details: Vec<String>,
}

/// Evaluate the corroborating conditions for one reading.
///
/// Detail strings are pushed in evaluation order: the four |z| thresholds,
/// then trend reversal, then proximity to the window's historical extreme.
pub fn score_confirmations(
    z: f64,
    current: f64,
    window: &[f64],
    trend: &TrendReading,
    extreme_proximity: f64,
) -> ConfirmationScore {
    let mut count = 0;
    let mut details = Vec::new();

    for level in Z_CONFIRMATION_LEVELS {
        if z.abs() >= level {
            count += 1;
            details.push(format!("|z| {:.2} beyond {:.1} sigma", z.abs(), level));
        }
    }

    if trend.is_reversing {
        count += 1;
        details.push("funding trend reversing against the extreme".to_string());
    }

    if near_historical_extreme(current, window, extreme_proximity) {
        count += 1;
        details.push(format!(
            "rate within {:.0}% of the window extreme",
            extreme_proximity * 100.0
        ));
    }

    ConfirmationScore { count, details }
}

/// Whether `current` sits within `proximity` of the window's historical
/// max (positive side) or min (negative side).
fn near_historical_extreme(current: f64, window: &[f64], proximity: f64) -> bool {
    let max = window.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let min = window.iter().cloned().fold(f64::INFINITY, f64::min);

    // Empty or flat window has no extreme to be near
    if !max.is_finite() || !min.is_finite() || max <= min {
        return false;
    }

    // Sign guards: a window entirely below zero has no meaningful positive
    // extreme, and vice versa
    (max > 0.0 && current >= max * proximity) || (min < 0.0 && current <= min * proximity)
}
