//! Signal Classification
//!
//! Maps (z-score, confirmation count) to the seven-level taxonomy. Both
//! gates must clear: a large z-score with little corroboration degrades to
//! a weaker class or to neutral, which suppresses single-print outliers.
//! Rows are evaluated most extreme first.

use crate::domain::Signal;

/// Classify one reading. Positive z selects short-side classes (funding is
/// paying longs who are overextended), negative z mirrors to the long side.
pub fn classify(z: f64, confirmations: u32) -> Signal {
    if z >= 3.0 && confirmations >= 5 {
        Signal::UltraShort
    } else if z >= 2.5 && confirmations >= 4 {
        Signal::StrongShort
    } else if z >= 2.0 && confirmations >= 3 {
        Signal::Short
    } else if z >= 1.8 && confirmations >= 2 {
        Signal::Short
    } else if z <= -3.0 && confirmations >= 5 {
        Signal::UltraLong
    } else if z <= -2.5 && confirmations >= 4 {
        Signal::StrongLong
    } else if z <= -2.0 && confirmations >= 3 {
        Signal::Long
    } else if z <= -1.8 && confirmations >= 2 {
        Signal::Long
    } else {
        Signal::Neutral
    }
}
