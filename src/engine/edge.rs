//! Edge Estimation
//!
//! Collapses deviation magnitude and confirmation breadth into a bounded
//! edge score and a heuristic win-probability estimate. These are
//! calibration constants, not a fitted model: the floor is a coin flip and
//! the cap acknowledges that funding extremes never guarantee reversion.

/// Bounded edge score in [0, 100].
pub fn edge_score(z: f64, confirmations: u32) -> f64 {
    (z.abs() * 15.0 + confirmations as f64 * 12.0).clamp(0.0, 100.0)
}

/// Win-probability estimate in [0.50, 0.80].
///
/// The z contribution saturates at 0.15 so extremity alone cannot push the
/// estimate to its cap; reversal of the short-term trend adds a flat bonus.
pub fn win_probability(z: f64, confirmations: u32, is_reversing: bool) -> f64 {
    let z_component = (z.abs() * 0.05).min(0.15);
    let reversal_bonus = if is_reversing { 0.05 } else { 0.0 };

    (0.50 + z_component + confirmations as f64 * 0.03 + reversal_bonus).clamp(0.50, 0.80)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_edge_score_blend() {
        // 3 sigma with 5 confirmations saturates: 45 + 60 -> capped at 100
        assert_relative_eq!(edge_score(3.0, 5), 100.0, epsilon = 1e-12);
        assert_relative_eq!(edge_score(2.0, 2), 54.0, epsilon = 1e-12);
        assert_relative_eq!(edge_score(0.0, 0), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_edge_score_sign_invariant() {
        assert_eq!(edge_score(-2.5, 3), edge_score(2.5, 3));
    }

    #[test]
    fn test_win_probability_floor_and_cap() {
        assert_eq!(win_probability(0.0, 0, false), 0.50);
        // Everything maxed: 0.50 + 0.15 + 0.18 + 0.05 = 0.88 -> capped
        assert_eq!(win_probability(5.0, 6, true), 0.80);
    }

    #[test]
    fn test_win_probability_z_saturation() {
        // z contribution caps at 0.15: z = 3 and z = 10 contribute equally
        assert_eq!(win_probability(3.0, 0, false), win_probability(10.0, 0, false));
        assert_relative_eq!(win_probability(2.0, 0, false), 0.60, epsilon = 1e-12);
    }

    #[test]
    fn test_reversal_bonus() {
        let without = win_probability(2.0, 2, false);
        let with = win_probability(2.0, 2, true);
        assert_relative_eq!(with - without, 0.05, epsilon = 1e-12);
    }

    #[test]
    fn test_monotonic_in_z_and_confirmations() {
        let mut last = 0.0;
        for z in [0.0, 0.5, 1.0, 1.5, 2.0, 2.5, 3.0, 4.0] {
            let e = edge_score(z, 3);
            assert!(e >= last);
            last = e;
        }

        let mut last = 0.0;
        for c in 0..8 {
            let w = win_probability(1.5, c, false);
            assert!(w >= last);
            assert!((0.50..=0.80).contains(&w));
            last = w;
        }
    }
}
