//! Position Sizing
//!
//! Turns a directional analysis plus capital and a risk profile into a
//! risk-bounded position: risk amount, leverage, fixed 2:1 stop/target
//! levels, and the expected value implied by the win-probability estimate.

use crate::domain::{
    AnalysisResult, PositionSizing, RiskProfile, SignalStrength, TradeDirection,
    MAX_EFFECTIVE_LEVERAGE, MAX_POSITION_FRACTION, MAX_RISK_PER_TRADE,
};

/// Fixed stop distance as a fraction of entry price.
pub const STOP_LOSS_PCT: f64 = 0.015;

/// Fixed reward:risk of 2:1.
pub const TAKE_PROFIT_PCT: f64 = STOP_LOSS_PCT * 2.0;

/// Size a position for a directional signal. Returns `None` for a neutral
/// analysis; all other inputs are assumed valid (positive capital).
pub fn size_position(
    analysis: &AnalysisResult,
    capital: f64,
    profile: RiskProfile,
) -> Option<PositionSizing> {
    let direction = analysis.signal.direction()?;
    let params = profile.params();

    // Stronger conviction scales risk and leverage before the global caps
    let (risk_mult, leverage_mult) = match analysis.signal.strength() {
        Some(SignalStrength::Ultra) => (1.5, 1.3),
        Some(SignalStrength::Strong) => (1.2, 1.15),
        Some(SignalStrength::Base) | None => (1.0, 1.0),
    };

    let risk_percent = (params.risk_per_trade * risk_mult).min(MAX_RISK_PER_TRADE);
    let leverage = (params.max_leverage * leverage_mult)
        .min(MAX_EFFECTIVE_LEVERAGE)
        .round() as u32;

    let risk_amount = capital * risk_percent;
    let position_size = (risk_amount / STOP_LOSS_PCT).min(capital * MAX_POSITION_FRACTION);

    let (stop_loss_price, take_profit_price) = match direction {
        TradeDirection::Long => (
            analysis.price * (1.0 - STOP_LOSS_PCT),
            analysis.price * (1.0 + TAKE_PROFIT_PCT),
        ),
        TradeDirection::Short => (
            analysis.price * (1.0 + STOP_LOSS_PCT),
            analysis.price * (1.0 - TAKE_PROFIT_PCT),
        ),
    };

    let expected_value = analysis.win_probability * TAKE_PROFIT_PCT
        - (1.0 - analysis.win_probability) * STOP_LOSS_PCT;

    Some(PositionSizing {
        position_size,
        leverage,
        risk_amount,
        risk_percent,
        stop_loss_percent: STOP_LOSS_PCT,
        take_profit_percent: TAKE_PROFIT_PCT,
        stop_loss_price,
        take_profit_price,
        expected_value,
        direction,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Signal;
    use approx::assert_relative_eq;
    use chrono::Utc;

    fn analysis_with(signal: Signal, price: f64, win_probability: f64) -> AnalysisResult {
        AnalysisResult {
            symbol: "BTCUSDT".to_string(),
            price,
            current_rate: 0.0015,
            mean: 0.0,
            std: 0.0005,
            z_score: 3.0,
            signal,
            confirmations: 5,
            confirmation_details: vec![],
            edge_score: 100.0,
            win_probability,
            is_funding_reversing: true,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_medium_strong_long_scenario() {
        // capital 5000, medium profile (3% risk, 5x), STRONG_LONG
        let analysis = analysis_with(Signal::StrongLong, 100.0, 0.70);
        let sizing = size_position(&analysis, 5_000.0, RiskProfile::Medium).unwrap();

        assert_relative_eq!(sizing.risk_percent, 0.036, epsilon = 1e-12);
        assert_relative_eq!(sizing.risk_amount, 180.0, epsilon = 1e-9);
        // 180 / 0.015 = 12000 is cut down to the 40% capital cap
        assert_relative_eq!(sizing.position_size, 2_000.0, epsilon = 1e-9);
        // 5 * 1.15 = 5.75 rounds to 6
        assert_eq!(sizing.leverage, 6);
        assert_eq!(sizing.direction, TradeDirection::Long);
    }

    #[test]
    fn test_ultra_multipliers_and_caps() {
        let analysis = analysis_with(Signal::UltraShort, 100.0, 0.80);
        let sizing = size_position(&analysis, 10_000.0, RiskProfile::Ultra).unwrap();

        // 8% * 1.5 = 12%, capped at the 10% risk ceiling
        assert_relative_eq!(sizing.risk_percent, 0.10, epsilon = 1e-12);
        // 12 * 1.3 = 15.6, capped at 15 before rounding
        assert_eq!(sizing.leverage, 15);
        // Position capped at 40% of capital
        assert_relative_eq!(sizing.position_size, 4_000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_position_cap_never_exceeded() {
        for profile in RiskProfile::all() {
            for signal in [Signal::Short, Signal::StrongShort, Signal::UltraLong] {
                let analysis = analysis_with(signal, 250.0, 0.75);
                let sizing = size_position(&analysis, 7_500.0, profile).unwrap();
                assert!(sizing.position_size <= 7_500.0 * MAX_POSITION_FRACTION + 1e-9);
                assert!(sizing.leverage as f64 <= MAX_EFFECTIVE_LEVERAGE);
            }
        }
    }

    #[test]
    fn test_low_profile_still_hits_position_cap() {
        // 1% risk on 5000 = 50 at risk; 50 / 0.015 = 3333.33 still exceeds
        // the 40% cap of 2000, so even the low profile hits the cap here
        let analysis = analysis_with(Signal::Long, 100.0, 0.60);
        let sizing = size_position(&analysis, 5_000.0, RiskProfile::Low).unwrap();
        assert_relative_eq!(sizing.position_size, 2_000.0, epsilon = 1e-9);
        assert_relative_eq!(sizing.risk_amount, 50.0, epsilon = 1e-9);
        assert_eq!(sizing.leverage, 3);
    }

    #[test]
    fn test_stop_and_target_mirror_by_direction() {
        let long = analysis_with(Signal::Long, 200.0, 0.65);
        let s = size_position(&long, 5_000.0, RiskProfile::Medium).unwrap();
        assert_relative_eq!(s.stop_loss_price, 197.0, epsilon = 1e-9);
        assert_relative_eq!(s.take_profit_price, 206.0, epsilon = 1e-9);

        let short = analysis_with(Signal::Short, 200.0, 0.65);
        let s = size_position(&short, 5_000.0, RiskProfile::Medium).unwrap();
        assert_relative_eq!(s.stop_loss_price, 203.0, epsilon = 1e-9);
        assert_relative_eq!(s.take_profit_price, 194.0, epsilon = 1e-9);
    }

    #[test]
    fn test_expected_value() {
        let analysis = analysis_with(Signal::Long, 100.0, 0.70);
        let sizing = size_position(&analysis, 5_000.0, RiskProfile::Medium).unwrap();
        // 0.70 * 0.03 - 0.30 * 0.015 = 0.0165
        assert_relative_eq!(sizing.expected_value, 0.0165, epsilon = 1e-12);
    }

    #[test]
    fn test_neutral_yields_no_sizing() {
        let analysis = analysis_with(Signal::Neutral, 100.0, 0.50);
        assert!(size_position(&analysis, 5_000.0, RiskProfile::Medium).is_none());
    }
}
