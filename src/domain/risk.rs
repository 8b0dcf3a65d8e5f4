use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::signal::TradeDirection;

/// Hard cap on effective leverage regardless of profile multipliers.
pub const MAX_EFFECTIVE_LEVERAGE: f64 = 15.0;

/// Hard cap on risk fraction per trade regardless of profile multipliers.
pub const MAX_RISK_PER_TRADE: f64 = 0.10;

/// Hard cap on position size as a fraction of capital.
pub const MAX_POSITION_FRACTION: f64 = 0.40;

#[derive(Debug, Error)]
pub enum RiskProfileError {
    #[error("Unknown risk profile '{0}' (expected low, medium, high or ultra)")]
    Unknown(String),
}

/// Named risk configuration bundle. A process-wide constant table; profiles
/// carry no state of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskProfile {
    Low,
    Medium,
    High,
    Ultra,
}

/// Parameters attached to one risk profile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskParams {
    /// Fraction of capital risked per trade
    pub risk_per_trade: f64,
    /// Maximum leverage before strength multipliers
    pub max_leverage: f64,
    /// Minimum confirmations for a signal to be actionable under this profile
    pub min_confirmations: u32,
    /// Minimum |z-score| for a signal to be actionable under this profile
    pub min_z: f64,
}

impl RiskProfile {
    /// The constant parameter table.
    pub fn params(&self) -> RiskParams {
        match self {
            RiskProfile::Low => RiskParams {
                risk_per_trade: 0.01,
                max_leverage: 3.0,
                min_confirmations: 4,
                min_z: 2.5,
            },
            RiskProfile::Medium => RiskParams {
                risk_per_trade: 0.03,
                max_leverage: 5.0,
                min_confirmations: 3,
                min_z: 2.0,
            },
            RiskProfile::High => RiskParams {
                risk_per_trade: 0.05,
                max_leverage: 8.0,
                min_confirmations: 2,
                min_z: 1.8,
            },
            RiskProfile::Ultra => RiskParams {
                risk_per_trade: 0.08,
                max_leverage: 12.0,
                min_confirmations: 2,
                min_z: 1.8,
            },
        }
    }

    pub fn all() -> [RiskProfile; 4] {
        [
            RiskProfile::Low,
            RiskProfile::Medium,
            RiskProfile::High,
            RiskProfile::Ultra,
        ]
    }
}

impl fmt::Display for RiskProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RiskProfile::Low => "low",
            RiskProfile::Medium => "medium",
            RiskProfile::High => "high",
            RiskProfile::Ultra => "ultra",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for RiskProfile {
    type Err = RiskProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(RiskProfile::Low),
            "medium" => Ok(RiskProfile::Medium),
            "high" => Ok(RiskProfile::High),
            "ultra" => Ok(RiskProfile::Ultra),
            other => Err(RiskProfileError::Unknown(other.to_string())),
        }
    }
}

/// Sizing derived for one (analysis, capital, profile) triple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionSizing {
    /// Notional position size in quote currency
    pub position_size: f64,
    /// Effective leverage, rounded to the nearest integer
    pub leverage: u32,
    /// Capital at risk in quote currency
    pub risk_amount: f64,
    /// Effective risk as a fraction of capital
    pub risk_percent: f64,
    /// Stop distance as a fraction of entry price
    pub stop_loss_percent: f64,
    /// Target distance as a fraction of entry price
    pub take_profit_percent: f64,
    pub stop_loss_price: f64,
    pub take_profit_price: f64,
    /// Expected value per unit of position, from win probability and the 2:1 payoff
    pub expected_value: f64,
    pub direction: TradeDirection,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_medium_profile_params() {
        let p = RiskProfile::Medium.params();
        assert_eq!(p.risk_per_trade, 0.03);
        assert_eq!(p.max_leverage, 5.0);
        assert_eq!(p.min_confirmations, 3);
        assert_eq!(p.min_z, 2.0);
    }

    #[test]
    fn test_profiles_order_by_aggression() {
        let mut last_risk = 0.0;
        let mut last_lev = 0.0;
        for profile in RiskProfile::all() {
            let p = profile.params();
            assert!(p.risk_per_trade > last_risk);
            assert!(p.max_leverage > last_lev);
            last_risk = p.risk_per_trade;
            last_lev = p.max_leverage;
        }
    }

    #[test]
    fn test_parse_roundtrip() {
        for profile in RiskProfile::all() {
            let parsed: RiskProfile = profile.to_string().parse().unwrap();
            assert_eq!(parsed, profile);
        }
        assert!("turbo".parse::<RiskProfile>().is_err());
    }
}
