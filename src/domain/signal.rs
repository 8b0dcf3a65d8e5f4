use std::fmt;

use serde::{Deserialize, Serialize};

/// Which side of the market a signal wants to take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeDirection {
    Long,
    Short,
}

impl fmt::Display for TradeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeDirection::Long => write!(f, "LONG"),
            TradeDirection::Short => write!(f, "SHORT"),
        }
    }
}

/// Conviction tier of a directional signal, used to scale risk and leverage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalStrength {
    Base,
    Strong,
    Ultra,
}

/// Seven-level mean-reversion signal taxonomy.
///
/// Short-side classes fire on high positive z-scores (funding favors longs,
/// who are overextended); long-side classes mirror them on negative z-scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Signal {
    UltraShort,
    StrongShort,
    Short,
    Neutral,
    Long,
    StrongLong,
    UltraLong,
}

impl Signal {
    /// Trade direction, or `None` for a neutral reading.
    pub fn direction(&self) -> Option<TradeDirection> {
        match self {
            Signal::UltraShort | Signal::StrongShort | Signal::Short => {
                Some(TradeDirection::Short)
            }
            Signal::UltraLong | Signal::StrongLong | Signal::Long => Some(TradeDirection::Long),
            Signal::Neutral => None,
        }
    }

    /// Conviction tier, `None` for neutral.
    pub fn strength(&self) -> Option<SignalStrength> {
        match self {
            Signal::UltraShort | Signal::UltraLong => Some(SignalStrength::Ultra),
            Signal::StrongShort | Signal::StrongLong => Some(SignalStrength::Strong),
            Signal::Short | Signal::Long => Some(SignalStrength::Base),
            Signal::Neutral => None,
        }
    }

    /// The same-strength class on the opposite side. `Neutral` is its own mirror.
    pub fn mirror(&self) -> Signal {
        match self {
            Signal::UltraShort => Signal::UltraLong,
            Signal::StrongShort => Signal::StrongLong,
            Signal::Short => Signal::Long,
            Signal::Neutral => Signal::Neutral,
            Signal::Long => Signal::Short,
            Signal::StrongLong => Signal::StrongShort,
            Signal::UltraLong => Signal::UltraShort,
        }
    }

    pub fn is_neutral(&self) -> bool {
        matches!(self, Signal::Neutral)
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Signal::UltraShort => "ULTRA_SHORT",
            Signal::StrongShort => "STRONG_SHORT",
            Signal::Short => "SHORT",
            Signal::Neutral => "NEUTRAL",
            Signal::Long => "LONG",
            Signal::StrongLong => "STRONG_LONG",
            Signal::UltraLong => "ULTRA_LONG",
        };
        f.pad(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction() {
        assert_eq!(Signal::UltraShort.direction(), Some(TradeDirection::Short));
        assert_eq!(Signal::Short.direction(), Some(TradeDirection::Short));
        assert_eq!(Signal::StrongLong.direction(), Some(TradeDirection::Long));
        assert_eq!(Signal::Neutral.direction(), None);
    }

    #[test]
    fn test_strength_tiers() {
        assert_eq!(Signal::UltraLong.strength(), Some(SignalStrength::Ultra));
        assert_eq!(Signal::StrongShort.strength(), Some(SignalStrength::Strong));
        assert_eq!(Signal::Long.strength(), Some(SignalStrength::Base));
        assert_eq!(Signal::Neutral.strength(), None);
    }

    #[test]
    fn test_mirror_is_involution() {
        let all = [
            Signal::UltraShort,
            Signal::StrongShort,
            Signal::Short,
            Signal::Neutral,
            Signal::Long,
            Signal::StrongLong,
            Signal::UltraLong,
        ];
        for signal in all {
            assert_eq!(signal.mirror().mirror(), signal);
        }
        assert_eq!(Signal::Neutral.mirror(), Signal::Neutral);
    }

    #[test]
    fn test_display_names() {
        assert_eq!(Signal::UltraShort.to_string(), "ULTRA_SHORT");
        assert_eq!(Signal::StrongLong.to_string(), "STRONG_LONG");
        assert_eq!(Signal::Neutral.to_string(), "NEUTRAL");
    }
}
