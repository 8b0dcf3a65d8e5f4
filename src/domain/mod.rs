//! Domain Layer - Core value types for the funding-rate signal engine
//!
//! Pure types with no I/O. Everything here is either a caller-supplied
//! observation (`FundingSample`), a constant table (`RiskProfile`), or an
//! ephemeral derived value (`AnalysisResult`, `PositionSizing`,
//! `GoalProgress`).

pub mod analysis;
pub mod progress;
pub mod risk;
pub mod sample;
pub mod signal;

pub use analysis::AnalysisResult;
pub use progress::{GoalProgress, DEFAULT_GOAL_CAPITAL, DEFAULT_START_CAPITAL};
pub use risk::{
    PositionSizing, RiskParams, RiskProfile, RiskProfileError, MAX_EFFECTIVE_LEVERAGE,
    MAX_POSITION_FRACTION, MAX_RISK_PER_TRADE,
};
pub use sample::{annualized_pct, FundingSample, FUNDING_PERIODS_PER_DAY};
pub use signal::{Signal, SignalStrength, TradeDirection};
