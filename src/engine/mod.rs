//! Engine Layer - The funding-rate signal pipeline
//!
//! Every function here is a deterministic, synchronous function of its
//! inputs. The pipeline per instrument:
//!
//! window statistics -> z-score -> {trend reversal, confirmations}
//!   -> classification -> edge estimation -> (with capital) position sizing
//!
//! Instruments are independent; callers may run many pipelines concurrently
//! with no shared state.

pub mod analyzer;
pub mod classifier;
pub mod confirmations;
pub mod edge;
pub mod sizing;
pub mod stats;
pub mod trend;

pub use analyzer::{AnalyzerConfig, FundingAnalyzer, SkipReason};
pub use classifier::classify;
pub use confirmations::{score_confirmations, ConfirmationScore, DEFAULT_EXTREME_PROXIMITY};
pub use edge::{edge_score, win_probability};
pub use sizing::{size_position, STOP_LOSS_PCT, TAKE_PROFIT_PCT};
pub use stats::{window_stats, z_score, DEFAULT_LOOKBACK, MIN_SAMPLES_FOR_ZSCORE};
pub use trend::{detect_reversal, TrendReading, DEFAULT_TREND_WINDOW};
