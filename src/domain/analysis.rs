//! Per-symbol analysis output
//!
//! `AnalysisResult` is the ephemeral value produced by one pass of the
//! signal pipeline. It is created fresh on every analysis call and never
//! mutated afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::signal::Signal;

/// Full output of one funding-rate analysis for one instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Instrument symbol (e.g. "BTCUSDT")
    pub symbol: String,
    /// Mark price at analysis time
    pub price: f64,
    /// Current funding rate as a fraction
    pub current_rate: f64,
    /// Lookback window mean funding rate
    pub mean: f64,
    /// Lookback window population standard deviation
    pub std: f64,
    /// Standardized deviation of the current rate from the window mean
    pub z_score: f64,
    /// Classified signal
    pub signal: Signal,
    /// Number of corroborating conditions that held
    pub confirmations: u32,
    /// One explanation per confirmation, in evaluation order
    pub confirmation_details: Vec<String>,
    /// Heuristic edge score in [0, 100]
    pub edge_score: f64,
    /// Heuristic win probability in [0.50, 0.80]
    pub win_probability: f64,
    /// Whether the short-term funding trend is turning against the extreme
    pub is_funding_reversing: bool,
    /// Caller-supplied analysis time
    pub timestamp: DateTime<Utc>,
}

impl AnalysisResult {
    /// A signal a caller can act on (anything directional).
    pub fn is_directional(&self) -> bool {
        !self.signal.is_neutral()
    }
}
