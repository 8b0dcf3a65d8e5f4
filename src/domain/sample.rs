//! Funding-rate observations
//!
//! A `FundingSample` is one historical funding payment for a perpetual
//! contract. Samples are fetched by an adapter, handed to the engine as an
//! ascending-timestamp slice, and never mutated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Funding periods per day assumed when annualizing (8-hour intervals).
pub const FUNDING_PERIODS_PER_DAY: f64 = 3.0;

/// Hours in the reference funding interval used for cross-venue comparison.
pub const REFERENCE_INTERVAL_HOURS: f64 = 8.0;

/// One historical funding-rate observation for an instrument.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FundingSample {
    /// When the funding payment settled
    pub timestamp: DateTime<Utc>,
    /// Funding rate as a fraction (0.0001 = 0.01%)
    pub funding_rate: f64,
    /// Rate normalized to a per-8h interval, for venues with other intervals
    pub relative_funding_rate: f64,
}

impl FundingSample {
    /// Build a sample for a venue that pays funding every 8 hours, where the
    /// observed and interval-normalized rates coincide.
    pub fn standard(timestamp: DateTime<Utc>, funding_rate: f64) -> Self {
        Self {
            timestamp,
            funding_rate,
            relative_funding_rate: funding_rate,
        }
    }

    /// Build a sample for a venue with a non-standard funding interval,
    /// normalizing the rate to the 8-hour reference interval.
    pub fn with_interval(timestamp: DateTime<Utc>, funding_rate: f64, interval_hours: f64) -> Self {
        let relative = if interval_hours > 0.0 {
            funding_rate * REFERENCE_INTERVAL_HOURS / interval_hours
        } else {
            funding_rate
        };
        Self {
            timestamp,
            funding_rate,
            relative_funding_rate: relative,
        }
    }

    /// Annualized rate in percent, assuming three funding periods per day.
    pub fn annualized_pct(&self) -> f64 {
        annualized_pct(self.funding_rate)
    }
}

/// Project a per-interval funding rate to a yearly percentage.
pub fn annualized_pct(rate: f64) -> f64 {
    rate * FUNDING_PERIODS_PER_DAY * 365.0 * 100.0
}
