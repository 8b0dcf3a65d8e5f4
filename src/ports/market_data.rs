use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::FundingSample;

/// Market data error type
#[derive(Error, Debug)]
pub enum MarketDataError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Exchange API error: {0}")]
    Api(String),

    #[error("Data parsing error: {0}")]
    Parse(String),
}

/// Live per-instrument reading alongside the historical series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub symbol: String,
    /// Current mark price
    pub price: f64,
    /// Current funding rate as a fraction
    pub funding_rate: f64,
    /// When the next funding payment settles, if the venue reports it
    pub next_funding_time: Option<DateTime<Utc>>,
}

/// Funding data port trait
///
/// Implementations own wire-format validation: the engine only ever sees
/// the typed contract, with history in ascending timestamp order.
#[async_trait]
pub trait FundingDataPort: Send + Sync {
    /// Fetch up to `limit` most recent funding samples, oldest first.
    async fn funding_history(
        &self,
        symbol: &str,
        limit: usize,
    ) -> Result<Vec<FundingSample>, MarketDataError>;

    /// Fetch the current price and funding rate.
    async fn market_snapshot(&self, symbol: &str) -> Result<MarketSnapshot, MarketDataError>;
}
