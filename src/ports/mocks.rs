//! Hand-rolled mock port for unit and integration tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::FundingSample;

use super::market_data::{FundingDataPort, MarketDataError, MarketSnapshot};

/// Mock funding data port that records calls and serves scripted responses.
#[derive(Debug, Default)]
pub struct MockFundingData {
    calls: Arc<Mutex<Vec<String>>>,
    histories: Arc<Mutex<HashMap<String, Vec<FundingSample>>>>,
    snapshots: Arc<Mutex<HashMap<String, MarketSnapshot>>>,
    failures: Arc<Mutex<HashMap<String, String>>>,
}

impl MockFundingData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to script a symbol's history and snapshot.
    pub fn with_symbol(
        self,
        symbol: &str,
        history: Vec<FundingSample>,
        price: f64,
        funding_rate: f64,
    ) -> Self {
        self.histories
            .lock()
            .unwrap()
            .insert(symbol.to_string(), history);
        self.snapshots.lock().unwrap().insert(
            symbol.to_string(),
            MarketSnapshot {
                symbol: symbol.to_string(),
                price,
                funding_rate,
                next_funding_time: None,
            },
        );
        self
    }

    /// Builder method to make a symbol fail with the given message.
    pub fn with_failure(self, symbol: &str, message: &str) -> Self {
        self.failures
            .lock()
            .unwrap()
            .insert(symbol.to_string(), message.to_string());
        self
    }

    /// All recorded calls, as "method:symbol" strings.
    pub fn recorded_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn check_failure(&self, symbol: &str) -> Result<(), MarketDataError> {
        if let Some(msg) = self.failures.lock().unwrap().get(symbol) {
            return Err(MarketDataError::Api(msg.clone()));
        }
        Ok(())
    }
}

#[async_trait]
impl FundingDataPort for MockFundingData {
    async fn funding_history(
        &self,
        symbol: &str,
        limit: usize,
    ) -> Result<Vec<FundingSample>, MarketDataError> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("funding_history:{}", symbol));
        self.check_failure(symbol)?;

        let histories = self.histories.lock().unwrap();
        let history = histories
            .get(symbol)
            .ok_or_else(|| MarketDataError::Api(format!("no history scripted for {}", symbol)))?;

        let start = history.len().saturating_sub(limit);
        Ok(history[start..].to_vec())
    }

    async fn market_snapshot(&self, symbol: &str) -> Result<MarketSnapshot, MarketDataError> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("market_snapshot:{}", symbol));
        self.check_failure(symbol)?;

        self.snapshots
            .lock()
            .unwrap()
            .get(symbol)
            .cloned()
            .ok_or_else(|| MarketDataError::Api(format!("no snapshot scripted for {}", symbol)))
    }
}
