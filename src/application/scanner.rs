//! Market Scanner
//!
//! Runs the analysis pipeline across the tracked symbol list. Each symbol
//! is fetched and analyzed in its own task; a network failure or short
//! history on one symbol never disturbs the rest of the batch.

use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tokio::task::JoinHandle;

use crate::domain::{AnalysisResult, RiskProfile};
use crate::engine::FundingAnalyzer;
use crate::ports::market_data::FundingDataPort;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Market data error: {0}")]
    MarketData(String),
    #[error("Scan task failed: {0}")]
    Task(String),
}

/// Per-symbol outcome of one scan pass.
#[derive(Debug, Clone)]
pub enum SymbolOutcome {
    /// Analysis ran; `actionable` reflects the selected risk profile's
    /// minimum z-score and confirmation gates
    Analyzed {
        result: AnalysisResult,
        actionable: bool,
    },
    /// Not enough history; the diagnostic explains why ("no data" in a UI)
    Skipped(String),
    /// Fetch or task failure, isolated to this symbol
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct SymbolReport {
    pub symbol: String,
    pub outcome: SymbolOutcome,
}

/// Scans many instruments concurrently through a funding data port.
pub struct MarketScanner {
    port: Arc<dyn FundingDataPort>,
    analyzer: FundingAnalyzer,
    profile: RiskProfile,
    history_limit: usize,
}

impl MarketScanner {
    pub fn new(
        port: Arc<dyn FundingDataPort>,
        analyzer: FundingAnalyzer,
        profile: RiskProfile,
        history_limit: usize,
    ) -> Self {
        Self {
            port,
            analyzer,
            profile,
            history_limit,
        }
    }

    /// Scan all symbols concurrently. Reports come back in input order.
    pub async fn scan(&self, symbols: &[String]) -> Vec<SymbolReport> {
        let as_of = Utc::now();

        let handles: Vec<JoinHandle<SymbolReport>> = symbols
            .iter()
            .map(|symbol| {
                let port = Arc::clone(&self.port);
                let analyzer = self.analyzer.clone();
                let profile = self.profile;
                let history_limit = self.history_limit;
                let symbol = symbol.clone();

                tokio::spawn(async move {
                    scan_one(&*port, &analyzer, profile, history_limit, &symbol, as_of).await
                })
            })
            .collect();

        let mut reports = Vec::with_capacity(handles.len());
        for (handle, symbol) in handles.into_iter().zip(symbols) {
            let report = match handle.await {
                Ok(report) => report,
                Err(e) => SymbolReport {
                    symbol: symbol.clone(),
                    outcome: SymbolOutcome::Failed(ScanError::Task(e.to_string()).to_string()),
                },
            };
            reports.push(report);
        }
        reports
    }

    /// Scan a single symbol.
    pub async fn scan_symbol(&self, symbol: &str) -> SymbolReport {
        scan_one(
            &*self.port,
            &self.analyzer,
            self.profile,
            self.history_limit,
            symbol,
            Utc::now(),
        )
        .await
    }
}

async fn scan_one(
    port: &dyn FundingDataPort,
    analyzer: &FundingAnalyzer,
    profile: RiskProfile,
    history_limit: usize,
    symbol: &str,
    as_of: chrono::DateTime<Utc>,
) -> SymbolReport {
    let fetched = async {
        let history = port.funding_history(symbol, history_limit).await?;
        let snapshot = port.market_snapshot(symbol).await?;
        Ok::<_, crate::ports::market_data::MarketDataError>((history, snapshot))
    }
    .await;

    let (history, snapshot) = match fetched {
        Ok(data) => data,
        Err(e) => {
            tracing::warn!("Fetch failed for {}: {}", symbol, e);
            return SymbolReport {
                symbol: symbol.to_string(),
                outcome: SymbolOutcome::Failed(ScanError::MarketData(e.to_string()).to_string()),
            };
        }
    };

    match analyzer.analyze(symbol, &history, snapshot.price, snapshot.funding_rate, as_of) {
        Ok(result) => {
            let params = profile.params();
            let actionable = result.is_directional()
                && result.z_score.abs() >= params.min_z
                && result.confirmations >= params.min_confirmations;

            tracing::debug!(
                "{}: z={:.2} signal={} confirmations={} actionable={}",
                symbol,
                result.z_score,
                result.signal,
                result.confirmations,
                actionable
            );

            SymbolReport {
                symbol: symbol.to_string(),
                outcome: SymbolOutcome::Analyzed { result, actionable },
            }
        }
        Err(skip) => {
            tracing::debug!("{}: skipped ({})", symbol, skip);
            SymbolReport {
                symbol: symbol.to_string(),
                outcome: SymbolOutcome::Skipped(skip.to_string()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FundingSample;
    use crate::engine::AnalyzerConfig;
    use crate::ports::mocks::MockFundingData;
    use chrono::TimeZone;

    fn flat_history(n: usize, rate: f64) -> Vec<FundingSample> {
        (0..n)
            .map(|i| {
                let ts = Utc.timestamp_opt(1_700_000_000 + i as i64 * 28_800, 0).unwrap();
                FundingSample::standard(ts, rate)
            })
            .collect()
    }

    fn scanner_with(mock: MockFundingData) -> MarketScanner {
        MarketScanner::new(
            Arc::new(mock),
            FundingAnalyzer::new(AnalyzerConfig::default()),
            RiskProfile::Medium,
            200,
        )
    }

    #[tokio::test]
    async fn test_failure_is_isolated_per_symbol() {
        let mock = MockFundingData::new()
            .with_symbol("BTCUSDT", flat_history(90, 0.0001), 50_000.0, 0.0001)
            .with_failure("ETHUSDT", "connection reset");
        let scanner = scanner_with(mock);

        let reports = scanner
            .scan(&["BTCUSDT".to_string(), "ETHUSDT".to_string()])
            .await;

        assert_eq!(reports.len(), 2);
        assert!(matches!(reports[0].outcome, SymbolOutcome::Analyzed { .. }));
        match &reports[1].outcome {
            SymbolOutcome::Failed(msg) => assert!(msg.contains("connection reset")),
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_short_history_is_skipped_not_failed() {
        let mock = MockFundingData::new().with_symbol(
            "DOGEUSDT",
            flat_history(30, 0.0001),
            0.10,
            0.0001,
        );
        let scanner = scanner_with(mock);

        let report = scanner.scan_symbol("DOGEUSDT").await;
        match report.outcome {
            SymbolOutcome::Skipped(reason) => {
                assert!(reason.contains("30"));
                assert!(reason.contains("90"));
            }
            other => panic!("expected skip, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_neutral_result_not_actionable() {
        let mock = MockFundingData::new().with_symbol(
            "BTCUSDT",
            flat_history(90, 0.0001),
            50_000.0,
            0.0001,
        );
        let scanner = scanner_with(mock);

        let report = scanner.scan_symbol("BTCUSDT").await;
        match report.outcome {
            SymbolOutcome::Analyzed { result, actionable } => {
                assert!(result.signal.is_neutral());
                assert!(!actionable);
            }
            other => panic!("expected analysis, got {:?}", other),
        }
    }
}
