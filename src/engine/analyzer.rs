//! Funding Analyzer
//!
//! The full per-symbol pipeline: window statistics -> z-score -> trend and
//! confirmations -> classification -> edge estimation. Pure and
//! deterministic; the caller supplies the samples, the live reading and the
//! analysis timestamp.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::{AnalysisResult, FundingSample};

use super::classifier::classify;
use super::confirmations::{score_confirmations, DEFAULT_EXTREME_PROXIMITY};
use super::edge::{edge_score, win_probability};
use super::stats::{trailing_window, window_stats, z_score, DEFAULT_LOOKBACK};
use super::trend::{detect_reversal, DEFAULT_TREND_WINDOW};

/// Why a symbol produced no analysis. A normal, locally-handled outcome,
/// distinct from a computed NEUTRAL signal.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SkipReason {
    #[error("insufficient history: {have} samples, need {need}")]
    InsufficientHistory { have: usize, need: usize },
}

/// Tunables for the analysis pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzerConfig {
    /// Window for mean/std and z-score (~30 days at 8h intervals)
    pub lookback: usize,
    /// Minimum history length before analysis is attempted
    pub min_history: usize,
    /// Recent window for trend-reversal detection
    pub trend_window: usize,
    /// Fraction of the window extreme that counts as "near" it
    pub extreme_proximity: f64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            lookback: DEFAULT_LOOKBACK,
            min_history: DEFAULT_LOOKBACK,
            trend_window: DEFAULT_TREND_WINDOW,
            extreme_proximity: DEFAULT_EXTREME_PROXIMITY,
        }
    }
}

/// Stateless analysis pipeline for funding-rate series.
#[derive(Debug, Clone, Default)]
pub struct FundingAnalyzer {
    config: AnalyzerConfig,
}

impl FundingAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyze one instrument.
    ///
    /// `samples` must be in ascending timestamp order; `current_rate` is the
    /// live funding rate and `price` the current mark price. Short history
    /// yields a [`SkipReason`], never a panic or a fabricated signal.
    pub fn analyze(
        &self,
        symbol: &str,
        samples: &[FundingSample],
        price: f64,
        current_rate: f64,
        as_of: DateTime<Utc>,
    ) -> Result<AnalysisResult, SkipReason> {
        if samples.len() < self.config.min_history {
            return Err(SkipReason::InsufficientHistory {
                have: samples.len(),
                need: self.config.min_history,
            });
        }

        let rates: Vec<f64> = samples.iter().map(|s| s.funding_rate).collect();
        let window = trailing_window(&rates, self.config.lookback);

        let (mean, std) = window_stats(window);
        let z = z_score(&rates, current_rate, self.config.lookback);

        let trend = detect_reversal(&rates, current_rate, self.config.trend_window);
        let score = score_confirmations(
            z,
            current_rate,
            window,
            &trend,
            self.config.extreme_proximity,
        );

        let signal = classify(z, score.count);

        Ok(AnalysisResult {
            symbol: symbol.to_string(),
            price,
            current_rate,
            mean,
            std,
            z_score: z,
            signal,
            confirmations: score.count,
            confirmation_details: score.details,
            edge_score: edge_score(z, score.count),
            win_probability: win_probability(z, score.count, trend.is_reversing),
            is_funding_reversing: trend.is_reversing,
            timestamp: as_of,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Signal;
    use approx::assert_relative_eq;
    use chrono::TimeZone;

    fn samples_from(rates: &[f64]) -> Vec<FundingSample> {
        rates
            .iter()
            .enumerate()
            .map(|(i, &r)| {
                let ts = Utc.timestamp_opt(1_700_000_000 + i as i64 * 28_800, 0).unwrap();
                FundingSample::standard(ts, r)
            })
            .collect()
    }

    fn now() -> DateTime<Utc> {
        Utc.timestamp_opt(1_710_000_000, 0).unwrap()
    }

    #[test]
    fn test_insufficient_history_is_skipped() {
        let analyzer = FundingAnalyzer::default();
        let samples = samples_from(&[0.0001; 89]);
        let err = analyzer
            .analyze("BTCUSDT", &samples, 50_000.0, 0.0001, now())
            .unwrap_err();
        assert_eq!(
            err,
            SkipReason::InsufficientHistory { have: 89, need: 90 }
        );
        assert!(err.to_string().contains("89"));
    }

    #[test]
    fn test_constant_series_is_neutral() {
        // std = 0 forces z = 0, no confirmations, NEUTRAL
        let analyzer = FundingAnalyzer::default();
        let samples = samples_from(&[0.0001; 90]);
        let result = analyzer
            .analyze("BTCUSDT", &samples, 50_000.0, 0.0001, now())
            .unwrap();

        assert_eq!(result.std, 0.0);
        assert_eq!(result.z_score, 0.0);
        assert_eq!(result.signal, Signal::Neutral);
        assert_eq!(result.confirmations, 0);
        assert!(result.confirmation_details.is_empty());
        assert_eq!(result.edge_score, 0.0);
        assert_eq!(result.win_probability, 0.50);
    }

    #[test]
    fn test_three_sigma_with_full_confirmations() {
        // Window mean 0, std 0.0005; live rate 0.0015 is exactly 3 sigma.
        // The tail of the series declines so the trend reads as reversing.
        let mut rates = Vec::new();
        for _ in 0..45 {
            rates.push(0.0005);
            rates.push(-0.0005);
        }
        // Recent window slopes down while the live rate stays above its mean
        rates.truncate(84);
        rates.extend([0.0005, 0.0004, 0.0003, 0.0002, 0.0001, -0.0005]);

        let samples = samples_from(&rates);
        let analyzer = FundingAnalyzer::default();
        let result = analyzer
            .analyze("ETHUSDT", &samples, 3_000.0, 0.0015, now())
            .unwrap();

        assert!(result.z_score > 2.9);
        assert!(result.is_funding_reversing);
        // 4 z-thresholds + reversal + extreme proximity
        assert!(result.confirmations >= 5);
        assert_eq!(result.signal, Signal::UltraShort);
        assert_relative_eq!(result.edge_score, 100.0, epsilon = 1e-9);
        assert_eq!(result.confirmation_details.len(), result.confirmations as usize);
    }

    #[test]
    fn test_pipeline_is_deterministic() {
        let mut rates = vec![0.0001; 60];
        rates.extend(vec![-0.0003; 20]);
        rates.extend(vec![0.0008; 10]);
        let samples = samples_from(&rates);
        let analyzer = FundingAnalyzer::default();

        let a = analyzer.analyze("SOLUSDT", &samples, 150.0, 0.0012, now());
        let b = analyzer.analyze("SOLUSDT", &samples, 150.0, 0.0012, now());
        assert_eq!(a, b);
    }

    #[test]
    fn test_negative_extreme_mirrors_to_long() {
        let mut rates = Vec::new();
        for _ in 0..45 {
            rates.push(0.0005);
            rates.push(-0.0005);
        }
        rates.truncate(84);
        rates.extend([-0.0005, -0.0004, -0.0003, -0.0002, -0.0001, 0.0005]);

        let samples = samples_from(&rates);
        let analyzer = FundingAnalyzer::default();
        let result = analyzer
            .analyze("ETHUSDT", &samples, 3_000.0, -0.0015, now())
            .unwrap();

        assert!(result.z_score < -2.9);
        assert_eq!(result.signal, Signal::UltraLong);
    }
}
