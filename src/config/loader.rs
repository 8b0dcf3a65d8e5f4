//! Configuration Loader
//!
//! Loads and validates configuration from TOML files matching the
//! config/default.toml structure.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::domain::RiskProfile;

/// Main configuration structure matching config/default.toml
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub analyzer: AnalyzerSection,
    pub portfolio: PortfolioSection,
    pub exchange: ExchangeSection,
    pub symbols: SymbolsSection,
    pub logging: LoggingSection,
}

/// Analyzer configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzerSection {
    /// Lookback window for mean/std and z-score (90 = ~30 days at 8h)
    pub lookback_period: usize,
    /// Minimum samples before a symbol is analyzed at all
    pub min_history: usize,
    /// Recent window for trend-reversal detection (6 = ~2 days at 8h)
    pub trend_window: usize,
    /// Fraction of the window extreme that counts as "near" it (0.90)
    pub extreme_proximity: f64,
}

/// Portfolio and risk configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct PortfolioSection {
    /// Current trading capital in quote currency
    pub capital: f64,
    /// Capital the goal tracker measures progress from
    pub start_capital: f64,
    /// Capital goal
    pub goal_capital: f64,
    /// Risk profile: "low", "medium", "high" or "ultra"
    pub risk_profile: RiskProfile,
}

/// Exchange API configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct ExchangeSection {
    /// USD-M futures REST base URL
    pub api_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// How many funding samples to request per symbol
    pub history_limit: usize,
}

impl ExchangeSection {
    /// API URL with environment variable override.
    /// Checks FUNDREV_API_URL first, falls back to the config value.
    pub fn get_api_url(&self) -> String {
        std::env::var("FUNDREV_API_URL").unwrap_or_else(|_| self.api_url.clone())
    }
}

/// Symbols configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct SymbolsSection {
    /// Instruments to scan (e.g. ["BTCUSDT", "ETHUSDT"])
    pub tracked: Vec<String>,
}

/// Logging configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSection {
    /// Log level: "trace", "debug", "info", "warn", "error"
    pub level: String,
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Load configuration from a TOML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

impl Config {
    /// Validate all configuration parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.analyzer.lookback_period == 0 {
            return Err(ConfigError::Validation(format!(
                "lookback_period must be > 0, got {}",
                self.analyzer.lookback_period
            )));
        }

        if self.analyzer.min_history == 0 {
            return Err(ConfigError::Validation(format!(
                "min_history must be > 0, got {}",
                self.analyzer.min_history
            )));
        }

        if self.analyzer.trend_window < 2 {
            return Err(ConfigError::Validation(format!(
                "trend_window must be >= 2, got {}",
                self.analyzer.trend_window
            )));
        }

        if !(0.0..=1.0).contains(&self.analyzer.extreme_proximity) {
            return Err(ConfigError::Validation(format!(
                "extreme_proximity must be 0-1, got {}",
                self.analyzer.extreme_proximity
            )));
        }

        if self.portfolio.capital <= 0.0 {
            return Err(ConfigError::Validation(format!(
                "capital must be > 0, got {}",
                self.portfolio.capital
            )));
        }

        if self.portfolio.start_capital <= 0.0
            || self.portfolio.goal_capital <= self.portfolio.start_capital
        {
            return Err(ConfigError::Validation(format!(
                "goal_capital ({}) must exceed start_capital ({}), both > 0",
                self.portfolio.goal_capital, self.portfolio.start_capital
            )));
        }

        if self.exchange.history_limit < self.analyzer.min_history {
            return Err(ConfigError::Validation(format!(
                "history_limit ({}) must cover min_history ({})",
                self.exchange.history_limit, self.analyzer.min_history
            )));
        }

        if self.symbols.tracked.is_empty() {
            return Err(ConfigError::Validation(
                "symbols.tracked must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
