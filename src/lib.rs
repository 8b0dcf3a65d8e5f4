//! Fundrev - Funding-Rate Mean Reversion Signal Engine
//!
//! Scans perpetual futures funding rates for statistically extreme readings
//! and turns them into graded mean-reversion signals with risk-bounded sizing.
//!
//! # Modules
//!
//! - `domain`: Core value types (FundingSample, Signal, AnalysisResult, RiskProfile)
//! - `engine`: The signal pipeline (statistics, trend, confirmations, classifier, sizing)
//! - `ports`: Trait abstractions (FundingDataPort)
//! - `adapters`: External implementations (Binance USD-M futures, CLI)
//! - `config`: Configuration loading and validation
//! - `application`: Multi-symbol scanner

pub mod domain;
pub mod engine;
pub mod ports;
pub mod adapters;
pub mod config;
pub mod application;
