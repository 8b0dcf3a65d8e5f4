//! CLI Command Definitions
//!
//! Argument parsing for the fundrev binary, using clap derive macros.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Fundrev - Funding-Rate Mean Reversion Signal Engine
#[derive(Parser, Debug)]
#[command(
    name = "fundrev",
    version = env!("CARGO_PKG_VERSION"),
    about = "Funding-rate mean reversion signals for perpetual futures",
    long_about = "Fundrev scans perpetual futures funding rates for statistically \
                  extreme readings, grades them through a dual-gated seven-level \
                  classifier, and derives risk-bounded position sizing."
)]
pub struct CliApp {
    /// The command to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scan all configured symbols and print the signal table
    Scan(ScanCmd),

    /// Analyze one symbol in detail, including confirmation breakdown
    Analyze(AnalyzeCmd),

    /// Analyze one symbol and derive position sizing
    Size(SizeCmd),

    /// Show progress toward the configured capital goal
    Progress(ProgressCmd),
}

/// Scan configured symbols
#[derive(Parser, Debug)]
pub struct ScanCmd {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Output format (text, json)
    #[arg(short, long, value_name = "FORMAT", default_value = "text")]
    pub format: String,

    /// Only show directional signals that clear the profile gates
    #[arg(long)]
    pub actionable_only: bool,
}

/// Analyze a single symbol
#[derive(Parser, Debug)]
pub struct AnalyzeCmd {
    /// Instrument symbol (e.g. BTCUSDT)
    #[arg(value_name = "SYMBOL")]
    pub symbol: String,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Output format (text, json)
    #[arg(short, long, value_name = "FORMAT", default_value = "text")]
    pub format: String,
}

/// Derive position sizing for a symbol
#[derive(Parser, Debug)]
pub struct SizeCmd {
    /// Instrument symbol (e.g. BTCUSDT)
    #[arg(value_name = "SYMBOL")]
    pub symbol: String,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Override capital from the config file
    #[arg(long, value_name = "AMOUNT")]
    pub capital: Option<f64>,

    /// Override risk profile (low, medium, high, ultra)
    #[arg(long, value_name = "PROFILE")]
    pub profile: Option<String>,
}

/// Capital goal progress
#[derive(Parser, Debug)]
pub struct ProgressCmd {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Override current capital from the config file
    #[arg(long, value_name = "AMOUNT")]
    pub capital: Option<f64>,
}
