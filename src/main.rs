//! Fundrev - Funding-Rate Mean Reversion Signal Engine
//!
//! Scans perpetual futures funding rates for statistically extreme readings
//! and renders graded mean-reversion signals with risk-bounded sizing.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde_json::json;
use tracing_subscriber::{fmt, EnvFilter};

use fundrev::adapters::binance::{BinanceClient, BinanceConfig};
use fundrev::adapters::cli::{AnalyzeCmd, CliApp, Command, ProgressCmd, ScanCmd, SizeCmd};
use fundrev::application::{MarketScanner, SymbolOutcome, SymbolReport};
use fundrev::config::{load_config, Config};
use fundrev::domain::{annualized_pct, AnalysisResult, GoalProgress, RiskProfile};
use fundrev::engine::{size_position, AnalyzerConfig, FundingAnalyzer};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (overrides like FUNDREV_API_URL go here)
    dotenvy::dotenv().ok();

    let app = CliApp::parse();

    match app.command {
        Command::Scan(cmd) => scan_command(cmd, app.verbose, app.debug).await,
        Command::Analyze(cmd) => analyze_command(cmd, app.verbose, app.debug).await,
        Command::Size(cmd) => size_command(cmd, app.verbose, app.debug).await,
        Command::Progress(cmd) => progress_command(cmd, app.verbose, app.debug).await,
    }
}

/// CLI flags override the configured log level; RUST_LOG overrides both.
fn init_logging(verbose: bool, debug: bool, config_level: &str) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config_level))
    };

    fmt().with_env_filter(filter).init();
}

/// Build the scanner stack from a loaded config
fn build_scanner(config: &Config, profile: RiskProfile) -> Result<MarketScanner> {
    let client = BinanceClient::with_config(BinanceConfig {
        api_base_url: config.exchange.get_api_url(),
        timeout: Duration::from_secs(config.exchange.timeout_secs),
        max_retries: 3,
    })
    .context("Failed to create exchange client")?;

    let analyzer = FundingAnalyzer::new(AnalyzerConfig {
        lookback: config.analyzer.lookback_period,
        min_history: config.analyzer.min_history,
        trend_window: config.analyzer.trend_window,
        extreme_proximity: config.analyzer.extreme_proximity,
    });

    Ok(MarketScanner::new(
        Arc::new(client),
        analyzer,
        profile,
        config.exchange.history_limit,
    ))
}

async fn scan_command(cmd: ScanCmd, verbose: bool, debug: bool) -> Result<()> {
    let config = load_config(&cmd.config).context("Failed to load configuration")?;
    init_logging(verbose, debug, &config.logging.level);
    let scanner = build_scanner(&config, config.portfolio.risk_profile)?;

    tracing::info!("Scanning {} symbols", config.symbols.tracked.len());
    let reports = scanner.scan(&config.symbols.tracked).await;

    match cmd.format.as_str() {
        "json" => print_reports_json(&reports)?,
        "text" => print_reports_table(&reports, cmd.actionable_only),
        other => bail!("Unknown output format '{}' (expected text or json)", other),
    }
    Ok(())
}

async fn analyze_command(cmd: AnalyzeCmd, verbose: bool, debug: bool) -> Result<()> {
    let config = load_config(&cmd.config).context("Failed to load configuration")?;
    init_logging(verbose, debug, &config.logging.level);
    let scanner = build_scanner(&config, config.portfolio.risk_profile)?;

    let report = scanner.scan_symbol(&cmd.symbol).await;

    match report.outcome {
        SymbolOutcome::Analyzed { result, actionable } => {
            if cmd.format == "json" {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_analysis_detail(&result, actionable);
            }
        }
        SymbolOutcome::Skipped(reason) => println!("{}: no data ({})", cmd.symbol, reason),
        SymbolOutcome::Failed(error) => bail!("Analysis failed for {}: {}", cmd.symbol, error),
    }
    Ok(())
}

async fn size_command(cmd: SizeCmd, verbose: bool, debug: bool) -> Result<()> {
    let config = load_config(&cmd.config).context("Failed to load configuration")?;
    init_logging(verbose, debug, &config.logging.level);

    let profile = match &cmd.profile {
        Some(name) => name.parse::<RiskProfile>()?,
        None => config.portfolio.risk_profile,
    };
    let capital = cmd.capital.unwrap_or(config.portfolio.capital);
    if capital <= 0.0 {
        bail!("Capital must be positive, got {}", capital);
    }

    let scanner = build_scanner(&config, profile)?;
    let report = scanner.scan_symbol(&cmd.symbol).await;

    let (result, actionable) = match report.outcome {
        SymbolOutcome::Analyzed { result, actionable } => (result, actionable),
        SymbolOutcome::Skipped(reason) => {
            println!("{}: no data ({})", cmd.symbol, reason);
            return Ok(());
        }
        SymbolOutcome::Failed(error) => bail!("Analysis failed for {}: {}", cmd.symbol, error),
    };

    print_analysis_detail(&result, actionable);

    match size_position(&result, capital, profile) {
        Some(sizing) => {
            println!();
            println!("Position sizing ({} profile, {:.2} capital):", profile, capital);
            println!("  direction      {}", sizing.direction);
            println!(
                "  position size  {:.2} ({:.1}% of capital)",
                sizing.position_size,
                sizing.position_size / capital * 100.0
            );
            println!("  leverage       {}x", sizing.leverage);
            println!(
                "  risk           {:.2} ({:.2}% of capital)",
                sizing.risk_amount,
                sizing.risk_percent * 100.0
            );
            println!(
                "  stop loss      {:.4} ({:.2}%)",
                sizing.stop_loss_price,
                sizing.stop_loss_percent * 100.0
            );
            println!(
                "  take profit    {:.4} ({:.2}%)",
                sizing.take_profit_price,
                sizing.take_profit_percent * 100.0
            );
            println!("  expected value {:+.4} per unit", sizing.expected_value);
            if !actionable {
                println!();
                println!(
                    "note: signal does not clear the {} profile gates (min |z| {:.1}, min confirmations {})",
                    profile,
                    profile.params().min_z,
                    profile.params().min_confirmations
                );
            }
        }
        None => println!("\nSignal is NEUTRAL - no position to size."),
    }
    Ok(())
}

async fn progress_command(cmd: ProgressCmd, verbose: bool, debug: bool) -> Result<()> {
    let config = load_config(&cmd.config).context("Failed to load configuration")?;
    init_logging(verbose, debug, &config.logging.level);
    let capital = cmd.capital.unwrap_or(config.portfolio.capital);
    if capital <= 0.0 {
        bail!("Capital must be positive, got {}", capital);
    }

    let progress = GoalProgress::calculate(
        capital,
        config.portfolio.start_capital,
        config.portfolio.goal_capital,
    );

    println!(
        "Capital {:.2} (start {:.2}, goal {:.2})",
        progress.current, progress.start, progress.goal
    );
    println!("  linear progress {:>6.2}%", progress.linear_progress * 100.0);
    println!(
        "  doublings       {:.2} of {:.2}",
        progress.completed_doublings, progress.total_doublings
    );
    println!("  log progress    {:>6.2}%", progress.log_progress * 100.0);
    Ok(())
}

fn print_reports_table(reports: &[SymbolReport], actionable_only: bool) {
    println!(
        "{:<12} {:>12} {:>9} {:>8} {:>6} {:<13} {:>4} {:>6} {:>5}",
        "SYMBOL", "PRICE", "RATE%", "ANN%", "Z", "SIGNAL", "CONF", "EDGE", "WIN%"
    );

    for report in reports {
        match &report.outcome {
            SymbolOutcome::Analyzed { result, actionable } => {
                if actionable_only && !actionable {
                    continue;
                }
                let marker = if *actionable { "*" } else { "" };
                println!(
                    "{:<12} {:>12.4} {:>9.4} {:>8.2} {:>6.2} {:<13} {:>4} {:>6.1} {:>5.1}{}",
                    result.symbol,
                    result.price,
                    result.current_rate * 100.0,
                    annualized_pct(result.current_rate),
                    result.z_score,
                    result.signal.to_string(),
                    result.confirmations,
                    result.edge_score,
                    result.win_probability * 100.0,
                    marker,
                );
            }
            SymbolOutcome::Skipped(reason) => {
                if !actionable_only {
                    println!("{:<12} no data ({})", report.symbol, reason);
                }
            }
            SymbolOutcome::Failed(error) => {
                if !actionable_only {
                    println!("{:<12} failed ({})", report.symbol, error);
                }
            }
        }
    }
}

fn print_reports_json(reports: &[SymbolReport]) -> Result<()> {
    let entries: Vec<serde_json::Value> = reports
        .iter()
        .map(|report| match &report.outcome {
            SymbolOutcome::Analyzed { result, actionable } => json!({
                "symbol": report.symbol,
                "status": "analyzed",
                "actionable": actionable,
                "analysis": result,
            }),
            SymbolOutcome::Skipped(reason) => json!({
                "symbol": report.symbol,
                "status": "no_data",
                "reason": reason,
            }),
            SymbolOutcome::Failed(error) => json!({
                "symbol": report.symbol,
                "status": "failed",
                "error": error,
            }),
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&entries)?);
    Ok(())
}

fn print_analysis_detail(result: &AnalysisResult, actionable: bool) {
    println!("{} @ {:.4} ({})", result.symbol, result.price, result.timestamp);
    println!(
        "  funding rate  {:.4}% per interval ({:+.2}% annualized)",
        result.current_rate * 100.0,
        annualized_pct(result.current_rate)
    );
    println!(
        "  window        mean {:.4}%  std {:.4}%",
        result.mean * 100.0,
        result.std * 100.0
    );
    println!("  z-score       {:+.2}", result.z_score);
    println!(
        "  signal        {} ({})",
        result.signal,
        if actionable { "actionable" } else { "not actionable" }
    );
    println!(
        "  edge          {:.1}/100, win probability {:.0}%",
        result.edge_score,
        result.win_probability * 100.0
    );
    println!(
        "  trend         {}",
        if result.is_funding_reversing {
            "reversing against the extreme"
        } else {
            "not reversing"
        }
    );
    println!("  confirmations {}", result.confirmations);
    for detail in &result.confirmation_details {
        println!("    - {}", detail);
    }
}
