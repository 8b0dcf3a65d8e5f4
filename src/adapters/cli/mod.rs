//! CLI Adapter
//!
//! Command-line interface for the fundrev signal engine.
//! Uses clap derive macros for argument parsing.

mod commands;

pub use commands::{AnalyzeCmd, CliApp, Command, ProgressCmd, ScanCmd, SizeCmd};
