//! Application Layer - Use cases built on the engine and ports

pub mod scanner;

pub use scanner::{MarketScanner, ScanError, SymbolOutcome, SymbolReport};
