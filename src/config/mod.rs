//! Configuration loading and validation

mod loader;

pub use loader::{
    load_config, AnalyzerSection, Config, ConfigError, ExchangeSection, LoggingSection,
    PortfolioSection, SymbolsSection,
};
