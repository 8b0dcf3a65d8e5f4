//! Ports Layer - Trait definitions for external dependencies
//!
//! Following hexagonal architecture, these traits abstract the market-data
//! feed so the engine and application layers never touch a wire format.

pub mod market_data;
pub mod mocks;

pub use market_data::{FundingDataPort, MarketDataError, MarketSnapshot};
pub use mocks::MockFundingData;
