//! Binance USD-M Futures Adapter
//!
//! Implements `FundingDataPort` against the public futures REST API.

mod client;

pub use client::{default_api_url, BinanceClient, BinanceConfig};
