//! Adapters Layer - Concrete implementations of the ports
//!
//! - `binance`: public USD-M futures REST API
//! - `cli`: command-line surface

pub mod binance;
pub mod cli;
