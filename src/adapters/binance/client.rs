//! Binance USD-M Futures Client
//!
//! HTTP client for the public Binance futures REST API. Only the two
//! read-only endpoints the scanner needs: funding-rate history and the
//! premium index (mark price + live funding rate). No authentication.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::domain::FundingSample;
use crate::ports::market_data::{FundingDataPort, MarketDataError, MarketSnapshot};

/// Binance futures client configuration
#[derive(Debug, Clone)]
pub struct BinanceConfig {
    /// Base URL for the USD-M futures API
    pub api_base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// Number of retry attempts
    pub max_retries: u32,
}

impl Default for BinanceConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_url(),
            timeout: Duration::from_secs(15),
            max_retries: 3,
        }
    }
}

/// Base URL with environment variable override, for testnets and mirrors.
pub fn default_api_url() -> String {
    std::env::var("FUNDREV_API_URL").unwrap_or_else(|_| "https://fapi.binance.com".to_string())
}

/// Wire shape of one `/fapi/v1/fundingRate` entry. Binance encodes decimals
/// as strings.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FundingRateEntry {
    #[allow(dead_code)]
    symbol: String,
    funding_time: i64,
    funding_rate: String,
}

/// Wire shape of `/fapi/v1/premiumIndex`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PremiumIndex {
    symbol: String,
    mark_price: String,
    last_funding_rate: String,
    next_funding_time: i64,
}

/// Public Binance USD-M futures market data client
#[derive(Debug, Clone)]
pub struct BinanceClient {
    config: BinanceConfig,
    http: Client,
}

impl BinanceClient {
    /// Create a new client with default configuration
    pub fn new() -> Result<Self, MarketDataError> {
        Self::with_config(BinanceConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: BinanceConfig) -> Result<Self, MarketDataError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| MarketDataError::Http(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, http })
    }

    pub fn api_base_url(&self) -> &str {
        &self.config.api_base_url
    }

    /// Execute a GET with retry on rate limits and server errors
    async fn get_with_retry(&self, url: &str, query: &[(&str, String)]) -> Result<reqwest::Response, MarketDataError> {
        let mut last_error = None;

        for attempt in 0..self.config.max_retries {
            let result = self
                .http
                .get(url)
                .query(query)
                .send()
                .await
                .map_err(|e| MarketDataError::Http(e.to_string()));

            match result {
                Ok(response) => {
                    if response.status().is_success() {
                        return Ok(response);
                    }

                    if response.status() == StatusCode::TOO_MANY_REQUESTS {
                        let backoff = Duration::from_secs(2u64.pow(attempt + 1)); // 2s, 4s, 8s
                        tracing::warn!(
                            "Rate limited (429), backing off for {:?} (attempt {}/{})",
                            backoff,
                            attempt + 1,
                            self.config.max_retries
                        );
                        last_error = Some(MarketDataError::Api("Rate limit exceeded".into()));
                        tokio::time::sleep(backoff).await;
                        continue;
                    }

                    if response.status().is_server_error() {
                        last_error =
                            Some(MarketDataError::Api(format!("Server error: {}", response.status())));
                        tokio::time::sleep(Duration::from_millis(500 * (attempt as u64 + 1))).await;
                        continue;
                    }

                    let status = response.status();
                    let body = response.text().await.unwrap_or_default();
                    return Err(MarketDataError::Api(format!("API error {}: {}", status, body)));
                }
                Err(e) => {
                    last_error = Some(e);
                    tokio::time::sleep(Duration::from_millis(500 * (attempt as u64 + 1))).await;
                }
            }
        }

        Err(last_error.unwrap_or_else(|| MarketDataError::Api("Max retries exceeded".into())))
    }
}

fn parse_rate(raw: &str, field: &str) -> Result<f64, MarketDataError> {
    raw.parse::<f64>()
        .map_err(|e| MarketDataError::Parse(format!("bad {} '{}': {}", field, raw, e)))
}

fn parse_millis(ms: i64) -> Result<DateTime<Utc>, MarketDataError> {
    DateTime::from_timestamp_millis(ms)
        .ok_or_else(|| MarketDataError::Parse(format!("bad timestamp {}", ms)))
}

#[async_trait]
impl FundingDataPort for BinanceClient {
    async fn funding_history(
        &self,
        symbol: &str,
        limit: usize,
    ) -> Result<Vec<FundingSample>, MarketDataError> {
        let url = format!("{}/fapi/v1/fundingRate", self.config.api_base_url);
        let query = [
            ("symbol", symbol.to_string()),
            ("limit", limit.to_string()),
        ];

        let response = self.get_with_retry(&url, &query).await?;
        let entries: Vec<FundingRateEntry> = response
            .json()
            .await
            .map_err(|e| MarketDataError::Parse(format!("funding history: {}", e)))?;

        let mut samples = Vec::with_capacity(entries.len());
        for entry in entries {
            let timestamp = parse_millis(entry.funding_time)?;
            let rate = parse_rate(&entry.funding_rate, "fundingRate")?;
            // Binance USD-M pays every 8 hours, the reference interval
            samples.push(FundingSample::standard(timestamp, rate));
        }

        // The API returns ascending fundingTime; enforce it anyway since the
        // engine requires ordered windows
        samples.sort_by_key(|s| s.timestamp);
        Ok(samples)
    }

    async fn market_snapshot(&self, symbol: &str) -> Result<MarketSnapshot, MarketDataError> {
        let url = format!("{}/fapi/v1/premiumIndex", self.config.api_base_url);
        let query = [("symbol", symbol.to_string())];

        let response = self.get_with_retry(&url, &query).await?;
        let index: PremiumIndex = response
            .json()
            .await
            .map_err(|e| MarketDataError::Parse(format!("premium index: {}", e)))?;

        Ok(MarketSnapshot {
            symbol: index.symbol,
            price: parse_rate(&index.mark_price, "markPrice")?,
            funding_rate: parse_rate(&index.last_funding_rate, "lastFundingRate")?,
            next_funding_time: parse_millis(index.next_funding_time).ok(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_wire_entries() {
        let raw = r#"[
            {"symbol":"BTCUSDT","fundingTime":1700000000000,"fundingRate":"0.00010000","markPrice":"50000.00"},
            {"symbol":"BTCUSDT","fundingTime":1700028800000,"fundingRate":"-0.00005000","markPrice":"50100.00"}
        ]"#;
        let entries: Vec<FundingRateEntry> = serde_json::from_str(raw).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].funding_rate, "0.00010000");
        assert_eq!(parse_rate(&entries[1].funding_rate, "fundingRate").unwrap(), -0.00005);
    }

    #[test]
    fn test_parse_premium_index() {
        let raw = r#"{
            "symbol":"ETHUSDT",
            "markPrice":"3000.50000000",
            "indexPrice":"3000.10000000",
            "lastFundingRate":"0.00012000",
            "nextFundingTime":1700028800000,
            "interestRate":"0.00010000",
            "time":1700010000000
        }"#;
        let index: PremiumIndex = serde_json::from_str(raw).unwrap();
        assert_eq!(parse_rate(&index.mark_price, "markPrice").unwrap(), 3000.5);
        assert_eq!(parse_rate(&index.last_funding_rate, "lastFundingRate").unwrap(), 0.00012);
        assert!(parse_millis(index.next_funding_time).is_ok());
    }

    #[test]
    fn test_bad_decimal_is_parse_error() {
        assert!(matches!(
            parse_rate("not-a-number", "fundingRate"),
            Err(MarketDataError::Parse(_))
        ));
    }
}
