use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::{ AppError, Result };

/// One entry of the global market-data response.
#[derive(Debug, Clone, Deserialize)]
pub struct MarketEntry {
    pub symbol: String,
    pub name: String,
    pub usd_price: f64,
}

/// Source of current market data for all listed assets.
#[async_trait]
pub trait MarketFeed: Send + Sync {
    async fn fetch_market_data(&self) -> Result<Vec<MarketEntry>>;
}

/// Feed client for an API-key-authenticated market-data endpoint.
pub struct HttpMarketFeed {
    client: reqwest::Client,
    url: String,
    api_key: String,
}

impl HttpMarketFeed {
    pub fn new(url: String, api_key: String) -> Result<Self> {
        let client = reqwest::Client
            ::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| AppError::Internal(e.to_string()))?;

        Ok(Self { client, url, api_key })
    }
}

#[async_trait]
impl MarketFeed for HttpMarketFeed {
    async fn fetch_market_data(&self) -> Result<Vec<MarketEntry>> {
        let response = self.client
            .get(&self.url)
            .header("X-API-Key", &self.api_key)
            .send().await
            .map_err(|e| AppError::Network(format!("market feed request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(
                AppError::Network(format!("market feed returned status: {}", response.status()))
            );
        }

        let entries: Vec<MarketEntry> = response
            .json().await
            .map_err(|e| AppError::Parse(format!("unexpected market feed shape: {}", e)))?;

        Ok(entries)
    }
}
