//! # CoinGecko Market Data Client
//!
//! Encapsulates the upstream CoinGecko REST calls used by the service:
//! the top-100 markets listing and the per-coin market chart series.
//!
//! All requests share a single `reqwest::Client` with a 10-second timeout.
//! Errors (network, timeout, non-2xx, undecodable payload) are propagated
//! to the caller as [`AppError::Upstream`]; the cache and chart layers
//! decide how to degrade.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use shared::TokenInfo;
use std::time::Duration;
use tracing::{debug, error};

use crate::config::Config;
use crate::error::{AppError, Result};

/// Bound on every upstream call; requests that exceed it take the
/// fallback path.
pub const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(10);

/// Header CoinGecko expects for demo API keys.
const DEMO_KEY_HEADER: &str = "x-cg-demo-api-key";

/// Seam between the service layer and the upstream provider, so the cache
/// and chart service can be exercised against a mock in tests.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Fetch up to `limit` tokens ordered by descending market cap.
    async fn fetch_top_tokens(&self, limit: u32) -> Result<Vec<TokenInfo>>;

    /// Fetch a (timestamp-millis, price) series for `coin_id` over the
    /// trailing `days` days.
    async fn fetch_market_chart(&self, coin_id: &str, days: u32) -> Result<Vec<(i64, f64)>>;
}

pub struct CoinGeckoClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl CoinGeckoClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(UPSTREAM_TIMEOUT)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.coingecko_base_url.clone(),
            api_key: config.coingecko_api_key.clone(),
        })
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        let mut request = self.client.get(url);
        if let Some(key) = &self.api_key {
            request = request.header(DEMO_KEY_HEADER, key);
        }
        request
    }
}

/// One record of the `/coins/markets` response. CoinGecko reports nulls
/// for freshly listed coins, so the numeric fields are optional.
#[derive(Debug, Deserialize)]
struct CoinMarket {
    id: String,
    symbol: String,
    name: String,
    image: Option<String>,
    current_price: Option<f64>,
    price_change_percentage_24h: Option<f64>,
    market_cap: Option<f64>,
}

impl From<CoinMarket> for TokenInfo {
    fn from(coin: CoinMarket) -> Self {
        TokenInfo {
            symbol: coin.symbol.to_uppercase(),
            name: coin.name,
            id: coin.id,
            logo: coin.image.unwrap_or_default(),
            price: coin.current_price.unwrap_or(0.0),
            change_24h: coin.price_change_percentage_24h.unwrap_or(0.0),
            market_cap: coin.market_cap.unwrap_or(0.0),
        }
    }
}

#[derive(Debug, Deserialize)]
struct MarketChartResponse {
    prices: Vec<(i64, f64)>,
}

#[async_trait]
impl MarketDataSource for CoinGeckoClient {
    async fn fetch_top_tokens(&self, limit: u32) -> Result<Vec<TokenInfo>> {
        let url = format!(
            "{}/coins/markets?vs_currency=usd&order=market_cap_desc&per_page={}&page=1&sparkline=false",
            self.base_url, limit
        );

        debug!("Fetching token markets from: {}", url);

        let response = self.get(&url).send().await?;

        if !response.status().is_success() {
            error!("CoinGecko API error: {}", response.status());
            return Err(AppError::Upstream(format!("API error: {}", response.status())));
        }

        let records: Vec<CoinMarket> = response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("Failed to parse markets response: {}", e)))?;

        Ok(records.into_iter().map(TokenInfo::from).collect())
    }

    async fn fetch_market_chart(&self, coin_id: &str, days: u32) -> Result<Vec<(i64, f64)>> {
        let url = format!(
            "{}/coins/{}/market_chart?vs_currency=usd&days={}",
            self.base_url, coin_id, days
        );

        debug!("Fetching market chart from: {}", url);

        let response = self.get(&url).send().await?;

        if !response.status().is_success() {
            error!("CoinGecko API error: {}", response.status());
            return Err(AppError::Upstream(format!("API error: {}", response.status())));
        }

        let chart: MarketChartResponse = response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("Failed to parse chart response: {}", e)))?;

        Ok(chart.prices)
    }
}
