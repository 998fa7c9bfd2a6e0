use serde::{Deserialize, Serialize};

/// A listed token with its latest market data.
///
/// Replaced wholesale on every successful market refresh; never partially
/// mutated. `symbol` is the uppercased ticker and acts as the unique key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TokenInfo {
    pub symbol: String,
    pub name: String,
    /// Upstream (CoinGecko) coin identifier, e.g. "ethereum"
    pub id: String,
    /// Logo image URL
    pub logo: String,
    /// Current price in USD
    pub price: f64,
    /// 24h price change, signed percent
    #[serde(rename = "changeVal")]
    pub change_24h: f64,
    /// Market capitalization in USD
    #[serde(rename = "marketCap")]
    pub market_cap: f64,
}

/// A single point of a downsampled chart series.
///
/// `label` is a short pre-formatted timestamp (hour:minute for intraday
/// ranges, month day otherwise); the frontend renders it verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartPoint {
    #[serde(rename = "name")]
    pub label: String,
    pub price: f64,
}
