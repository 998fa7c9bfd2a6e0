//! # Market Handlers
//!
//! HTTP endpoints for the token listing, price map, and chart series.
//!
//! ## Endpoints
//!
//! - `GET /api/tokens` - Current top-100 token list
//! - `GET /api/price` - Symbol-to-USD-price map
//! - `GET /api/chart` - Downsampled price series for one symbol
//!
//! ## Degradation
//!
//! All three endpoints return 200 even when CoinGecko is unavailable:
//! tokens degrade to the static fallback list, prices to the fallback
//! seed, and charts to an empty series. Degradation is visible in the
//! logs, not on the wire.
//!
//! ## Request Examples
//!
//! ```bash
//! curl http://localhost:5000/api/tokens
//! curl http://localhost:5000/api/price
//! curl "http://localhost:5000/api/chart?symbol=ETH&range=1W"
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use shared::{ChartPoint, TokenInfo};
use tracing::{info, instrument, warn};

use crate::cache::{TokenCache, TokenSource};
use crate::chart::{ChartRange, ChartService};

/// Get the current token list.
///
/// **Route**: `GET /api/tokens`
///
/// Returns 200 with an array of tokens: cached within the TTL, freshly
/// fetched when stale, or the static fallback list when upstream is down.
#[instrument(skip(cache))]
pub async fn get_tokens(
    State(cache): State<Arc<TokenCache>>,
) -> (StatusCode, Json<Vec<TokenInfo>>) {
    let (tokens, source) = cache.get_tokens().await;

    match source {
        TokenSource::Fallback => {
            warn!("[MARKET] Serving {} fallback tokens (upstream unavailable)", tokens.len())
        }
        _ => info!("[MARKET] Serving {} tokens ({:?})", tokens.len(), source),
    }

    (StatusCode::OK, Json(tokens))
}

/// Get the symbol-to-price map.
///
/// **Route**: `GET /api/price`
///
/// Prices are a side effect of token refresh; this never triggers an
/// upstream call. A cold cache is seeded from the fallback list.
#[instrument(skip(cache))]
pub async fn get_prices(
    State(cache): State<Arc<TokenCache>>,
) -> (StatusCode, Json<HashMap<String, f64>>) {
    let prices = cache.get_prices().await;
    info!("[MARKET] Serving {} prices", prices.len());
    (StatusCode::OK, Json(prices))
}

/// Query parameters for the chart endpoint
#[derive(Debug, Deserialize)]
pub struct ChartQuery {
    /// Token symbol (default "ETH")
    #[serde(default = "default_chart_symbol")]
    pub symbol: String,
    /// Lookback range: "1D", "1W", "1M", "1Y" (default "1D")
    #[serde(default = "default_chart_range")]
    pub range: String,
}

fn default_chart_symbol() -> String {
    "ETH".to_string()
}

fn default_chart_range() -> String {
    "1D".to_string()
}

/// Get a downsampled price series for charting.
///
/// **Route**: `GET /api/chart?symbol=ETH&range=1D`
///
/// Returns at most 50 chronological points. An empty array means "no
/// data" (unknown coin or upstream failure), never an error status.
#[instrument(skip(chart), fields(symbol = %params.symbol, range = %params.range))]
pub async fn get_chart(
    State(chart): State<Arc<ChartService>>,
    Query(params): Query<ChartQuery>,
) -> (StatusCode, Json<Vec<ChartPoint>>) {
    let range = ChartRange::parse(&params.range);
    let points = chart.get_chart(&params.symbol, range).await;
    info!("[CHART] Returning {} points for {}", points.len(), params.symbol);
    (StatusCode::OK, Json(points))
}
