//! # Chart Data Service
//!
//! Produces a bounded-size, time-ordered price series for charting.
//! Fetches the raw series straight from the upstream client (bypassing
//! the token cache), downsamples it to at most [`MAX_CHART_POINTS`]
//! points, and formats timestamps into display labels.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use shared::ChartPoint;
use tracing::{debug, warn};

use crate::cache::TokenCache;
use crate::coingecko::MarketDataSource;

/// Upper bound on points returned to the frontend, independent of the
/// requested range.
pub const MAX_CHART_POINTS: usize = 50;

/// Requested chart lookback. Anything unrecognized parses as one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartRange {
    #[default]
    Day,
    Week,
    Month,
    Year,
}

impl ChartRange {
    pub fn parse(s: &str) -> Self {
        match s {
            "1W" => ChartRange::Week,
            "1M" => ChartRange::Month,
            "1Y" => ChartRange::Year,
            _ => ChartRange::Day,
        }
    }

    pub fn days(self) -> u32 {
        match self {
            ChartRange::Day => 1,
            ChartRange::Week => 7,
            ChartRange::Month => 30,
            ChartRange::Year => 365,
        }
    }
}

/// Static symbol-to-coin-id map consulted when the cache has no entry.
fn static_coin_id(symbol: &str) -> Option<&'static str> {
    match symbol {
        "ETH" => Some("ethereum"),
        "BTC" => Some("bitcoin"),
        "SOL" => Some("solana"),
        _ => None,
    }
}

pub struct ChartService {
    source: Arc<dyn MarketDataSource>,
    cache: Arc<TokenCache>,
}

impl ChartService {
    pub fn new(source: Arc<dyn MarketDataSource>, cache: Arc<TokenCache>) -> Self {
        Self { source, cache }
    }

    /// Resolve a symbol to an upstream coin id: cached token list first,
    /// then the static map, then "bitcoin". A chart is always attempted,
    /// even for unlisted symbols.
    pub async fn resolve_coin_id(&self, symbol: &str) -> String {
        let upper = symbol.to_uppercase();
        if let Some(id) = self.cache.resolve_coin_id(&upper).await {
            return id;
        }
        static_coin_id(&upper).unwrap_or("bitcoin").to_string()
    }

    /// Fetch, downsample, and label the price series for `symbol` over
    /// `range`. Upstream failures degrade to an empty series; callers
    /// must treat empty as "no data", not as an error.
    pub async fn get_chart(&self, symbol: &str, range: ChartRange) -> Vec<ChartPoint> {
        let coin_id = self.resolve_coin_id(symbol).await;
        debug!("[CHART] {} ({}) over {} day(s)", symbol, coin_id, range.days());

        let raw = match self.source.fetch_market_chart(&coin_id, range.days()).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!("[CHART] Upstream failure for {}: {}", symbol, e);
                return Vec::new();
            }
        };

        downsample(&raw, MAX_CHART_POINTS)
            .into_iter()
            .map(|(timestamp, price)| ChartPoint {
                label: format_label(timestamp, range),
                price,
            })
            .collect()
    }
}

/// Keep every `ceil(len / max_points)`-th point starting at index 0,
/// preserving order and always retaining the first point.
fn downsample(raw: &[(i64, f64)], max_points: usize) -> Vec<(i64, f64)> {
    if raw.is_empty() {
        return Vec::new();
    }
    let step = raw.len().div_ceil(max_points);
    raw.iter().step_by(step).copied().collect()
}

/// Short time label for intraday ranges, short date label otherwise.
/// Fixed-format UTC rather than locale-dependent, so output is stable.
fn format_label(timestamp_millis: i64, range: ChartRange) -> String {
    let datetime = Utc
        .timestamp_millis_opt(timestamp_millis)
        .single()
        .unwrap_or_default();
    match range {
        ChartRange::Day => datetime.format("%H:%M").to_string(),
        _ => datetime.format("%b %-d").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{token, MockSource};

    fn service(source: Arc<MockSource>) -> ChartService {
        let cache = Arc::new(TokenCache::new(source.clone()));
        ChartService::new(source, cache)
    }

    #[test]
    fn range_parsing_maps_to_days() {
        assert_eq!(ChartRange::parse("1D").days(), 1);
        assert_eq!(ChartRange::parse("1W").days(), 7);
        assert_eq!(ChartRange::parse("1M").days(), 30);
        assert_eq!(ChartRange::parse("1Y").days(), 365);
        assert_eq!(ChartRange::parse("6H").days(), 1);
        assert_eq!(ChartRange::parse("").days(), 1);
    }

    #[test]
    fn downsample_bounds_series_and_keeps_order() {
        let raw: Vec<(i64, f64)> = (0..500).map(|i| (i as i64 * 60_000, i as f64)).collect();

        let sampled = downsample(&raw, MAX_CHART_POINTS);

        assert!(sampled.len() <= MAX_CHART_POINTS);
        assert_eq!(sampled[0], raw[0]);
        assert!(sampled.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn downsample_keeps_short_series_intact() {
        let raw: Vec<(i64, f64)> = (0..10).map(|i| (i as i64, 1.0)).collect();
        assert_eq!(downsample(&raw, MAX_CHART_POINTS).len(), 10);
        assert!(downsample(&[], MAX_CHART_POINTS).is_empty());
    }

    #[test]
    fn labels_follow_range_granularity() {
        // 2024-01-15T12:30:00Z
        let ts = 1_705_321_800_000;
        assert_eq!(format_label(ts, ChartRange::Day), "12:30");
        assert_eq!(format_label(ts, ChartRange::Month), "Jan 15");
    }

    #[tokio::test]
    async fn resolves_symbol_from_cached_listing_first() {
        // Arrange: prime the cache with a token whose id differs from the
        // static map.
        let source = Arc::new(MockSource::with_tokens(vec![token("FOO", "foocoin", 3.0)]));
        let service = service(source);
        service.cache.get_tokens().await;

        // Act / Assert
        assert_eq!(service.resolve_coin_id("FOO").await, "foocoin");
        assert_eq!(service.resolve_coin_id("foo").await, "foocoin");
    }

    #[tokio::test]
    async fn unlisted_symbols_fall_through_to_static_map_then_bitcoin() {
        let source = Arc::new(MockSource::with_tokens(Vec::new()));
        let service = service(source);

        assert_eq!(service.resolve_coin_id("SOL").await, "solana");
        assert_eq!(service.resolve_coin_id("ZZZ").await, "bitcoin");
    }

    #[tokio::test]
    async fn chart_is_downsampled_and_labeled() {
        // Arrange
        let raw: Vec<(i64, f64)> = (0..500)
            .map(|i| (1_705_276_800_000 + i as i64 * 60_000, 2000.0 + i as f64))
            .collect();
        let source = Arc::new(MockSource::with_chart(raw));
        let service = service(source);

        // Act
        let points = service.get_chart("ETH", ChartRange::Day).await;

        // Assert
        assert!(points.len() <= MAX_CHART_POINTS);
        assert_eq!(points[0].price, 2000.0);
        assert!(points[0].label.contains(':'), "intraday label is hour:minute");
    }

    #[tokio::test]
    async fn chart_degrades_to_empty_on_upstream_failure() {
        let source = Arc::new(MockSource::failing());
        let service = service(source);

        let points = service.get_chart("ETH", ChartRange::Week).await;

        assert!(points.is_empty());
    }
}
