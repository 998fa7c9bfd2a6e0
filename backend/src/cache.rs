//! # Token/Price Cache
//!
//! Single source of truth for the current token list and the
//! symbol-to-price map, shielding CoinGecko from per-request load.
//!
//! The cache is constructed once at startup, owned by the application
//! state, and shared across request handlers. Readers always see a
//! consistent snapshot: the token list and price map are replaced together
//! under one write lock. Upstream failures never escape this layer - the
//! caller observes either live data, a fresh-enough cached copy, or the
//! static fallback list.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use shared::TokenInfo;

use crate::coingecko::MarketDataSource;

/// Cached market data is served without an upstream call while younger
/// than this.
pub const CACHE_TTL: Duration = Duration::from_secs(300);

/// How many tokens one refresh requests, ordered by descending market cap.
pub const TOP_TOKEN_LIMIT: u32 = 100;

/// Where a served token list came from. Logged and asserted on in tests;
/// the HTTP layer collapses all three to a plain 200.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    /// Fresh data from a just-completed upstream fetch
    Live,
    /// Served from the in-memory cache within its TTL
    Cached,
    /// Static fallback list, upstream unavailable
    Fallback,
}

#[derive(Default)]
struct CacheState {
    tokens: Vec<TokenInfo>,
    prices: HashMap<String, f64>,
    last_fetch: Option<Instant>,
}

impl CacheState {
    fn is_fresh(&self, ttl: Duration) -> bool {
        !self.tokens.is_empty()
            && self.last_fetch.is_some_and(|at| at.elapsed() < ttl)
    }
}

pub struct TokenCache {
    source: Arc<dyn MarketDataSource>,
    state: RwLock<CacheState>,
    ttl: Duration,
}

impl TokenCache {
    pub fn new(source: Arc<dyn MarketDataSource>) -> Self {
        Self::with_ttl(source, CACHE_TTL)
    }

    /// Constructor with an explicit TTL, used by tests to force or
    /// suppress refreshes.
    pub fn with_ttl(source: Arc<dyn MarketDataSource>, ttl: Duration) -> Self {
        Self {
            source,
            state: RwLock::new(CacheState::default()),
            ttl,
        }
    }

    /// Get the current token list.
    ///
    /// Serves the cached list while fresh; otherwise refreshes from
    /// upstream, replacing the token list and rebuilding the price map
    /// together. On upstream failure the cache is left untouched and the
    /// static fallback list is returned - this method never errors.
    ///
    /// Concurrent stale readers collapse to a single upstream call: the
    /// refresh re-checks freshness after acquiring the write lock.
    pub async fn get_tokens(&self) -> (Vec<TokenInfo>, TokenSource) {
        {
            let state = self.state.read().await;
            if state.is_fresh(self.ttl) {
                debug!("[CACHE] Serving {} tokens from cache", state.tokens.len());
                return (state.tokens.clone(), TokenSource::Cached);
            }
        }

        let mut state = self.state.write().await;

        // Another request may have refreshed while we waited for the lock.
        if state.is_fresh(self.ttl) {
            debug!("[CACHE] Refreshed concurrently, serving {} tokens", state.tokens.len());
            return (state.tokens.clone(), TokenSource::Cached);
        }

        match self.source.fetch_top_tokens(TOP_TOKEN_LIMIT).await {
            Ok(tokens) => {
                // Upsert prices rather than replacing the map: entries for
                // delisted symbols persist, matching quote lookups that
                // tolerate stale symbols.
                for token in &tokens {
                    state.prices.insert(token.symbol.clone(), token.price);
                }
                state.tokens = tokens;
                state.last_fetch = Some(Instant::now());
                info!("[CACHE] Refreshed {} tokens from upstream", state.tokens.len());
                (state.tokens.clone(), TokenSource::Live)
            }
            Err(e) => {
                warn!("[CACHE] Upstream refresh failed, using fallback list: {}", e);
                (fallback_tokens(), TokenSource::Fallback)
            }
        }
    }

    /// Get the current symbol-to-price map.
    ///
    /// Prices are a side effect of token refresh; this never fetches. On a
    /// cold start with no populated map it is seeded from the fallback
    /// list first.
    pub async fn get_prices(&self) -> HashMap<String, f64> {
        {
            let state = self.state.read().await;
            if !state.prices.is_empty() {
                return state.prices.clone();
            }
        }

        let mut state = self.state.write().await;
        if state.prices.is_empty() {
            for token in fallback_tokens() {
                state.prices.insert(token.symbol, token.price);
            }
            debug!("[CACHE] Price map seeded from fallback list");
        }
        state.prices.clone()
    }

    /// Look up the upstream coin id for an uppercased symbol in the cached
    /// token list. Returns `None` when the symbol is not currently listed.
    pub async fn resolve_coin_id(&self, symbol: &str) -> Option<String> {
        let state = self.state.read().await;
        state
            .tokens
            .iter()
            .find(|t| t.symbol == symbol)
            .map(|t| t.id.clone())
    }
}

/// Static fallback served when CoinGecko is down or rate limited.
/// Prices are illustrative; the frontend treats them like any other data.
pub fn fallback_tokens() -> Vec<TokenInfo> {
    vec![
        TokenInfo {
            symbol: "ETH".to_string(),
            name: "Ethereum".to_string(),
            id: "ethereum".to_string(),
            logo: "https://cryptologos.cc/logos/ethereum-eth-logo.png".to_string(),
            price: 2250.0,
            change_24h: 1.2,
            market_cap: 250_000_000_000.0,
        },
        TokenInfo {
            symbol: "BTC".to_string(),
            name: "Bitcoin".to_string(),
            id: "bitcoin".to_string(),
            logo: "https://cryptologos.cc/logos/bitcoin-btc-logo.png".to_string(),
            price: 42000.0,
            change_24h: -0.5,
            market_cap: 800_000_000_000.0,
        },
        TokenInfo {
            symbol: "USDC".to_string(),
            name: "USD Coin".to_string(),
            id: "usd-coin".to_string(),
            logo: "https://cryptologos.cc/logos/usd-coin-usdc-logo.png".to_string(),
            price: 1.0,
            change_24h: 0.01,
            market_cap: 25_000_000_000.0,
        },
    ]
}
