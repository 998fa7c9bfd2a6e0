//! Test doubles shared by the unit and handler tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use shared::TokenInfo;

use crate::coingecko::MarketDataSource;
use crate::error::{AppError, Result};

/// In-memory [`MarketDataSource`] with call counters, standing in for
/// CoinGecko.
pub(crate) struct MockSource {
    tokens: Mutex<Vec<TokenInfo>>,
    chart: Vec<(i64, f64)>,
    fail: bool,
    pub token_calls: AtomicUsize,
    pub chart_calls: AtomicUsize,
}

impl MockSource {
    pub fn with_tokens(tokens: Vec<TokenInfo>) -> Self {
        Self {
            tokens: Mutex::new(tokens),
            chart: Vec::new(),
            fail: false,
            token_calls: AtomicUsize::new(0),
            chart_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_chart(chart: Vec<(i64, f64)>) -> Self {
        Self {
            tokens: Mutex::new(Vec::new()),
            chart,
            fail: false,
            token_calls: AtomicUsize::new(0),
            chart_calls: AtomicUsize::new(0),
        }
    }

    /// A source where every upstream call fails.
    pub fn failing() -> Self {
        Self {
            tokens: Mutex::new(Vec::new()),
            chart: Vec::new(),
            fail: true,
            token_calls: AtomicUsize::new(0),
            chart_calls: AtomicUsize::new(0),
        }
    }

    /// Replace the token listing served by subsequent fetches.
    pub fn set_tokens(&self, tokens: Vec<TokenInfo>) {
        *self.tokens.lock().unwrap() = tokens;
    }
}

#[async_trait]
impl MarketDataSource for MockSource {
    async fn fetch_top_tokens(&self, _limit: u32) -> Result<Vec<TokenInfo>> {
        self.token_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(AppError::Upstream("mock outage".to_string()));
        }
        Ok(self.tokens.lock().unwrap().clone())
    }

    async fn fetch_market_chart(&self, _coin_id: &str, _days: u32) -> Result<Vec<(i64, f64)>> {
        self.chart_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(AppError::Upstream("mock outage".to_string()));
        }
        Ok(self.chart.clone())
    }
}

/// Minimal token record for cache and resolution tests.
pub(crate) fn token(symbol: &str, id: &str, price: f64) -> TokenInfo {
    TokenInfo {
        symbol: symbol.to_string(),
        name: symbol.to_string(),
        id: id.to_string(),
        logo: String::new(),
        price,
        change_24h: 0.0,
        market_cap: 0.0,
    }
}
