//! # Swap Handlers
//!
//! HTTP endpoint for swap simulation. The quote is computed purely from
//! the cached price map; no network access, no on-chain state.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use shared::{SimulateSwapRequest, SwapQuote};
use tracing::{info, instrument};

use crate::cache::TokenCache;
use crate::quote::simulate_swap as compute_quote;

/// Simulate a swap between two listed tokens.
///
/// **Route**: `POST /api/swap/simulate`
///
/// Body: `{ "fromToken": "ETH", "toToken": "USDC", "amount": 1.0 }`
///
/// Symbols are looked up in the cached price map; an unknown symbol reads
/// as price zero, which short-circuits to the zero quote. Always 200.
#[instrument(skip(cache), fields(from = %request.from_token, to = %request.to_token, amount = request.amount))]
pub async fn simulate_swap(
    State(cache): State<Arc<TokenCache>>,
    Json(request): Json<SimulateSwapRequest>,
) -> (StatusCode, Json<SwapQuote>) {
    let prices = cache.get_prices().await;

    let from_price = prices
        .get(&request.from_token.to_uppercase())
        .copied()
        .unwrap_or(0.0);
    let to_price = prices
        .get(&request.to_token.to_uppercase())
        .copied()
        .unwrap_or(0.0);

    let quote = compute_quote(from_price, to_price, request.amount);

    info!(
        "[SWAP] {} {} -> {:.6} {} (impact {:.2}%)",
        request.amount, request.from_token, quote.output, request.to_token, quote.price_impact
    );

    (StatusCode::OK, Json(quote))
}
