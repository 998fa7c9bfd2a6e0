//! # Quote Engine
//!
//! Deterministic, stateless swap simulation. No network access, no
//! randomness; callers supply the two USD prices and the input amount.

use shared::SwapQuote;

/// Flat fee on the raw output, per constant-product AMM convention.
pub const SWAP_FEE_RATE: f64 = 0.003;

/// Assumed pool depth in USD. Impact grows linearly with the notional
/// size of the trade until it saturates at [`IMPACT_CAP`]. A tunable
/// parameter, not a measured quantity.
pub const IMPACT_DEPTH_USD: f64 = 500_000.0;

/// Price impact ceiling as a fraction (0.1 == 10%).
pub const IMPACT_CAP: f64 = 0.1;

/// Simulate a swap of `amount` units priced at `from_price` into a token
/// priced at `to_price` (both USD).
///
/// Missing or non-positive prices, and a non-positive or non-finite
/// amount, are a defined degenerate case and return the zero quote, not
/// an error. All arithmetic is plain f64; presentation rounds for display.
pub fn simulate_swap(from_price: f64, to_price: f64, amount: f64) -> SwapQuote {
    if !from_price.is_finite()
        || !to_price.is_finite()
        || !amount.is_finite()
        || from_price <= 0.0
        || to_price <= 0.0
        || amount <= 0.0
    {
        return SwapQuote::zero(amount);
    }

    let rate = from_price / to_price;
    let raw_output = amount * rate;
    let fee = raw_output * SWAP_FEE_RATE;
    let price_impact = ((amount * from_price) / IMPACT_DEPTH_USD).min(IMPACT_CAP);
    let output = (raw_output - fee) * (1.0 - price_impact);

    SwapQuote {
        input: amount,
        output,
        fee,
        rate,
        price_impact: price_impact * 100.0,
    }
}
