use serde::{Deserialize, Serialize};

/// Swap simulation request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulateSwapRequest {
    pub from_token: String,
    pub to_token: String,
    /// Input amount in units of the `from` token. Missing or non-positive
    /// amounts yield the zero quote rather than an error.
    #[serde(default)]
    pub amount: f64,
}

/// Result of a simulated swap. Ephemeral, computed per request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SwapQuote {
    /// Echo of the requested input amount
    pub input: f64,
    /// Output amount after fee and price impact
    pub output: f64,
    /// Fee charged, in units of the `to` token
    pub fee: f64,
    /// Exchange rate (fromPrice / toPrice)
    pub rate: f64,
    /// Modeled slippage, expressed as a percentage (0.45 == 0.45%)
    #[serde(rename = "priceImpact")]
    pub price_impact: f64,
}

impl SwapQuote {
    /// Degenerate quote for missing prices or a non-positive amount.
    pub fn zero(input: f64) -> Self {
        Self {
            input,
            output: 0.0,
            fee: 0.0,
            rate: 0.0,
            price_impact: 0.0,
        }
    }
}
