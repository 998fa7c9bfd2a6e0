//! # Shared Data Transfer Objects Library
//!
//! This library defines the contract between the swap frontend and the backend API.
//! All DTOs use JSON serialization via `serde` for API communication.
//!
//! ## Structure
//!
//! - **[`dto`]**: Data Transfer Objects for API communication
//!   - **[`dto::market`]**: Token listings, price maps, and chart series
//!   - **[`dto::swap`]**: Swap simulation request/response types
//!
//! ## Wire Format
//!
//! Field names on the wire follow the names the frontend already consumes
//! (`changeVal`, `marketCap`, `priceImpact`, ...), mapped to snake_case Rust
//! fields via `#[serde(rename)]`. All structs implement both `Serialize` and
//! `Deserialize` for bidirectional communication.
//!
//! ## Example
//!
//! ```rust
//! use shared::dto::swap::SimulateSwapRequest;
//!
//! let request = SimulateSwapRequest {
//!     from_token: "ETH".to_string(),
//!     to_token: "USDC".to_string(),
//!     amount: 1.0,
//! };
//!
//! let body = serde_json::to_string(&request).unwrap();
//! assert!(body.contains("\"fromToken\":\"ETH\""));
//! ```

pub mod dto;

// Re-export commonly used types for convenience
pub use dto::*;
