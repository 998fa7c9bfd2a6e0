//! # Data Transfer Objects (DTOs)
//!
//! Data structures used for communication between the frontend and backend
//! via the REST API.
//!
//! ## Module Organization
//!
//! - [`market`] - Token listings, price maps, and chart data
//! - [`swap`] - Swap simulation request and quote

use serde::{Deserialize, Serialize};

pub mod market;
pub mod swap;

pub use market::*;
pub use swap::*;

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}
