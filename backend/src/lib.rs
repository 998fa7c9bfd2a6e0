pub mod cache;
pub mod chart;
pub mod coingecko;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod quote;
pub mod server;

pub use config::Config;

#[cfg(test)]
pub(crate) mod testutil;
