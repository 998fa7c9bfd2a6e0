//! # Backend Service
//!
//! Thin entry point that delegates to the server module for setup.

use backend::server::start_server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    start_server().await
}
