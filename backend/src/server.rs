//! # Server Setup
//!
//! Server initialization, route registration, and HTTP server startup.
//!
//! Builds the axum router, wires the shared application state (token
//! cache, chart service, configuration), applies middleware, and serves.

// region:    --- Imports
use axum::{
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use shared::ErrorResponse;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::cache::TokenCache;
use crate::chart::ChartService;
use crate::coingecko::{CoinGeckoClient, MarketDataSource};
use crate::config::Config;
use crate::handlers;
use crate::middleware::stamp_req;
// endregion: --- Imports

// region:    --- AppState
/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub cache: Arc<TokenCache>,
    pub chart: Arc<ChartService>,
}

impl axum::extract::FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl axum::extract::FromRef<AppState> for Arc<TokenCache> {
    fn from_ref(state: &AppState) -> Self {
        state.cache.clone()
    }
}

impl axum::extract::FromRef<AppState> for Arc<ChartService> {
    fn from_ref(state: &AppState) -> Self {
        state.chart.clone()
    }
}
// endregion: --- AppState

// region:    --- Server Setup
/// Initialize and start the HTTP server.
///
/// # Errors
///
/// Returns an error if configuration loading or validation fails, the
/// HTTP client cannot be built, or the bind address is unavailable.
/// Upstream market-data failures are NOT startup errors; they degrade to
/// fallback data at request time.
pub async fn start_server() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    init_tracing();

    info!("DEX DEMO BACKEND STARTING");

    info!("Loading configuration...");
    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    info!("Upstream base URL: {}", config.coingecko_base_url);
    if config.coingecko_api_key.is_none() {
        info!("No COINGECKO_API_KEY set - using unauthenticated access");
    }

    let client: Arc<dyn MarketDataSource> = Arc::new(CoinGeckoClient::new(&config)?);
    let cache = Arc::new(TokenCache::new(Arc::clone(&client)));
    let chart = Arc::new(ChartService::new(client, Arc::clone(&cache)));

    let state = AppState {
        config: config.clone(),
        cache,
        chart,
    };

    let app = create_router(state, config.allowed_origins.clone());

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;

    info!("SERVER READY: http://{}", config.bind_address);
    log_server_info();

    axum::serve(listener, app).await?;
    Ok(())
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
    );

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

/// Create the main application router with all routes
fn create_router(state: AppState, allowed_origins: Vec<String>) -> Router {
    use axum::http::{HeaderValue, Method};

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    Router::new()
        .route("/api/tokens", get(handlers::market::get_tokens))
        .route("/api/price", get(handlers::market::get_prices))
        .route("/api/chart", get(handlers::market::get_chart))
        .route("/api/swap/simulate", post(handlers::swap::simulate_swap))
        .route("/health", get(|| async { "OK" }))
        .fallback(|| async {
            (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: "Route not found".to_string(),
                }),
            )
        })
        .with_state(state)
        .layer(axum::middleware::from_fn(stamp_req))
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .layer(cors)
}

/// Log server information
fn log_server_info() {
    info!("MARKET DATA:");
    info!("   • GET  /api/tokens");
    info!("   • GET  /api/price");
    info!("   • GET  /api/chart?symbol={{symbol}}&range={{1D|1W|1M|1Y}}");
    info!("SWAP:");
    info!("   • POST /api/swap/simulate");
    info!("HEALTH:");
    info!("   • GET  /health");
}
// endregion: --- Server Setup
