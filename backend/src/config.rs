use std::env;
use std::net::SocketAddr;

/// Public CoinGecko API. Pro deployments override this with
/// `https://pro-api.coingecko.com/api/v3` via `COINGECKO_BASE_URL`.
pub const DEFAULT_COINGECKO_BASE_URL: &str = "https://api.coingecko.com/api/v3";

#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: String,
    pub coingecko_base_url: String,
    /// Optional demo API key. Absence is not an error; the client degrades
    /// to unauthenticated, rate-limited access.
    pub coingecko_api_key: Option<String>,
    pub allowed_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let bind_address = env::var("BIND_ADDRESS")
            .unwrap_or_else(|_| "127.0.0.1:5000".to_string());

        let coingecko_base_url = env::var("COINGECKO_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_COINGECKO_BASE_URL.to_string());

        let coingecko_api_key = env::var("COINGECKO_API_KEY")
            .ok()
            .filter(|k| !k.is_empty());

        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .map(|s| s.split(',').map(|o| o.trim().to_string()).collect())
            .unwrap_or_else(|_| {
                vec![
                    "http://localhost:3000".to_string(),
                    "http://127.0.0.1:3000".to_string(),
                    "http://localhost:5173".to_string(),
                    "http://127.0.0.1:5173".to_string(),
                ]
            });

        Ok(Self {
            bind_address,
            coingecko_base_url,
            coingecko_api_key,
            allowed_origins,
        })
    }

    pub fn validate(&self) -> Result<(), String> {
        self.bind_address
            .parse::<SocketAddr>()
            .map_err(|_| format!("BIND_ADDRESS is not a valid socket address: {}", self.bind_address))?;

        if !self.coingecko_base_url.starts_with("http://")
            && !self.coingecko_base_url.starts_with("https://")
        {
            return Err("COINGECKO_BASE_URL must be an http(s) URL".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config {
            bind_address: "127.0.0.1:5000".to_string(),
            coingecko_base_url: DEFAULT_COINGECKO_BASE_URL.to_string(),
            coingecko_api_key: None,
            allowed_origins: vec!["http://localhost:3000".to_string()],
        }
    }

    #[test]
    fn validate_accepts_defaults() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_bind_address() {
        let mut config = base_config();
        config.bind_address = "not-an-address".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_non_http_base_url() {
        let mut config = base_config();
        config.coingecko_base_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());
    }
}
