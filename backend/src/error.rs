use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    /// Upstream market data failure: network error, timeout, rate limit,
    /// 5xx, or a payload that does not deserialize. All of these are
    /// recovered at the cache/chart layer by substituting fallback data.
    #[error("Upstream market data error: {0}")]
    Upstream(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        AppError::Upstream(e.to_string())
    }
}
