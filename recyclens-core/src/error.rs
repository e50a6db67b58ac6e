use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid image: {0}")]
    InvalidImage(String),

    #[error("rate limit exceeded, resets at {reset_at}")]
    RateLimitExceeded { remaining: u32, reset_at: DateTime<Utc> },

    #[error("daily quota exceeded ({used}/{limit}), resets at {reset_at}")]
    DailyQuotaExceeded {
        used: u32,
        limit: u32,
        reset_at: DateTime<Utc>,
    },

    #[error("catalog error: {0}")]
    Catalog(String),

    #[error("configuration error: {0}")]
    Configuration(String),
}

pub type Result<T> = std::result::Result<T, Error>;
