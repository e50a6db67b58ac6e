use thiserror::Error;

#[derive(Error, Debug)]
pub enum VisionError {
    #[error("provider not configured: {0}")]
    Unconfigured(String),

    #[error("provider rejected credentials")]
    Unauthorized,

    #[error("provider quota exceeded")]
    QuotaExceeded,

    #[error("transient provider failure: {0}")]
    Transient(String),

    #[error("provider returned no labels: {0}")]
    EmptyResult(String),

    #[error("invalid image: {0}")]
    InvalidImage(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("all vision providers exhausted: {0}")]
    AllProvidersExhausted(String),
}

impl VisionError {
    /// Failures worth retrying against the same provider before moving on.
    pub fn is_retryable(&self) -> bool {
        match self {
            VisionError::Transient(_) | VisionError::QuotaExceeded => true,
            VisionError::Http(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, VisionError>;
