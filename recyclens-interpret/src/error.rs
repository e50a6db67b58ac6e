use thiserror::Error;

#[derive(Error, Debug)]
pub enum InterpretError {
    #[error("API key not set for interpreter: {0}")]
    MissingApiKey(String),

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("interpreter HTTP error: {0}")]
    Http(String),

    #[error("failed to parse interpreter response: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, InterpretError>;
