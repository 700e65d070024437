use thiserror::Error;
use tracing::{error, warn};

#[derive(Debug, Error)]
pub enum BlogError {
    #[error("Failed to parse URL: {0}")]
    UrlParseError(#[from] url::ParseError),

    #[error("Failed to fetch posts: {0}")]
    FetchError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Failed to decode response: {0}")]
    DecodeError(String),

    #[error("Request timeout: {0}")]
    TimeoutError(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl BlogError {
    pub fn log(&self) {
        match self {
            BlogError::UrlParseError(e) => {
                warn!(error = %e, "URL parsing failed");
            }
            BlogError::FetchError(e) => {
                error!(error = %e, "Post fetch failed");
            }
            BlogError::NotFound(e) => {
                warn!(error = %e, "Resource not found");
            }
            BlogError::DecodeError(e) => {
                error!(error = %e, "Response decoding failed");
            }
            BlogError::TimeoutError(e) => {
                warn!(error = %e, "Request timed out");
            }
            BlogError::InvalidConfiguration(e) => {
                error!(error = %e, "Invalid configuration");
            }
        }
    }
}

impl From<reqwest::Error> for BlogError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            BlogError::TimeoutError(e.to_string())
        } else if e.is_decode() {
            BlogError::DecodeError(e.to_string())
        } else {
            BlogError::FetchError(e.to_string())
        }
    }
}
