// Error types for porto-sync.
// Covers GitHub API failures, store IO, and malformed repository identifiers.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PortoError {
    #[error("GitHub API error: {0}")]
    Api(#[from] reqwest::Error),

    #[error("Authentication failed: invalid or expired token")]
    Unauthorized,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Rate limit exceeded, resets at {reset_at}")]
    RateLimited { reset_at: String },

    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Malformed repository identifier: {0:?}")]
    InvalidIdentifier(String),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PortoError>;
