//! Error types for listing and fetching test-case files

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Failed to fetch file listing from {url}: HTTP {status}")]
    ListingStatus {
        url: String,
        status: u16,
    },

    #[error("File listing from {url} is not a JSON object")]
    ListingFormat {
        url: String,
    },

    #[error("Failed to fetch '{name}': HTTP {status}")]
    FetchStatus {
        name: String,
        status: u16,
    },

    #[error("Refusing to write '{0}': not a plain file name")]
    InvalidName(String),

    #[error("Invalid URL '{url}': {message}")]
    InvalidUrl {
        url: String,
        message: String,
    },

    #[error("Fetch task for '{0}' panicked")]
    TaskPanicked(String),

    #[error("Fetch task for '{0}' was cancelled")]
    TaskCancelled(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = FetchError> = std::result::Result<T, E>;
