//! Centralized configuration management for rinha-fetch

use std::path::PathBuf;
use std::time::Duration;
use anyhow::{Result, Context};

pub const DEFAULT_LISTING_URL: &str =
    "https://github.com/aripiprazole/rinha-de-compiler/tree-commit-info/main/files";
pub const DEFAULT_RAW_BASE_URL: &str =
    "https://raw.githubusercontent.com/aripiprazole/rinha-de-compiler/main/files/";
pub const DEFAULT_OUTPUT_DIR: &str = "./files";
pub const DEFAULT_WORKERS: usize = 8;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Endpoint returning the JSON object whose keys are the file names
    pub listing_url: String,
    /// Base URL that raw file contents are fetched from
    pub raw_base_url: String,
    /// Directory the fetched files are written to
    pub output_dir: PathBuf,
    /// Fixed width of the fetch worker pool
    pub workers: usize,
    /// HTTP client configuration
    pub http: HttpConfig,
}

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Request timeout in seconds; `None` waits indefinitely
    pub timeout_seconds: Option<u64>,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: None,
            user_agent: "rinha-fetch/0.1.0".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listing_url: DEFAULT_LISTING_URL.to_string(),
            raw_base_url: DEFAULT_RAW_BASE_URL.to_string(),
            output_dir: DEFAULT_OUTPUT_DIR.into(),
            workers: DEFAULT_WORKERS,
            http: HttpConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables and defaults
    pub fn from_env() -> Result<Self> {
        let listing_url = std::env::var("RINHA_FETCH_LISTING_URL")
            .unwrap_or_else(|_| DEFAULT_LISTING_URL.to_string());

        let raw_base_url = std::env::var("RINHA_FETCH_RAW_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_RAW_BASE_URL.to_string());

        let output_dir = std::env::var("RINHA_FETCH_OUTPUT_DIR")
            .unwrap_or_else(|_| DEFAULT_OUTPUT_DIR.to_string())
            .into();

        let workers = parse_env_var("RINHA_FETCH_WORKERS")?.unwrap_or(DEFAULT_WORKERS);

        let http = HttpConfig {
            timeout_seconds: parse_env_var("RINHA_FETCH_HTTP_TIMEOUT_SECONDS")?,
            user_agent: std::env::var("RINHA_FETCH_USER_AGENT")
                .unwrap_or_else(|_| "rinha-fetch/0.1.0".to_string()),
        };

        Ok(Config {
            listing_url,
            raw_base_url,
            output_dir,
            workers,
            http,
        })
    }

    /// Apply per-invocation overrides from the command line
    pub fn with_overrides(mut self, output_dir: Option<PathBuf>, workers: Option<usize>) -> Self {
        if let Some(output_dir) = output_dir {
            self.output_dir = output_dir;
        }
        if let Some(workers) = workers {
            self.workers = workers;
        }
        self
    }

    /// Get HTTP timeout as Duration
    pub fn http_timeout(&self) -> Option<Duration> {
        self.http.timeout_seconds.map(Duration::from_secs)
    }

    /// Build the shared HTTP client
    pub fn http_client(&self) -> Result<reqwest::Client> {
        let mut builder = reqwest::Client::builder().user_agent(&self.http.user_agent);
        if let Some(timeout) = self.http_timeout() {
            builder = builder.timeout(timeout);
        }
        builder.build().context("Failed to build HTTP client")
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(anyhow::anyhow!("Worker pool width must be at least 1"));
        }

        reqwest::Url::parse(&self.listing_url)
            .with_context(|| format!("Invalid listing URL: {}", self.listing_url))?;
        reqwest::Url::parse(&self.raw_base_url)
            .with_context(|| format!("Invalid raw base URL: {}", self.raw_base_url))?;

        Ok(())
    }
}

/// Helper function to parse environment variable as a specific type
fn parse_env_var<T>(var_name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display + Send + Sync + std::error::Error + 'static,
{
    match std::env::var(var_name) {
        Ok(val) => val.parse().map(Some).with_context(|| {
            format!("Failed to parse environment variable {} = '{}'", var_name, val)
        }),
        Err(_) => Ok(None),
    }
}
