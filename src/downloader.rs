use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info};

use crate::config::Config;
use crate::fetcher;
use crate::lister;
use crate::models::{Listing, RunSummary, TaskFailure};
use crate::pool;

/// List the remote files and fetch every one of them into the output directory.
///
/// A listing failure aborts the run before anything is fetched. Per-file
/// failures are collected in the summary and logged once the pool drains.
pub async fn download_all(config: &Config) -> Result<RunSummary> {
    let client = config.http_client()?;

    let listing = lister::list_names(&client, &config.listing_url)
        .await
        .context("Failed to list remote files")?;

    download_listing(&client, config, listing).await
}

/// Only list the remote file names.
pub async fn list_only(config: &Config) -> Result<Listing> {
    let client = config.http_client()?;
    let listing = lister::list_names(&client, &config.listing_url)
        .await
        .context("Failed to list remote files")?;
    Ok(listing)
}

async fn download_listing(
    client: &reqwest::Client,
    config: &Config,
    listing: Listing,
) -> Result<RunSummary> {
    // Create output directory if it doesn't exist
    tokio::fs::create_dir_all(&config.output_dir)
        .await
        .with_context(|| {
            format!("Cannot create output directory: {}", config.output_dir.display())
        })?;

    let listed = listing.len();
    info!(
        "Fetching {} files into {} with {} workers",
        listed,
        config.output_dir.display(),
        config.workers
    );

    let raw_base_url: Arc<str> = Arc::from(config.raw_base_url.as_str());
    let output_dir: Arc<Path> = Arc::from(config.output_dir.as_path());

    let results = pool::run(listing, config.workers, |name| {
        let client = client.clone();
        let raw_base_url = Arc::clone(&raw_base_url);
        let output_dir = Arc::clone(&output_dir);
        async move { fetcher::fetch_file(&client, &raw_base_url, &name, &output_dir).await }
    })
    .await;

    let mut summary = RunSummary {
        listed,
        ..RunSummary::default()
    };
    for (name, result) in results {
        match result {
            Ok(report) => summary.fetched.push(report),
            Err(error) => summary.failures.push(TaskFailure { name, error }),
        }
    }

    for failure in &summary.failures {
        error!("✗ Failed to fetch {}: {}", failure.name, failure.error);
    }
    info!(
        "Fetched {} of {} files ({} failed)",
        summary.succeeded(),
        listed,
        summary.failed()
    );

    Ok(summary)
}
