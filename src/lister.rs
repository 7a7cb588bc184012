//! Remote file listing
//!
//! The listing endpoint answers with a JSON object keyed by file name. Only
//! the keys are used; the per-entry commit metadata is ignored.

use reqwest::Client;
use serde::de::IgnoredAny;
use std::collections::BTreeMap;
use tracing::{debug, info};

use crate::errors::{FetchError, Result};
use crate::models::Listing;

/// Fetch the listing and return its keys as file names.
pub async fn list_names(client: &Client, listing_url: &str) -> Result<Listing> {
    debug!("Fetching file listing from: {}", listing_url);
    let response = client
        .get(listing_url)
        .header("Accept", "application/json")
        .header("Content-Type", "application/json")
        .header("GitHub-Verified-Fetch", "true")
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(FetchError::ListingStatus {
            url: listing_url.to_string(),
            status: response.status().as_u16(),
        });
    }

    let body = response.bytes().await?;
    let listing = parse_listing(&body, listing_url)?;

    info!("Listing contains {} files", listing.len());
    Ok(listing)
}

fn parse_listing(body: &[u8], listing_url: &str) -> Result<Listing> {
    let value: serde_json::Value = serde_json::from_slice(body)?;
    if !value.is_object() {
        return Err(FetchError::ListingFormat {
            url: listing_url.to_string(),
        });
    }

    let entries: BTreeMap<String, IgnoredAny> = serde_json::from_value(value)?;
    Ok(Listing::new(entries.into_keys()))
}
