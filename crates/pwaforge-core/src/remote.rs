//! Remote Import
//!
//! Fetches a newline-delimited manifest collection from an arbitrary URL.
//! A non-2xx response is an error carrying the HTTP status; the body goes
//! through the same per-line skip-and-continue decoding as a local import.

use std::time::Duration;

use crate::codec::string_to_manifest_list;
use crate::error::{Error, Result};
use crate::manifest::Manifest;

/// Shared client configuration: 30 second timeout, reusable across requests.
fn http_client() -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()?)
}

/// Fetch raw text from a URL, failing on a non-2xx status.
pub async fn fetch_text(url: &str) -> Result<String> {
    let response = http_client()?.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(Error::HttpStatus(status));
    }
    Ok(response.text().await?)
}

/// Fetch and decode a newline-delimited manifest collection.
pub async fn fetch_manifest_list(url: &str) -> Result<Vec<Manifest>> {
    let text = fetch_text(url).await?;
    Ok(string_to_manifest_list(&text))
}
