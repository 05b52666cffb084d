//! Idempotent asset download
//!
//! An asset that already exists locally is not fetched again unless the
//! run asks for a rewrite, so an interrupted harvest can be resumed by
//! re-running it. A truncated file from an interrupted run passes this
//! check too; there is no content verification.

use crate::crawler::fetcher::fetch_bytes;
use crate::ShelfError;
use reqwest::Client;
use std::path::Path;
use url::Url;

/// What `download_if_absent` did for an asset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadOutcome {
    Downloaded,
    SkippedExisting,
}

/// Fetches `url` into `path` unless the file is already there
///
/// With `rewrite` set the existing file is fetched and overwritten
/// regardless. The whole body is written in one go; write failures
/// propagate to the caller like any fetch failure.
pub async fn download_if_absent(
    client: &Client,
    url: &Url,
    path: &Path,
    rewrite: bool,
) -> Result<DownloadOutcome, ShelfError> {
    if path.exists() && !rewrite {
        tracing::debug!("already present, skipping: {}", path.display());
        return Ok(DownloadOutcome::SkippedExisting);
    }

    let body = fetch_bytes(client, url).await?;
    std::fs::write(path, body)?;
    tracing::debug!("wrote {}", path.display());
    Ok(DownloadOutcome::Downloaded)
}
