use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

pub const ARCHIVE_FETCH_USER_AGENT: &str = "wp-pest-setup/archive-fetch";
pub const ARCHIVE_CONNECT_TIMEOUT_MS: u64 = 30_000;

/// Failures while downloading a remote archive. Transport problems stay
/// distinct from local-disk problems.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed opening remote file")]
    TransferFailed(#[source] reqwest::Error),
    #[error("Failed writing downloaded archive to {}", .path.display())]
    SinkFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Streams the resource at `url` into `destination`, overwriting any
/// existing file and creating the parent directory when absent. The body
/// is never buffered fully in memory. One attempt; retries are the
/// caller's policy. Only connection establishment is bounded by a
/// timeout; the body stream is not.
pub fn fetch_to_file(url: &str, destination: &Path) -> Result<(), FetchError> {
    if let Some(parent) = destination.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| FetchError::SinkFailed {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    let client = reqwest::blocking::Client::builder()
        .connect_timeout(Duration::from_millis(ARCHIVE_CONNECT_TIMEOUT_MS))
        .timeout(None)
        .build()
        .map_err(FetchError::TransferFailed)?;
    let mut response = client
        .get(url)
        .header(reqwest::header::USER_AGENT, ARCHIVE_FETCH_USER_AGENT)
        .send()
        .and_then(|response| response.error_for_status())
        .map_err(FetchError::TransferFailed)?;

    let mut file = File::create(destination).map_err(|source| FetchError::SinkFailed {
        path: destination.to_path_buf(),
        source,
    })?;
    let bytes = response
        .copy_to(&mut file)
        .map_err(FetchError::TransferFailed)?;
    tracing::debug!(url, bytes, path = %destination.display(), "downloaded archive");
    Ok(())
}
