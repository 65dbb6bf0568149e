//! WordPress version resolution against the remote tag listing.
//!
//! Owns the lazily fetched, memoized tag set for one command invocation
//! and maps user-facing version requests onto concrete release tags.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

pub const WP_TAGS_URL: &str =
    "https://api.github.com/repos/WordPress/wordpress-develop/git/refs/tags";
pub const TAG_LOOKUP_USER_AGENT: &str = "wp-pest-setup/version-lookup";
pub const TAG_LOOKUP_TIMEOUT_MS: u64 = 8_000;

const TAG_REF_PREFIX: &str = "refs/tags/";

/// A user-facing version request, fixed at parse time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionRequest {
    Latest,
    Explicit(String),
}

impl VersionRequest {
    /// Maps the `--wp-version` option onto a request; an empty value is
    /// treated the same as "latest".
    pub fn from_arg(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed == "latest" {
            VersionRequest::Latest
        } else {
            VersionRequest::Explicit(trimmed.to_string())
        }
    }
}

/// Failures while resolving a version request. Reachability problems and
/// unknown versions stay distinct so callers can give different guidance.
#[derive(Debug, Error)]
pub enum VersionError {
    #[error("Could not reach the WordPress version listing. Check your connection and try again.")]
    RemoteUnavailable(#[source] reqwest::Error),
    #[error("The WordPress version listing came back empty.")]
    NoVersionsAvailable,
    #[error("Wrong WordPress version. Make sure the version number is correct.")]
    InvalidVersion(String),
}

#[derive(Debug, Deserialize)]
struct GitTagRef {
    #[serde(rename = "ref")]
    git_ref: String,
}

/// Resolves version requests against the remote tag listing, fetching the
/// listing at most once per instance. Construct one per command
/// invocation; the cache dies with it.
#[derive(Debug)]
pub struct VersionResolver {
    tags_url: String,
    tags: Option<Vec<String>>,
}

impl VersionResolver {
    pub fn new(tags_url: impl Into<String>) -> Self {
        Self {
            tags_url: tags_url.into(),
            tags: None,
        }
    }

    /// Resolves a request to a concrete tag. "Latest" is the last entry
    /// of the listing; an explicit version must be present in it.
    pub fn resolve(&mut self, request: &VersionRequest) -> Result<String, VersionError> {
        let tags = self.tags()?;
        match request {
            VersionRequest::Latest => {
                tags.last().cloned().ok_or(VersionError::NoVersionsAvailable)
            }
            VersionRequest::Explicit(version) => {
                if tags.iter().any(|tag| tag == version) {
                    Ok(version.clone())
                } else {
                    Err(VersionError::InvalidVersion(version.clone()))
                }
            }
        }
    }

    // Failed fetches are not cached; the next call retries.
    fn tags(&mut self) -> Result<&[String], VersionError> {
        if self.tags.is_none() {
            let fetched = fetch_version_tags(&self.tags_url)?;
            tracing::debug!(count = fetched.len(), "fetched WordPress tag listing");
            self.tags = Some(fetched);
        }
        Ok(self.tags.as_deref().unwrap_or_default())
    }
}

/// Fetches the tag listing: a JSON array of `{"ref": "refs/tags/<tag>"}`
/// records in remote order.
pub fn fetch_version_tags(tags_url: &str) -> Result<Vec<String>, VersionError> {
    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_millis(TAG_LOOKUP_TIMEOUT_MS))
        .build()
        .map_err(VersionError::RemoteUnavailable)?;
    let records = client
        .get(tags_url)
        .header(reqwest::header::USER_AGENT, TAG_LOOKUP_USER_AGENT)
        .send()
        .and_then(|response| response.error_for_status())
        .map_err(VersionError::RemoteUnavailable)?
        .json::<Vec<GitTagRef>>()
        .map_err(VersionError::RemoteUnavailable)?;
    Ok(records
        .into_iter()
        .filter_map(|record| {
            record
                .git_ref
                .strip_prefix(TAG_REF_PREFIX)
                .map(str::to_string)
        })
        .filter(|tag| !tag.is_empty())
        .collect())
}

/// Maps a point-zero release onto the short tag the core mirror uses
/// ("6.1.0" becomes "6.1"); every other version passes through unchanged.
pub fn core_release_tag(version: &str) -> String {
    let parts: Vec<&str> = version.split('.').collect();
    match parts.as_slice() {
        [major, minor, "0"] => format!("{major}.{minor}"),
        _ => version.to_string(),
    }
}
