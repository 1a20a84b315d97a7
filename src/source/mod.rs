//! Source abstraction for release metadata.
//!
//! The resolver only needs two network operations: the latest release of
//! the binaries repository, and a plain-text version pointer used when the
//! release API is unavailable. Both live behind [`ReleaseSource`].

mod github;

use anyhow::Result;
use async_trait::async_trait;
pub use github::GitHubSource;

/// A downloadable asset from a release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseAsset {
    pub name: String,
    pub download_url: Option<String>,
}

impl ReleaseAsset {
    pub fn new(name: impl Into<String>, download_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            download_url: Some(download_url.into()),
        }
    }
}

/// A release from the source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Release {
    /// Version tag (e.g., "v1.0.0")
    pub tag: String,
    /// Downloadable assets, in the order the source listed them
    pub assets: Vec<ReleaseAsset>,
}

/// Trait for release metadata sources.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReleaseSource: Send + Sync {
    /// Fetch the latest published release.
    async fn latest_release(&self) -> Result<Release>;

    /// Fetch a plain-text document, returned verbatim.
    async fn fetch_text(&self, url: &str) -> Result<String>;
}
