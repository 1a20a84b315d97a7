//! Release resolution with caching and fallback tiers.
//!
//! [`Resolver::resolve`] always produces a usable [`ResolvedRelease`]:
//!
//! 1. a cached result younger than the TTL is returned as is;
//! 2. otherwise the latest release is fetched and its assets classified;
//! 3. if that fails, a plain-text version pointer is probed and links are
//!    built from the version alone, falling back to the last cached or the
//!    default version when no pointer answers.

use anyhow::Result;
use log::{debug, info, warn};

use crate::cache::ReleaseCache;
use crate::links::{
    DEFAULT_VERSION, DownloadLinks, ResolvedRelease, default_links, missing_required_assets,
};
use crate::runtime::Runtime;
use crate::source::ReleaseSource;

pub struct Resolver<S: ReleaseSource, R: Runtime> {
    source: S,
    runtime: R,
    cache: ReleaseCache,
    version_urls: Vec<String>,
}

impl<S: ReleaseSource, R: Runtime> Resolver<S, R> {
    /// `version_urls` are the version pointer files probed, in order, when
    /// the release API is unavailable.
    pub fn new(source: S, runtime: R, version_urls: Vec<String>) -> Self {
        Self {
            source,
            runtime,
            cache: ReleaseCache::new(),
            version_urls,
        }
    }

    pub fn with_cache(mut self, cache: ReleaseCache) -> Self {
        self.cache = cache;
        self
    }

    pub fn cache(&self) -> &ReleaseCache {
        &self.cache
    }

    pub fn version_urls(&self) -> &[String] {
        &self.version_urls
    }

    /// Resolves the latest release. Never fails.
    #[tracing::instrument(skip(self))]
    pub async fn resolve(&self) -> ResolvedRelease {
        let now = self.runtime.now();

        if let Some(entry) = self.cache.fresh(now) {
            debug!("Serving cached release {}", entry.release.version);
            return entry.release.clone();
        }

        match self.resolve_live().await {
            Ok(resolved) => {
                self.cache.store(resolved.clone(), now);
                return resolved;
            }
            Err(e) => warn!("Failed to fetch latest release: {:#}", e),
        }

        let version = self.fallback_version().await;
        info!("Using fallback links for version {}", version);
        let resolved = ResolvedRelease {
            links: default_links(&version),
            version,
        };
        self.cache.store(resolved.clone(), now);
        resolved
    }

    async fn resolve_live(&self) -> Result<ResolvedRelease> {
        let release = self.source.latest_release().await?;

        let missing = missing_required_assets(&release);
        if !missing.is_empty() {
            warn!(
                "Release {} is missing expected assets: {}",
                release.tag,
                missing.join(", ")
            );
        }

        let links = DownloadLinks::from_release(&release);
        info!(
            "Resolved release {} with {} Linux option(s)",
            release.tag,
            links.linux.len()
        );

        Ok(ResolvedRelease {
            version: release.tag,
            links,
        })
    }

    /// First non-empty version pointer, else the cached version, else the default.
    async fn fallback_version(&self) -> String {
        for url in &self.version_urls {
            match self.source.fetch_text(url).await {
                Ok(body) => {
                    let version = body.trim();
                    if !version.is_empty() {
                        debug!("Version pointer {} names {}", url, version);
                        return version.to_string();
                    }
                    debug!("Version pointer {} is empty", url);
                }
                Err(e) => debug!("Version pointer {} unavailable: {:#}", url, e),
            }
        }

        match self.cache.cached_version() {
            Some(version) => version,
            None => DEFAULT_VERSION.to_string(),
        }
    }
}
