//! Service factory for building the resolver's dependencies.
//!
//! Keeps the construction of the HTTP client and release source apart from
//! the configuration values they are built from.

use std::time::Duration;

use anyhow::Result;
use log::debug;
use reqwest::{
    Client,
    header::{AUTHORIZATION, HeaderMap, HeaderValue},
};

use crate::{
    config::{Config, RELEASE_REPO},
    http::HttpClient,
    resolver::Resolver,
    runtime::Runtime,
    source::GitHubSource,
};

/// Build an HTTP client with optional authentication token and a request timeout
pub fn build_http_client(token: Option<&str>, timeout: Duration) -> Result<HttpClient> {
    let mut headers = HeaderMap::new();

    if let Some(token) = token {
        let mut auth_value = HeaderValue::from_str(&format!("Bearer {}", token))?;
        auth_value.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth_value);
        debug!("HTTP client configured with authentication");
    }

    let client = Client::builder()
        .user_agent("cortexide-releases")
        .default_headers(headers)
        .timeout(timeout)
        .build()?;

    Ok(HttpClient::new(client))
}

/// Build the GitHub release source from configuration
pub fn build_source(config: &Config) -> Result<GitHubSource> {
    let http_client = build_http_client(config.token.as_deref(), config.timeout)?;
    Ok(GitHubSource::from_http_client(
        http_client,
        &config.api_url,
        RELEASE_REPO,
    ))
}

/// Build a resolver backed by GitHub
pub fn build_resolver<R: Runtime>(
    config: &Config,
    runtime: R,
) -> Result<Resolver<GitHubSource, R>> {
    let source = build_source(config)?;
    Ok(Resolver::new(source, runtime, config.version_urls()))
}
