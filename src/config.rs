//! Resolver configuration.

use std::time::Duration;

use log::debug;

use crate::runtime::Runtime;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Repository whose latest release is resolved.
pub const RELEASE_REPO: &str = "OpenCortexIDE/cortexide-binaries";

pub const DEFAULT_VERSIONS_URL: &str =
    "https://raw.githubusercontent.com/OpenCortexIDE/cortexide-versions/main";

/// Version pointer files, probed in this order.
pub const VERSION_FILES: [&str; 3] = ["latest.txt", "version.txt", "stable.txt"];

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// GitHub API base URL
    pub api_url: String,
    /// Base URL of the version pointer files
    pub versions_url: String,
    /// Bearer token for the release API
    pub token: Option<String>,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Config {
    /// Builds the configuration, reading `GITHUB_TOKEN` through the runtime.
    /// Explicit arguments override the defaults.
    pub fn load<R: Runtime>(
        runtime: &R,
        api_url: Option<String>,
        versions_url: Option<String>,
        timeout_secs: Option<u64>,
    ) -> Self {
        let token = runtime
            .env_var("GITHUB_TOKEN")
            .ok()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        if let Some(token) = &token {
            debug!("Using GITHUB_TOKEN for authentication: {}", mask_token(token));
        }

        Self {
            api_url: api_url.unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            versions_url: versions_url.unwrap_or_else(|| DEFAULT_VERSIONS_URL.to_string()),
            token,
            timeout: Duration::from_secs(timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        }
    }

    /// Full URLs of the version pointer files, in probe order.
    pub fn version_urls(&self) -> Vec<String> {
        let base = self.versions_url.trim_end_matches('/');
        VERSION_FILES
            .iter()
            .map(|file| format!("{}/{}", base, file))
            .collect()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            versions_url: DEFAULT_VERSIONS_URL.to_string(),
            token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Keeps the first and last four characters of a token.
fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}*********{}", head, tail)
}
