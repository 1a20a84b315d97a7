//! Classification of failed upstream requests.

use reqwest::{Response, StatusCode};

/// Header GitHub uses to report the remaining request quota.
const RATE_LIMIT_REMAINING: &str = "x-ratelimit-remaining";

/// Why an upstream request did not produce a usable body.
#[derive(Debug)]
pub enum FetchError {
    /// Rate limit exceeded (HTTP 403 with an exhausted quota, or 429)
    RateLimitExceeded(String),
    /// Authentication failed (HTTP 401)
    AuthenticationFailed(String),
    /// Resource not found (HTTP 404)
    NotFound(String),
    /// Forbidden access (HTTP 403 non-rate-limit)
    Forbidden(String),
    /// Other 4xx responses
    ClientError(String),
    /// 5xx responses
    ServerError(String),
    /// Any other non-success status (1xx, unfollowed 3xx)
    UnexpectedStatus(String),
    /// No response within the configured timeout
    Timeout(String),
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::RateLimitExceeded(msg) => {
                write!(
                    f,
                    "Rate limit exceeded: {}. Try again later or set GITHUB_TOKEN environment variable.",
                    msg
                )
            }
            FetchError::AuthenticationFailed(msg) => {
                write!(f, "Authentication failed: {}. Check your GITHUB_TOKEN.", msg)
            }
            FetchError::NotFound(msg) => write!(f, "Not found: {}", msg),
            FetchError::Forbidden(msg) => {
                write!(f, "Access forbidden: {}. You may need authentication.", msg)
            }
            FetchError::ClientError(msg) => write!(f, "Request error: {}", msg),
            FetchError::ServerError(msg) => write!(f, "Server error: {}", msg),
            FetchError::UnexpectedStatus(msg) => write!(f, "Unexpected response: {}", msg),
            FetchError::Timeout(msg) => write!(f, "Request timed out: {}", msg),
        }
    }
}

impl std::error::Error for FetchError {}

/// Maps a non-success status to a [`FetchError`].
///
/// `quota_exhausted` tells a rate-limited 403 apart from a plain 403.
pub fn classify_status(status: StatusCode, quota_exhausted: bool) -> FetchError {
    match status {
        StatusCode::UNAUTHORIZED => {
            FetchError::AuthenticationFailed("Invalid or missing authentication token".to_string())
        }
        StatusCode::FORBIDDEN if quota_exhausted => {
            FetchError::RateLimitExceeded("GitHub API rate limit exceeded".to_string())
        }
        StatusCode::FORBIDDEN => {
            FetchError::Forbidden("Access to this resource is forbidden".to_string())
        }
        StatusCode::TOO_MANY_REQUESTS => {
            FetchError::RateLimitExceeded("Too many requests".to_string())
        }
        StatusCode::NOT_FOUND => {
            FetchError::NotFound("The requested resource was not found".to_string())
        }
        s if s.is_client_error() => FetchError::ClientError(format!("HTTP {} error", s.as_u16())),
        s if s.is_server_error() => FetchError::ServerError(format!("HTTP {} error", s.as_u16())),
        s => FetchError::UnexpectedStatus(format!("HTTP {}", s.as_u16())),
    }
}

/// Passes successful responses through and turns everything else into a
/// classified error.
pub fn check_status(response: Response) -> anyhow::Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let quota_exhausted = response
        .headers()
        .get(RATE_LIMIT_REMAINING)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.trim() == "0");

    Err(anyhow::Error::from(classify_status(status, quota_exhausted)))
}

/// Wraps a transport error, tagging timeouts so callers can tell them apart.
pub fn check_transport(error: reqwest::Error) -> anyhow::Error {
    if error.is_timeout() {
        anyhow::Error::from(FetchError::Timeout(error.to_string()))
    } else {
        anyhow::Error::from(error).context("Failed to send request")
    }
}
