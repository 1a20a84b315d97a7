//! HTTP client module with timeout handling and status classification.

mod client;
mod error;

pub use client::HttpClient;
pub use error::{FetchError, check_status, check_transport, classify_status};
