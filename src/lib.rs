pub mod cache;
pub mod config;
pub mod http;
pub mod links;
pub mod output;
pub mod resolver;
pub mod runtime;
pub mod services;
pub mod source;

pub use links::{DownloadLinks, LinuxOption, ResolvedRelease};
pub use resolver::Resolver;
