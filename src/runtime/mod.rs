//! Runtime abstraction for process-level inputs.
//!
//! Environment variables and the wall clock are read through the
//! [`Runtime`] trait so that token handling and cache expiry can be
//! driven deterministically in tests.

mod env;

use std::env as std_env;
use std::time::SystemTime;

#[cfg_attr(test, mockall::automock)]
pub trait Runtime: Send + Sync {
    // Environment
    fn env_var(&self, key: &str) -> Result<String, std_env::VarError>;

    // Clock
    /// Current wall-clock time.
    fn now(&self) -> SystemTime;
}

pub struct RealRuntime;

impl Runtime for RealRuntime {
    fn env_var(&self, key: &str) -> Result<String, std_env::VarError> {
        self.env_var_impl(key)
    }

    fn now(&self) -> SystemTime {
        self.now_impl()
    }
}
