//! Cache of the last resolved release.
//!
//! One entry, replaced as a whole. Readers get an `Arc` snapshot, so a
//! concurrent refresh never exposes a half-written entry; the lock is only
//! held to swap the pointer.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, SystemTime};

use crate::links::ResolvedRelease;

/// How long a resolved release is served without asking upstream again.
pub const TTL: Duration = Duration::from_secs(15 * 60);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub release: ResolvedRelease,
    pub checked_at: SystemTime,
}

impl CacheEntry {
    /// Fresh while fewer than `ttl` milliseconds have elapsed. A clock that
    /// moved backwards counts as no time elapsed.
    pub fn is_fresh(&self, now: SystemTime, ttl: Duration) -> bool {
        let elapsed = now
            .duration_since(self.checked_at)
            .unwrap_or(Duration::ZERO);
        elapsed.as_millis() < ttl.as_millis()
    }
}

#[derive(Debug)]
pub struct ReleaseCache {
    entry: Mutex<Option<Arc<CacheEntry>>>,
    ttl: Duration,
}

impl ReleaseCache {
    pub fn new() -> Self {
        Self::with_ttl(TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entry: Mutex::new(None),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn slot(&self) -> MutexGuard<'_, Option<Arc<CacheEntry>>> {
        // The slot only ever holds a complete entry, so a poisoned lock is safe to reuse
        self.entry.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The current entry, fresh or not.
    pub fn snapshot(&self) -> Option<Arc<CacheEntry>> {
        self.slot().clone()
    }

    /// The current entry if it is still within the TTL at `now`.
    pub fn fresh(&self, now: SystemTime) -> Option<Arc<CacheEntry>> {
        self.snapshot().filter(|entry| entry.is_fresh(now, self.ttl))
    }

    pub fn cached_version(&self) -> Option<String> {
        self.snapshot().map(|entry| entry.release.version.clone())
    }

    /// Replaces the entry. The check timestamp never moves backwards.
    pub fn store(&self, release: ResolvedRelease, now: SystemTime) -> Arc<CacheEntry> {
        let mut slot = self.slot();
        let checked_at = match slot.as_ref() {
            Some(previous) if previous.checked_at > now => previous.checked_at,
            _ => now,
        };
        let entry = Arc::new(CacheEntry {
            release,
            checked_at,
        });
        *slot = Some(Arc::clone(&entry));
        entry
    }
}

impl Default for ReleaseCache {
    fn default() -> Self {
        Self::new()
    }
}
