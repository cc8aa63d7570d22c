// Cache freshness policy.
// Decides from the store's last-write time whether the project list needs a refresh.

use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::config::DEFAULT_MAX_AGE;

/// True iff more than `max_age` has elapsed between `last_write` and `now`.
///
/// A last-write time in the future counts as fresh.
pub fn is_stale(now: DateTime<Utc>, last_write: DateTime<Utc>, max_age: Duration) -> bool {
    match now.signed_duration_since(last_write).to_std() {
        Ok(elapsed) => elapsed > max_age,
        Err(_) => false,
    }
}

/// Outcome of a freshness check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// Within the staleness window.
    Fresh,
    /// Older than the staleness window.
    Stale,
    /// Last-write time could not be determined.
    Unknown,
    /// Refresh requested regardless of age.
    Forced,
}

impl Freshness {
    pub fn needs_refresh(&self) -> bool {
        !matches!(self, Freshness::Fresh)
    }
}

/// Staleness window plus the explicit force-refresh switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreshnessPolicy {
    pub max_age: Duration,
    pub force_refresh: bool,
}

impl Default for FreshnessPolicy {
    fn default() -> Self {
        Self {
            max_age: DEFAULT_MAX_AGE,
            force_refresh: false,
        }
    }
}

impl FreshnessPolicy {
    pub fn new(max_age: Duration, force_refresh: bool) -> Self {
        Self {
            max_age,
            force_refresh,
        }
    }

    pub fn check(&self, now: DateTime<Utc>, last_write: Option<DateTime<Utc>>) -> Freshness {
        if self.force_refresh {
            return Freshness::Forced;
        }
        match last_write {
            None => Freshness::Unknown,
            Some(last_write) if is_stale(now, last_write, self.max_age) => Freshness::Stale,
            Some(_) => Freshness::Fresh,
        }
    }
}
