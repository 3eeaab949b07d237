use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};
use std::collections::HashMap;
use std::num::NonZeroU32;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};
use tracing::warn;

use crate::error::CopydeskError;

pub const MAX_TRACKED_USERNAMES: usize = 10_000;
pub const LOCKOUT: Duration = Duration::from_secs(60);

/// Per-username quota on failed credential checks.
///
/// Failures consume the quota; successes do not. Once a failure exceeds the
/// quota the username is locked for [`LOCKOUT`], and locked usernames are
/// refused before their password is looked at.
#[derive(Clone)]
pub struct LoginLimiter {
    failures: Arc<DefaultKeyedRateLimiter<String>>,
    locked: Arc<Mutex<HashMap<String, Instant>>>,
    max_tracked: usize,
}

impl LoginLimiter {
    pub fn per_minute(attempts: u32) -> Self {
        let burst = NonZeroU32::new(attempts).unwrap_or(NonZeroU32::MIN);
        Self::with_quota(Quota::per_minute(burst), MAX_TRACKED_USERNAMES)
    }

    pub fn with_quota(quota: Quota, max_tracked: usize) -> Self {
        Self {
            failures: Arc::new(RateLimiter::keyed(quota)),
            locked: Arc::new(Mutex::new(HashMap::new())),
            max_tracked,
        }
    }

    /// Refuse a username that is currently locked out.
    pub fn ensure_unlocked(&self, username: &str) -> Result<(), CopydeskError> {
        let key = normalize(username);
        let mut locked = self.locked.lock().unwrap_or_else(PoisonError::into_inner);
        match locked.get(&key) {
            Some(until) if *until > Instant::now() => Err(CopydeskError::RateLimited),
            Some(_) => {
                locked.remove(&key);
                Ok(())
            }
            None => Ok(()),
        }
    }

    /// Count one failed attempt. Fails with `RateLimited` when this attempt
    /// exceeded the quota, which also starts the lockout.
    pub fn record_failure(&self, username: &str) -> Result<(), CopydeskError> {
        let key = normalize(username);
        let outcome = self.failures.check_key(&key);
        let result = if outcome.is_err() {
            warn!(username = %key, "failed login attempts exceeded quota");
            self.locked
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .insert(key, Instant::now() + LOCKOUT);
            Err(CopydeskError::RateLimited)
        } else {
            Ok(())
        };
        self.prune();
        result
    }

    pub fn tracked_usernames(&self) -> usize {
        self.failures.len()
    }

    fn prune(&self) {
        if self.failures.len() > self.max_tracked {
            self.failures.retain_recent();
            self.failures.shrink_to_fit();
        }
        let mut locked = self.locked.lock().unwrap_or_else(PoisonError::into_inner);
        if locked.len() > self.max_tracked {
            let now = Instant::now();
            locked.retain(|_, until| *until > now);
        }
    }
}

fn normalize(username: &str) -> String {
    username.trim().to_lowercase()
}
