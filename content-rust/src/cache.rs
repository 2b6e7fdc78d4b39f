use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
    time::{Duration, Instant},
};

/// A source of monotonic time, injectable so tests control freshness.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// The wall clock used outside of tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

struct CacheSlot<T> {
    value: T,
    fetched_at: Instant,
}

/// Process-lifetime response cache with single-key granularity.
///
/// One slot holds one logical query result; two queries sharing a key
/// clobber each other, so callers must pick sufficiently specific keys.
/// Writes are last-writer-wins and there is no eviction beyond the
/// freshness window applied on read.
pub struct ResponseCache<T> {
    ttl: Duration,
    clock: Arc<dyn Clock>,
    slots: Mutex<HashMap<String, CacheSlot<T>>>,
}

impl<T: Clone> ResponseCache<T> {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    #[must_use]
    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            ttl,
            clock,
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Value stored under `key`, provided it is younger than the freshness
    /// window.
    #[must_use]
    pub fn get_fresh(&self, key: &str) -> Option<T> {
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        let slot = slots.get(key)?;
        if self.clock.now().duration_since(slot.fetched_at) < self.ttl {
            Some(slot.value.clone())
        } else {
            None
        }
    }

    /// Value stored under `key` regardless of age. The degraded read used
    /// when the origin is unreachable: stale data beats no data.
    #[must_use]
    pub fn get_stale(&self, key: &str) -> Option<T> {
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.get(key).map(|slot| slot.value.clone())
    }

    pub fn insert(&self, key: &str, value: T) {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.insert(
            key.to_string(),
            CacheSlot {
                value,
                fetched_at: self.clock.now(),
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content_test::ManualClock;

    #[test]
    fn fresh_read_within_window() {
        let clock = Arc::new(ManualClock::new());
        let cache = ResponseCache::with_clock(Duration::from_secs(300), clock.clone());

        cache.insert("posts", vec!["a".to_string()]);
        clock.advance(Duration::from_secs(299));
        assert_eq!(cache.get_fresh("posts"), Some(vec!["a".to_string()]));
    }

    #[test]
    fn expired_read_is_stale_only() {
        let clock = Arc::new(ManualClock::new());
        let cache = ResponseCache::with_clock(Duration::from_secs(300), clock.clone());

        cache.insert("posts", vec!["a".to_string()]);
        clock.advance(Duration::from_secs(301));
        assert_eq!(cache.get_fresh("posts"), None);
        assert_eq!(cache.get_stale("posts"), Some(vec!["a".to_string()]));
    }

    #[test]
    fn shared_key_is_last_writer_wins() {
        let cache: ResponseCache<Vec<String>> = ResponseCache::new(Duration::from_secs(300));

        cache.insert("posts", vec!["a".to_string()]);
        cache.insert("posts", vec!["b".to_string()]);
        assert_eq!(cache.get_fresh("posts"), Some(vec!["b".to_string()]));
    }

    #[test]
    fn absent_key_misses() {
        let cache: ResponseCache<Vec<String>> = ResponseCache::new(Duration::from_secs(300));
        assert_eq!(cache.get_fresh("posts"), None);
        assert_eq!(cache.get_stale("posts"), None);
    }
}
