//! In-memory caching layer for probe outcomes.

use crate::types::ProbeResult;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct CacheEntry {
    result: ProbeResult,
    expires_at: Instant,
}

/// Thread-safe cache keyed by `ecosystem:name`, so the same identifier
/// surfacing from both source parsing and a candidate file is probed once.
#[derive(Debug, Clone)]
pub struct ProbeCache {
    cache: Arc<DashMap<String, CacheEntry>>,
    ttl: Duration,
}

impl ProbeCache {
    pub fn new(ttl_secs: u64) -> Self {
        Self {
            cache: Arc::new(DashMap::new()),
            ttl: Duration::from_secs(ttl_secs),
        }
    }

    pub fn get(&self, key: &str) -> Option<ProbeResult> {
        let entry = self.cache.get(key)?;
        if Instant::now() < entry.expires_at {
            return Some(entry.result.clone());
        }
        drop(entry);
        self.cache.remove(key);
        None
    }

    pub fn set(&self, key: &str, result: ProbeResult) {
        let entry = CacheEntry {
            result,
            expires_at: Instant::now() + self.ttl,
        };
        self.cache.insert(key.to_string(), entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Ecosystem, ProbeStatus};

    fn taken(name: &str) -> ProbeResult {
        ProbeResult {
            name: name.to_string(),
            ecosystem: Ecosystem::Npm,
            status: ProbeStatus::Taken,
            detail: None,
        }
    }

    #[test]
    fn test_cache_set_get() {
        let cache = ProbeCache::new(60);
        cache.set("npm:lodash", taken("lodash"));

        let cached = cache.get("npm:lodash").expect("entry should be cached");
        assert_eq!(cached.name, "lodash");
        assert_eq!(cached.status, ProbeStatus::Taken);
    }

    #[test]
    fn test_cache_miss() {
        let cache = ProbeCache::new(60);
        assert!(cache.get("npm:nonexistent").is_none());
    }

    #[test]
    fn test_cache_expiry() {
        let cache = ProbeCache::new(0);
        cache.set("npm:lodash", taken("lodash"));
        assert!(cache.get("npm:lodash").is_none());
    }
}
