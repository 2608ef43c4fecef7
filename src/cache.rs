//! Cache for analysis results
//!
//! Keyed by survey id plus the content hash of the response set, so a
//! changed snapshot never serves a stale analysis. Inserting a new hash for a
//! survey drops every older entry for that survey.

use crate::config::CacheConfig;
use crate::survey::ContentHash;
use crate::types::SurveyId;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::RwLock;
use std::time::{Duration, Instant};
use tracing::debug;

/// Cache key
pub type AnalysisKey = (SurveyId, ContentHash);

/// Cached value with its insertion time
#[derive(Debug, Clone)]
pub struct CachedResult<T> {
    pub data: T,
    pub cached_at: Instant,
}

impl<T> CachedResult<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            cached_at: Instant::now(),
        }
    }

    /// Check if this result is still valid given TTL
    pub fn is_valid(&self, ttl: Duration) -> bool {
        self.cached_at.elapsed() < ttl
    }
}

/// LRU cache of analysis results
pub struct AnalysisCache<T> {
    cache: RwLock<LruCache<AnalysisKey, CachedResult<T>>>,
    ttl: Duration,
}

impl<T: Clone> AnalysisCache<T> {
    pub fn new(capacity: usize, ttl_seconds: u64) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: RwLock::new(LruCache::new(capacity)),
            ttl: Duration::from_secs(ttl_seconds),
        }
    }

    /// `None` when caching is disabled
    pub fn from_config(config: &CacheConfig) -> Option<Self> {
        config
            .enabled
            .then(|| Self::new(config.capacity, config.ttl_secs))
    }

    /// Get a live entry; expired entries are dropped on access
    pub fn get(&self, survey_id: &SurveyId, hash: &ContentHash) -> Option<T> {
        let key = (survey_id.clone(), hash.clone());
        let mut cache = self.cache.write().ok()?;

        let live = cache.get(&key).map(|entry| entry.is_valid(self.ttl))?;
        if !live {
            debug!("Analysis cache entry expired for survey {}", survey_id);
            cache.pop(&key);
            return None;
        }

        debug!("Analysis cache hit for survey {}", survey_id);
        cache.get(&key).map(|entry| entry.data.clone())
    }

    /// Insert, invalidating entries of the same survey with another hash
    pub fn insert(&self, survey_id: SurveyId, hash: ContentHash, data: T) {
        let Ok(mut cache) = self.cache.write() else {
            return;
        };

        let stale: Vec<AnalysisKey> = cache
            .iter()
            .filter(|((id, h), _)| *id == survey_id && *h != hash)
            .map(|(key, _)| key.clone())
            .collect();
        for key in &stale {
            cache.pop(key);
        }
        if !stale.is_empty() {
            debug!(
                "Invalidated {} cached analyses for survey {}",
                stale.len(),
                survey_id
            );
        }

        cache.put((survey_id, hash), CachedResult::new(data));
    }

    pub fn len(&self) -> usize {
        self.cache.read().map(|cache| cache.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(survey: &str, hash: &str) -> (SurveyId, ContentHash) {
        (SurveyId::new(survey), ContentHash(hash.to_string()))
    }

    #[test]
    fn test_hit_and_miss() {
        let cache = AnalysisCache::new(4, 600);
        let (survey, hash) = key("DASHBOARD_GENERAL", "aa");
        assert!(cache.get(&survey, &hash).is_none());

        cache.insert(survey.clone(), hash.clone(), 42);
        assert_eq!(cache.get(&survey, &hash), Some(42));
        assert!(cache.get(&survey, &ContentHash("bb".to_string())).is_none());
    }

    #[test]
    fn test_new_hash_invalidates_same_survey_only() {
        let cache = AnalysisCache::new(4, 600);
        let (a, a1) = key("A", "1");
        let (b, b1) = key("B", "1");
        cache.insert(a.clone(), a1.clone(), "a-old");
        cache.insert(b.clone(), b1.clone(), "b");

        let a2 = ContentHash("2".to_string());
        cache.insert(a.clone(), a2.clone(), "a-new");

        assert!(cache.get(&a, &a1).is_none());
        assert_eq!(cache.get(&a, &a2), Some("a-new"));
        assert_eq!(cache.get(&b, &b1), Some("b"));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_expired_entries_are_dropped() {
        let cache = AnalysisCache::new(4, 0);
        let (survey, hash) = key("A", "1");
        cache.insert(survey.clone(), hash.clone(), 1);
        assert!(cache.get(&survey, &hash).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_capacity_evicts_least_recent() {
        let cache = AnalysisCache::new(1, 600);
        let (a, a1) = key("A", "1");
        let (b, b1) = key("B", "1");
        cache.insert(a.clone(), a1.clone(), 1);
        cache.insert(b.clone(), b1.clone(), 2);
        assert!(cache.get(&a, &a1).is_none());
        assert_eq!(cache.get(&b, &b1), Some(2));
    }

    #[test]
    fn test_disabled_config_builds_no_cache() {
        let config = CacheConfig {
            enabled: false,
            ..Default::default()
        };
        assert!(AnalysisCache::<u8>::from_config(&config).is_none());
        assert!(AnalysisCache::<u8>::from_config(&CacheConfig::default()).is_some());
    }
}
