#![cfg(feature = "cache")]

use crate::ThumbnailCandidate;
use dashmap::DashMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::num::NonZeroUsize;
use std::sync::Arc;

#[derive(Clone)]
struct CachedThumbnail {
    fingerprint: u64,
    candidate: ThumbnailCandidate,
}

/// Extracted thumbnails keyed by post slug.
///
/// Each entry remembers a fingerprint of the content it was extracted from,
/// so an edited post misses and gets extracted again.
#[derive(Clone)]
pub struct ThumbnailCache {
    cache: Arc<DashMap<String, CachedThumbnail>>,
    capacity: usize,
}

fn fingerprint(content: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    hasher.finish()
}

impl ThumbnailCache {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).map_or(100, NonZeroUsize::get);
        Self {
            cache: Arc::new(DashMap::with_capacity(capacity)),
            capacity,
        }
    }

    /// Cached candidate for `key`, if it was extracted from this exact `content`.
    pub fn get(&self, key: &str, content: &str) -> Option<ThumbnailCandidate> {
        let entry = self.cache.get(key)?;
        (entry.fingerprint == fingerprint(content)).then(|| entry.candidate.clone())
    }

    /// Stores a candidate, replacing any entry for `key`. Once full, new keys
    /// are dropped rather than evicting.
    pub fn set(&self, key: String, content: &str, value: ThumbnailCandidate) {
        if self.cache.len() >= self.capacity && !self.cache.contains_key(&key) {
            return;
        }
        self.cache.insert(
            key,
            CachedThumbnail {
                fingerprint: fingerprint(content),
                candidate: value,
            },
        );
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    pub fn clear(&self) {
        self.cache.clear();
    }
}
