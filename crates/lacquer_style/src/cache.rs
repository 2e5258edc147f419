//! Bounded resolution cache
//!
//! Fixed-capacity LRU keyed by context hash, partitioned by theme
//! revision. The theme is a single global instance with a monotonic
//! revision, so a departed revision never comes back; the partition is
//! dropped wholesale the first time a newer revision is seen.

use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

use lru::LruCache;

use crate::styled::Resolved;

/// Default cache capacity per styled wrapper
pub const DEFAULT_CACHE_CAPACITY: usize = 300;

/// Per-wrapper resolution cache. Interior locking keeps shared wrappers
/// `Send + Sync`; eviction is purely capacity-driven (no expiry by time).
pub(crate) struct ResolveCache {
    inner: Mutex<Partition>,
}

struct Partition {
    revision: u64,
    entries: LruCache<String, Arc<Resolved>>,
}

impl ResolveCache {
    pub(crate) fn new(capacity: usize) -> ResolveCache {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        ResolveCache {
            inner: Mutex::new(Partition {
                revision: 0,
                entries: LruCache::new(capacity),
            }),
        }
    }

    /// Cached resolution for `key` under `revision`, promoted to
    /// most-recently-used on hit
    pub(crate) fn get(&self, revision: u64, key: &str) -> Option<Arc<Resolved>> {
        let mut partition = self.inner.lock().unwrap();
        if partition.revision != revision {
            return None;
        }
        partition.entries.get(key).cloned()
    }

    /// Insert a resolution, rotating the partition when the revision moved;
    /// at capacity the single least-recently-used entry is evicted first
    pub(crate) fn insert(&self, revision: u64, key: String, resolved: Arc<Resolved>) {
        let mut partition = self.inner.lock().unwrap();
        if partition.revision != revision {
            tracing::trace!(
                from = partition.revision,
                to = revision,
                "rotating resolution cache partition"
            );
            partition.entries.clear();
            partition.revision = revision;
        }
        partition.entries.put(key, resolved);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Style;

    fn entry() -> Arc<Resolved> {
        Arc::new(Resolved {
            style: Style::new(),
            attrs: Default::default(),
            node_ref: None,
        })
    }

    #[test]
    fn test_lru_eviction_order() {
        let cache = ResolveCache::new(2);
        cache.insert(0, "a".into(), entry());
        cache.insert(0, "b".into(), entry());
        cache.insert(0, "c".into(), entry());

        // Capacity 2: inserting c evicted the oldest entry, a.
        assert!(cache.get(0, "a").is_none());
        assert!(cache.get(0, "c").is_some());

        // Touching b promotes it, so inserting d evicts c, not b.
        assert!(cache.get(0, "b").is_some());
        cache.insert(0, "d".into(), entry());

        assert!(cache.get(0, "c").is_none());
        assert!(cache.get(0, "b").is_some());
        assert!(cache.get(0, "d").is_some());
    }

    #[test]
    fn test_revision_rotates_the_partition() {
        let cache = ResolveCache::new(8);
        cache.insert(1, "k".into(), entry());
        assert!(cache.get(1, "k").is_some());

        // A lookup under a newer revision misses without disturbing anything.
        assert!(cache.get(2, "k").is_none());

        // The first insert under the newer revision drops the old partition.
        cache.insert(2, "k2".into(), entry());
        assert!(cache.get(2, "k2").is_some());
        assert!(cache.get(1, "k").is_none());
    }

    #[test]
    fn test_overwrite_promotes() {
        let cache = ResolveCache::new(2);
        cache.insert(0, "a".into(), entry());
        cache.insert(0, "b".into(), entry());
        // Overwriting a promotes it, so inserting c evicts b.
        cache.insert(0, "a".into(), entry());
        cache.insert(0, "c".into(), entry());

        assert!(cache.get(0, "a").is_some());
        assert!(cache.get(0, "b").is_none());
    }
}
