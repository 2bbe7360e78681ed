use std::num::NonZeroUsize;

use lru::LruCache;
use parking_lot::RwLock;
use xxhash_rust::xxh3::xxh3_64;

use crate::models::MediaItem;

/// Maximum number of cached column assignments to keep in memory.
const MAX_CACHE_ENTRIES: usize = 8;

/// Key for the layout cache, combining column count and list hash.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
struct CacheKey {
    columns: usize,
    list_hash: u64,
}

#[derive(Debug, Clone)]
struct CachedAssignment {
    /// Item indices per column
    columns: Vec<Vec<usize>>,
    /// Number of items this assignment was computed for
    item_count: usize,
}

/// Cache of masonry column assignments.
///
/// Assignments do not depend on the viewport width, only on the column count
/// and the ordered list of (handle, aspect ratio), so a resize that keeps the
/// column count, or a switch back to a masonry mode, is a cache hit.
pub struct LayoutCache {
    cache: RwLock<LruCache<CacheKey, CachedAssignment>>,
}

impl LayoutCache {
    /// Creates a new empty layout cache.
    pub fn new() -> Self {
        Self::with_capacity(MAX_CACHE_ENTRIES)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: RwLock::new(LruCache::new(capacity)),
        }
    }

    /// Computes a fast hash of the media item list.
    /// The hash covers handle and aspect ratio of each item in order, so adding,
    /// removing, reordering or re-measuring any item invalidates the entry.
    pub fn compute_list_hash(items: &[MediaItem]) -> u64 {
        let mut hasher_input = Vec::with_capacity(items.len() * 64);

        for item in items {
            hasher_input.extend_from_slice(item.handle.as_str().as_bytes());
            hasher_input.push(0);
            let aspect_bits = item.aspect_ratio.map(f32::to_bits).unwrap_or(u32::MAX);
            hasher_input.extend_from_slice(&aspect_bits.to_le_bytes());
        }

        xxh3_64(&hasher_input)
    }

    /// Returns the cached assignment, or `None` on a miss.
    pub fn get(&self, columns: usize, list_hash: u64, item_count: usize) -> Option<Vec<Vec<usize>>> {
        let key = CacheKey { columns, list_hash };

        let mut cache = self.cache.write();
        let entry = cache.get(&key)?;
        if entry.item_count != item_count {
            return None;
        }
        Some(entry.columns.clone())
    }

    /// Stores an assignment, evicting the least recently used entry when full.
    pub fn set(&self, columns: usize, list_hash: u64, assignment: Vec<Vec<usize>>, item_count: usize) {
        let key = CacheKey { columns, list_hash };
        let entry = CachedAssignment {
            columns: assignment,
            item_count,
        };
        self.cache.write().put(key, entry);
    }

    /// Clears the entire cache.
    pub fn clear(&self) {
        self.cache.write().clear();
    }

    /// Returns the number of cached assignments.
    pub fn len(&self) -> usize {
        self.cache.read().len()
    }

    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.cache.read().is_empty()
    }
}

impl Default for LayoutCache {
    fn default() -> Self {
        Self::new()
    }
}
