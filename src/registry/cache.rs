//! Content-addressed cache keyed by [`ContentIdentity`].
//!
//! Every entry keeps the text and mode it was built from. A lookup whose
//! identity matches but whose source differs is a 32-bit hash collision; the
//! colliding source gets its own slot in the same bucket instead of silently
//! sharing the first entry.

use rustc_hash::FxHashMap;

use crate::svg::ContentIdentity;

struct Slot<T> {
    source: Box<str>,
    colorless: bool,
    value: T,
}

/// Read-through cache for one entry kind. Never evicts.
pub struct ContentCache<T> {
    buckets: FxHashMap<ContentIdentity, Vec<Slot<T>>>,
    len: usize,
}

impl<T> Default for ContentCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ContentCache<T> {
    pub fn new() -> Self {
        Self {
            buckets: FxHashMap::default(),
            len: 0,
        }
    }

    /// Entry built from exactly this (source, colorless) pair.
    pub fn get(&self, id: ContentIdentity, source: &str, colorless: bool) -> Option<&T> {
        self.buckets
            .get(&id)?
            .iter()
            .find(|slot| slot.colorless == colorless && &*slot.source == source)
            .map(|slot| &slot.value)
    }

    /// Slot index the next insert under `id` will occupy.
    ///
    /// Zero for a fresh identity; anything else means a collision.
    pub fn next_slot(&self, id: ContentIdentity) -> usize {
        self.buckets.get(&id).map_or(0, Vec::len)
    }

    pub fn insert(&mut self, id: ContentIdentity, source: &str, colorless: bool, value: T) -> &T {
        let bucket = self.buckets.entry(id).or_default();
        bucket.push(Slot {
            source: source.into(),
            colorless,
            value,
        });
        self.len += 1;
        &bucket[bucket.len() - 1].value
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_requires_same_source_and_mode() {
        let mut cache = ContentCache::new();
        let id = ContentIdentity::new(7);
        cache.insert(id, "<svg/>", true, 1);

        assert_eq!(cache.get(id, "<svg/>", true), Some(&1));
        assert_eq!(cache.get(id, "<svg/>", false), None);
        assert_eq!(cache.get(id, "<svg></svg>", true), None);
        assert_eq!(cache.get(ContentIdentity::new(8), "<svg/>", true), None);
    }

    #[test]
    fn test_collision_gets_own_slot() {
        let mut cache = ContentCache::new();
        let id = ContentIdentity::new(42);
        assert_eq!(cache.next_slot(id), 0);

        cache.insert(id, "a", true, "first");
        assert_eq!(cache.next_slot(id), 1);
        cache.insert(id, "b", true, "second");

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(id, "a", true), Some(&"first"));
        assert_eq!(cache.get(id, "b", true), Some(&"second"));
    }
}
