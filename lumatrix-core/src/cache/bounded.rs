//! Generic fixed-capacity FIFO cache

use heapless::Vec;

/// Read-only cache statistics snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CacheStats {
    /// Entries currently held
    pub len: usize,
    /// Capacity the cache was built with
    pub capacity: usize,
    /// Lookups answered from the cache
    pub hits: u32,
    /// Lookups that invoked the loader, including failed loads
    pub misses: u32,
}

impl CacheStats {
    /// Hit rate in whole percent; 0 before any lookup
    pub fn hit_rate_pct(&self) -> u32 {
        let total = self.hits + self.misses;
        if total == 0 {
            0
        } else {
            self.hits * 100 / total
        }
    }
}

struct Slot<K, V> {
    key: K,
    value: V,
}

/// Fixed-capacity cache with first-in-first-out eviction
///
/// Slots are kept oldest-first. A lookup hit does not reorder them and an
/// overwrite does not refresh an entry's position, so the entry evicted on
/// overflow is always the oldest surviving insert. Capacity `N` must be at
/// least 1.
pub struct BoundedCache<K, V, const N: usize> {
    slots: Vec<Slot<K, V>, N>,
    hits: u32,
    misses: u32,
}

impl<K: PartialEq, V, const N: usize> BoundedCache<K, V, N> {
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            hits: 0,
            misses: 0,
        }
    }

    fn position(&self, key: &K) -> Option<usize> {
        self.slots.iter().position(|s| s.key == *key)
    }

    /// Look up `key`, invoking `loader` on a miss.
    ///
    /// A loader error propagates and nothing is cached; the attempt still
    /// counts as a miss because a lookup happened.
    pub fn get_or_load<E, F>(&mut self, key: K, loader: F) -> Result<&V, E>
    where
        F: FnOnce(&K) -> Result<V, E>,
    {
        if let Some(pos) = self.position(&key) {
            self.hits = self.hits.saturating_add(1);
            return Ok(&self.slots[pos].value);
        }
        self.misses = self.misses.saturating_add(1);
        let value = loader(&key)?;
        let pos = self.push_slot(key, value);
        Ok(&self.slots[pos].value)
    }

    /// Infallible variant for loaders that cannot fail
    pub fn get_or_insert_with<F>(&mut self, key: K, f: F) -> &V
    where
        F: FnOnce(&K) -> V,
    {
        if let Some(pos) = self.position(&key) {
            self.hits = self.hits.saturating_add(1);
            return &self.slots[pos].value;
        }
        self.misses = self.misses.saturating_add(1);
        let value = f(&key);
        let pos = self.push_slot(key, value);
        &self.slots[pos].value
    }

    /// Insert or overwrite without counting a lookup.
    ///
    /// Overwriting an existing key replaces the value in place; the entry
    /// keeps its original eviction position.
    pub fn insert(&mut self, key: K, value: V) {
        if let Some(pos) = self.position(&key) {
            self.slots[pos].value = value;
            return;
        }
        self.push_slot(key, value);
    }

    fn push_slot(&mut self, key: K, value: V) -> usize {
        if self.slots.is_full() {
            // Oldest insert lives at the front
            self.slots.remove(0);
        }
        let _ = self.slots.push(Slot { key, value });
        self.slots.len() - 1
    }

    /// Whether `key` is cached; does not touch the counters
    pub fn contains(&self, key: &K) -> bool {
        self.position(key).is_some()
    }

    /// Drop every entry. Hit/miss counters are kept.
    pub fn clear(&mut self) {
        self.slots.clear();
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Keys in eviction order, oldest first
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.slots.iter().map(|s| &s.key)
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            len: self.slots.len(),
            capacity: N,
            hits: self.hits,
            misses: self.misses,
        }
    }
}

impl<K: PartialEq, V, const N: usize> Default for BoundedCache<K, V, N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::vec::Vec as StdVec;

    #[test]
    fn test_hit_returns_cached_value_without_loading() {
        let mut cache: BoundedCache<u8, u16, 4> = BoundedCache::new();
        let mut loads = 0;

        let v = *cache
            .get_or_load::<(), _>(7, |_| {
                loads += 1;
                Ok(70)
            })
            .unwrap();
        assert_eq!(v, 70);

        let v = *cache
            .get_or_load::<(), _>(7, |_| {
                loads += 1;
                Ok(99)
            })
            .unwrap();
        assert_eq!(v, 70);
        assert_eq!(loads, 1);

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
    }

    #[test]
    fn test_eviction_is_fifo_not_lru() {
        let mut cache: BoundedCache<u8, u8, 3> = BoundedCache::new();
        for k in [1, 2, 3] {
            cache.get_or_load::<(), _>(k, |&k| Ok(k)).unwrap();
        }

        // A hit on the oldest entry does not protect it
        cache.get_or_load::<(), _>(1, |&k| Ok(k)).unwrap();
        cache.get_or_load::<(), _>(4, |&k| Ok(k)).unwrap();

        assert!(!cache.contains(&1));
        assert!(cache.contains(&2));
        assert!(cache.contains(&3));
        assert!(cache.contains(&4));
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn test_loader_failure_is_not_cached() {
        let mut cache: BoundedCache<u8, u8, 3> = BoundedCache::new();

        let result = cache.get_or_load(1, |_| Err("missing"));
        assert_eq!(result.err(), Some("missing"));
        assert!(cache.is_empty());

        // A failed attempt still counted as a miss
        assert_eq!(cache.stats().misses, 1);

        // The next attempt may succeed and gets cached normally
        cache.get_or_load::<(), _>(1, |_| Ok(11)).unwrap();
        assert!(cache.contains(&1));
        assert_eq!(cache.stats().misses, 2);
    }

    #[test]
    fn test_clear_keeps_counters() {
        let mut cache: BoundedCache<u8, u8, 3> = BoundedCache::new();
        cache.get_or_load::<(), _>(1, |&k| Ok(k)).unwrap();
        cache.get_or_load::<(), _>(1, |&k| Ok(k)).unwrap();

        cache.clear();
        assert!(cache.is_empty());

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
    }

    #[test]
    fn test_hit_rate() {
        let mut cache: BoundedCache<u8, u8, 3> = BoundedCache::new();
        assert_eq!(cache.stats().hit_rate_pct(), 0);

        cache.get_or_load::<(), _>(1, |&k| Ok(k)).unwrap();
        cache.get_or_load::<(), _>(1, |&k| Ok(k)).unwrap();
        assert_eq!(cache.stats().hit_rate_pct(), 50);
    }

    #[test]
    fn test_overwrite_keeps_eviction_position() {
        let mut cache: BoundedCache<u8, u8, 2> = BoundedCache::new();
        cache.insert(1, 10);
        cache.insert(2, 20);

        // Overwriting key 1 must not make it the newest entry
        cache.insert(1, 11);
        assert_eq!(*cache.get_or_load::<(), _>(1, |_| Ok(0)).unwrap(), 11);

        cache.insert(3, 30);
        assert!(!cache.contains(&1));
        assert!(cache.contains(&2));
        assert!(cache.contains(&3));
    }

    #[test]
    fn test_get_or_insert_with() {
        let mut cache: BoundedCache<u8, u16, 2> = BoundedCache::new();
        assert_eq!(*cache.get_or_insert_with(5, |&k| k as u16 * 4), 20);
        assert_eq!(*cache.get_or_insert_with(5, |_| 999), 20);
        assert_eq!(cache.stats().hits, 1);
        assert_eq!(cache.stats().misses, 1);
    }

    proptest! {
        #[test]
        fn prop_size_never_exceeds_capacity(keys in proptest::collection::vec(0u8..20, 0..200)) {
            let mut cache: BoundedCache<u8, u8, 4> = BoundedCache::new();
            for k in keys {
                cache.get_or_load::<(), _>(k, |&k| Ok(k)).unwrap();
                prop_assert!(cache.len() <= 4);
            }
        }

        #[test]
        fn prop_eviction_matches_fifo_model(keys in proptest::collection::vec(0u8..12, 0..150)) {
            let mut cache: BoundedCache<u8, u8, 4> = BoundedCache::new();
            let mut model: StdVec<u8> = StdVec::new();

            for k in keys {
                cache.get_or_load::<(), _>(k, |&k| Ok(k)).unwrap();
                if !model.contains(&k) {
                    if model.len() == 4 {
                        model.remove(0);
                    }
                    model.push(k);
                }
                let held: StdVec<u8> = cache.keys().copied().collect();
                prop_assert_eq!(held, model.clone());
            }
        }
    }
}
