//! Root cache for rational sample abscissae.
//!
//! Solving `f(x0, y) = 0` for a rational `x0` is the most repeated query of
//! an analysis: interval representatives, rational non-event lines and the
//! far samples used for asymptotes all need it. The cache keeps the most
//! recently used fibres and evicts the least recently used one when full.

use num_rational::BigRational;
use oxcurve_math::AlgebraicReal;
use rustc_hash::FxHashMap;
use std::collections::VecDeque;

/// Statistics for the root cache.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RootCacheStats {
    /// Cache hits.
    pub hits: u64,
    /// Cache misses.
    pub misses: u64,
    /// Cache evictions.
    pub evictions: u64,
}

impl RootCacheStats {
    /// Get hit rate (0.0 - 1.0).
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Bounded LRU map from a rational `x` to the sorted real roots over it.
#[derive(Debug, Clone)]
pub struct RootCache {
    /// Cached fibres.
    entries: FxHashMap<BigRational, Vec<AlgebraicReal>>,
    /// LRU queue (most recent at back).
    lru_queue: VecDeque<BigRational>,
    capacity: usize,
    stats: RootCacheStats,
}

impl RootCache {
    /// Create a cache holding at most `capacity` fibres.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: FxHashMap::default(),
            lru_queue: VecDeque::new(),
            capacity,
            stats: RootCacheStats::default(),
        }
    }

    /// Look up the fibre over `x`, marking it most recently used.
    pub fn get(&mut self, x: &BigRational) -> Option<Vec<AlgebraicReal>> {
        match self.entries.get(x) {
            Some(roots) => {
                self.stats.hits += 1;
                let roots = roots.clone();
                self.touch(x);
                Some(roots)
            }
            None => {
                self.stats.misses += 1;
                None
            }
        }
    }

    /// Store the fibre over `x`.
    pub fn insert(&mut self, x: BigRational, roots: Vec<AlgebraicReal>) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.contains_key(&x) {
            self.touch(&x);
        } else {
            if self.entries.len() >= self.capacity {
                self.evict_lru();
            }
            self.lru_queue.push_back(x.clone());
        }
        self.entries.insert(x, roots);
    }

    /// Return the cached fibre over `x`, computing and storing it on a miss.
    pub fn get_or_insert_with(
        &mut self,
        x: &BigRational,
        compute: impl FnOnce() -> Vec<AlgebraicReal>,
    ) -> Vec<AlgebraicReal> {
        if let Some(roots) = self.get(x) {
            return roots;
        }
        let roots = compute();
        self.insert(x.clone(), roots.clone());
        roots
    }

    fn touch(&mut self, x: &BigRational) {
        if let Some(pos) = self.lru_queue.iter().position(|k| k == x) {
            if let Some(key) = self.lru_queue.remove(pos) {
                self.lru_queue.push_back(key);
            }
        }
    }

    /// Evict the least-recently-used entry.
    fn evict_lru(&mut self) {
        if let Some(key) = self.lru_queue.pop_front() {
            self.entries.remove(&key);
            self.stats.evictions += 1;
        }
    }

    /// Get cache size.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of cached fibres.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Get statistics.
    pub fn stats(&self) -> RootCacheStats {
        self.stats
    }

    /// Drop every entry and reset the statistics.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.lru_queue.clear();
        self.stats = RootCacheStats::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;

    fn q(n: i64) -> BigRational {
        BigRational::from_integer(BigInt::from(n))
    }

    fn fibre(n: i64) -> Vec<AlgebraicReal> {
        vec![AlgebraicReal::from_integer(n)]
    }

    #[test]
    fn test_hits_and_misses() {
        let mut cache = RootCache::new(4);
        assert!(cache.get(&q(1)).is_none());
        cache.insert(q(1), fibre(1));
        assert_eq!(cache.get(&q(1)), Some(fibre(1)));
        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert!((stats.hit_rate() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_lru_eviction() {
        let mut cache = RootCache::new(2);
        cache.insert(q(1), fibre(1));
        cache.insert(q(2), fibre(2));
        // Touch 1 so that 2 becomes the eviction victim
        assert!(cache.get(&q(1)).is_some());
        cache.insert(q(3), fibre(3));
        assert_eq!(cache.len(), 2);
        assert!(cache.get(&q(2)).is_none());
        assert!(cache.get(&q(1)).is_some());
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn test_zero_capacity_disables_storage() {
        let mut cache = RootCache::new(0);
        let roots = cache.get_or_insert_with(&q(5), || fibre(5));
        assert_eq!(roots, fibre(5));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_get_or_insert_with_computes_once() {
        let mut cache = RootCache::new(2);
        let mut calls = 0;
        for _ in 0..3 {
            cache.get_or_insert_with(&q(7), || {
                calls += 1;
                fibre(7)
            });
        }
        assert_eq!(calls, 1);
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.stats(), RootCacheStats::default());
    }
}
