//! Request-scoped lookup cache and its statistics.
//!
//! One cache exists per request scope. It is created when the scope begins
//! and dropped with it; nothing here is shared between requests.

use super::TranslationMap;
use crate::catalog::{ItemId, ItemKind};
use serde::Serialize;
use std::collections::HashMap;

/// Translation maps already built in this request, keyed by the resolved
/// (kind, id) they were built for.
#[derive(Debug, Default)]
pub struct RequestCache {
    maps: HashMap<(ItemKind, ItemId), TranslationMap>,
    canonical: HashMap<ItemId, Option<ItemId>>,
    hits: usize,
    misses: usize,
}

impl RequestCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a built map, recording a hit or miss.
    pub fn get_map(&mut self, kind: ItemKind, id: ItemId) -> Option<TranslationMap> {
        match self.maps.get(&(kind, id)) {
            Some(map) => {
                self.hits += 1;
                Some(map.clone())
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    pub fn put_map(&mut self, kind: ItemKind, id: ItemId, map: TranslationMap) {
        self.maps.insert((kind, id), map);
    }

    /// Look up a variant's canonical item. The outer `Option` is the cache
    /// lookup; the inner one is the store's answer, which may be "none".
    pub fn get_canonical(&mut self, variant: ItemId) -> Option<Option<ItemId>> {
        match self.canonical.get(&variant) {
            Some(base) => {
                self.hits += 1;
                Some(*base)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    pub fn put_canonical(&mut self, variant: ItemId, base: Option<ItemId>) {
        self.canonical.insert(variant, base);
    }

    /// Summarize hit and miss counts.
    pub fn report(&self) -> CacheReport {
        let total = self.hits + self.misses;
        let hit_rate = if total > 0 {
            (self.hits as f64 / total as f64) * 100.0
        } else {
            0.0
        };

        CacheReport {
            hits: self.hits,
            misses: self.misses,
            hit_rate,
        }
    }
}

/// Cache statistics for one request.
#[derive(Debug, Clone, Serialize)]
pub struct CacheReport {
    pub hits: usize,
    pub misses: usize,
    /// Percentage of lookups served from the cache
    pub hit_rate: f64,
}

impl std::fmt::Display for CacheReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} hits, {} misses ({:.1}% hit rate)",
            self.hits, self.misses, self.hit_rate
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translation::Projection;

    fn sample_map() -> TranslationMap {
        let mut map = TranslationMap::new();
        map.insert(
            "en",
            Projection {
                id: 1,
                name: "One".to_string(),
                slug: "one".to_string(),
            },
        );
        map
    }

    // ==================== Map Cache Tests ====================

    #[test]
    fn test_miss_then_hit() {
        let mut cache = RequestCache::new();
        assert!(cache.get_map(ItemKind::Product, 1).is_none());
        cache.put_map(ItemKind::Product, 1, sample_map());
        assert_eq!(cache.get_map(ItemKind::Product, 1), Some(sample_map()));

        let report = cache.report();
        assert_eq!(report.hits, 1);
        assert_eq!(report.misses, 1);
        assert!((report.hit_rate - 50.0).abs() < 0.01);
    }

    #[test]
    fn test_keyed_by_kind() {
        let mut cache = RequestCache::new();
        cache.put_map(ItemKind::Product, 1, sample_map());
        assert!(cache
            .get_map(ItemKind::Term(crate::catalog::Taxonomy::Category), 1)
            .is_none());
    }

    // ==================== Canonical Cache Tests ====================

    #[test]
    fn test_canonical_caches_negative_answers() {
        let mut cache = RequestCache::new();
        assert_eq!(cache.get_canonical(501), None);
        cache.put_canonical(501, None);
        assert_eq!(cache.get_canonical(501), Some(None));
        cache.put_canonical(502, Some(500));
        assert_eq!(cache.get_canonical(502), Some(Some(500)));
    }

    // ==================== Report Tests ====================

    #[test]
    fn test_empty_report() {
        let report = RequestCache::new().report();
        assert_eq!(report.hits, 0);
        assert_eq!(report.misses, 0);
        assert_eq!(report.hit_rate, 0.0);
    }

    #[test]
    fn test_report_display() {
        let mut cache = RequestCache::new();
        cache.get_map(ItemKind::Product, 1);
        assert_eq!(cache.report().to_string(), "0 hits, 1 misses (0.0% hit rate)");
    }

    #[test]
    fn test_separate_caches_are_independent() {
        let mut first = RequestCache::new();
        let mut second = RequestCache::new();
        first.put_map(ItemKind::Product, 1, sample_map());
        assert!(second.get_map(ItemKind::Product, 1).is_none());
    }
}
