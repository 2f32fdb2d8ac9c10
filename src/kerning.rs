//! Memoizing cache for pairwise kerning lookups.

use std::collections::HashMap;

use parking_lot::RwLock;

/// Per font-source memo table for kerning adjustments.
///
/// Keys pack the ordered glyph-id pair into one integer; values are the
/// unscaled adjustment in font units, which is size-independent. The
/// pixel-space scale factor is applied after cache retrieval, never before
/// caching, so one entry serves every font size.
///
/// Reads of populated entries only take the read lock; concurrent layout
/// passes sharing one font source serialize on the write lock during the
/// insert path. Entries are never evicted; the cache lives as long as the
/// owning [`crate::face::FontFace`].
pub struct KerningCache {
    map: RwLock<HashMap<u64, i32, fxhash::FxBuildHasher>>,
}

impl Default for KerningCache {
    fn default() -> Self {
        Self::new()
    }
}

impl KerningCache {
    pub fn new() -> Self {
        Self {
            map: RwLock::new(HashMap::with_hasher(fxhash::FxBuildHasher::default())),
        }
    }

    fn key(left: u16, right: u16) -> u64 {
        (u64::from(left) << 32) | u64::from(right)
    }

    /// Returns the pixel-scaled kerning between `left` and `right`.
    ///
    /// `fetch` supplies the unscaled font-unit value on a cache miss and is
    /// called at most once per glyph pair. Safe to recompute after a lost
    /// insert race; the fetched value is idempotent.
    pub fn lookup(&self, left: u16, right: u16, scale: f32, fetch: impl FnOnce() -> i32) -> i32 {
        let key = Self::key(left, right);
        if let Some(units) = self.map.read().get(&key) {
            return (*units as f32 * scale) as i32;
        }

        let units = *self.map.write().entry(key).or_insert_with(fetch);
        (units as f32 * scale) as i32
    }

    /// Number of cached glyph pairs.
    ///
    /// Introspection only, for diagnostics and tests; the cache never
    /// needs to be sized by callers.
    pub fn len(&self) -> usize {
        self.map.read().len()
    }

    /// Introspection only; see [`Self::len`].
    pub fn is_empty(&self) -> bool {
        self.map.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn second_lookup_does_not_refetch() {
        let cache = KerningCache::new();
        let fetches = Cell::new(0u32);

        let fetch = || {
            fetches.set(fetches.get() + 1);
            -2
        };

        let first = cache.lookup(1, 2, 1.0, fetch);
        let second = cache.lookup(1, 2, 1.0, fetch);

        assert_eq!(first, -2);
        assert_eq!(second, first);
        assert_eq!(fetches.get(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn scale_is_applied_after_retrieval() {
        let cache = KerningCache::new();
        let fetches = Cell::new(0u32);
        let fetch = || {
            fetches.set(fetches.get() + 1);
            -4
        };

        assert_eq!(cache.lookup(3, 7, 1.0, fetch), -4);
        // same cached entry serves a different size
        assert_eq!(cache.lookup(3, 7, 0.5, fetch), -2);
        assert_eq!(fetches.get(), 1);
    }

    #[test]
    fn pair_order_is_significant() {
        let cache = KerningCache::new();
        assert_eq!(cache.lookup(1, 2, 1.0, || -2), -2);
        assert_eq!(cache.lookup(2, 1, 1.0, || 5), 5);
        assert_eq!(cache.len(), 2);
    }
}
