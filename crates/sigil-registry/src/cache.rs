//! Single-assignment cache of canonical keys.
//!
//! Canonicalization is deterministic, so two threads computing the key for
//! the same source always agree. The cache computes outside the lock and
//! keeps whichever insert lands first; later callers get that stored key.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, PoisonError, RwLock};

use sigil_canonical::{Canonicalizer, SigilKey};
use tracing::trace;

/// Caches canonical keys by source identity.
///
/// `K` identifies where the points came from, e.g. a pattern id. Invalid
/// sigils are never cached, so a corrected source is canonicalized again on
/// the next call.
#[derive(Debug)]
pub struct KeyCache<K> {
    canonicalizer: Canonicalizer,
    entries: RwLock<HashMap<K, Arc<SigilKey>>>,
}

impl<K: Eq + Hash> KeyCache<K> {
    /// Creates an empty cache on the default grid.
    pub fn new() -> Self {
        Self::with_canonicalizer(Canonicalizer::default())
    }

    /// Creates an empty cache that canonicalizes with `canonicalizer`.
    pub fn with_canonicalizer(canonicalizer: Canonicalizer) -> Self {
        Self {
            canonicalizer,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Cached key for `source`, if any.
    pub fn get(&self, source: &K) -> Option<Arc<SigilKey>> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(source)
            .cloned()
    }

    /// Returns the cached key for `source`, canonicalizing `points` on a miss.
    ///
    /// Returns `None`, and caches nothing, when `points` is not a valid sigil.
    pub fn get_or_canonicalize(&self, source: K, points: &[u8]) -> Option<Arc<SigilKey>> {
        if let Some(key) = self.get(&source) {
            return Some(key);
        }

        let computed = Arc::new(self.canonicalizer.canonicalize(points)?);
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let stored = entries.entry(source).or_insert_with(|| {
            trace!(key = %computed, "caching sigil key");
            Arc::clone(&computed)
        });
        Some(Arc::clone(stored))
    }

    /// Drops the cached key for `source`, e.g. after its points changed.
    pub fn invalidate(&self, source: &K) -> Option<Arc<SigilKey>> {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(source)
    }

    /// Number of cached keys.
    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Returns true if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every cached key.
    pub fn clear(&self) {
        self.entries.write().unwrap_or_else(PoisonError::into_inner).clear();
    }
}

impl<K: Eq + Hash> Default for KeyCache<K> {
    fn default() -> Self {
        Self::new()
    }
}
