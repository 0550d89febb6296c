//! Key to pattern lookup.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, PoisonError, RwLock};

use sigil_canonical::{encode_points, Canonicalizer, SigilKey, SigilPoint};
use tracing::{debug, info, warn};

use crate::error::RegistryError;
use crate::pattern::SigilPattern;

#[derive(Debug, Default)]
struct Entries {
    by_id: HashMap<String, Arc<SigilPattern>>,
    by_key: HashMap<SigilKey, Arc<SigilPattern>>,
}

impl Entries {
    /// Drops the key mapping for `pattern` if it still points at that pattern.
    fn unlink_key(&mut self, pattern: &SigilPattern) {
        let owned = self
            .by_key
            .get(pattern.sigil_key())
            .is_some_and(|current| current.id() == pattern.id());
        if owned {
            self.by_key.remove(pattern.sigil_key());
        }
    }
}

/// Resolves drawn sigils to the patterns they match.
///
/// Patterns are indexed by id and by canonical key. Two patterns with the
/// same shape share one key; the one inserted last wins the key mapping.
/// The registry is safe to share between threads.
#[derive(Debug, Default)]
pub struct SigilRegistry {
    canonicalizer: Canonicalizer,
    entries: RwLock<Entries>,
}

impl SigilRegistry {
    /// Creates an empty registry on the default grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty registry that canonicalizes lookups with `canonicalizer`.
    pub fn with_canonicalizer(canonicalizer: Canonicalizer) -> Self {
        Self {
            canonicalizer,
            entries: RwLock::default(),
        }
    }

    /// Canonicalizer used by [`SigilRegistry::lookup_points`].
    pub fn canonicalizer(&self) -> &Canonicalizer {
        &self.canonicalizer
    }

    /// Inserts a batch of patterns and returns how many were inserted.
    ///
    /// A pattern whose id is already registered replaces the old one. The
    /// batch is rejected as a whole if it names the same id twice.
    pub fn put_all<I>(&self, patterns: I) -> Result<usize, RegistryError>
    where
        I: IntoIterator<Item = SigilPattern>,
    {
        let patterns: Vec<SigilPattern> = patterns.into_iter().collect();

        let mut seen = HashSet::with_capacity(patterns.len());
        for pattern in &patterns {
            if !seen.insert(pattern.id()) {
                return Err(RegistryError::DuplicateId(pattern.id().to_string()));
            }
        }

        let count = patterns.len();
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        for pattern in patterns {
            let pattern = Arc::new(pattern);

            if let Some(previous) = entries
                .by_id
                .insert(pattern.id().to_string(), Arc::clone(&pattern))
            {
                debug!(id = pattern.id(), "replacing sigil pattern");
                entries.unlink_key(&previous);
            }

            if let Some(shadowed) = entries
                .by_key
                .insert(pattern.sigil_key().clone(), Arc::clone(&pattern))
            {
                if shadowed.id() != pattern.id() {
                    warn!(
                        key = %pattern.sigil_key(),
                        kept = pattern.id(),
                        shadowed = shadowed.id(),
                        "sigil patterns share a key"
                    );
                }
            }
        }
        info!(count, total = entries.by_id.len(), "sigil patterns registered");

        Ok(count)
    }

    /// Pattern registered under `key`.
    pub fn lookup(&self, key: &SigilKey) -> Option<Arc<SigilPattern>> {
        self.read().by_key.get(key).cloned()
    }

    /// Canonicalizes a drawing and returns the pattern it matches.
    ///
    /// Returns `None` when the drawing is invalid or matches nothing.
    pub fn lookup_points(&self, points: &[SigilPoint]) -> Option<Arc<SigilPattern>> {
        let key = self.canonicalizer.canonicalize(&encode_points(points))?;
        self.lookup(&key)
    }

    /// Pattern registered under `id`.
    pub fn get(&self, id: &str) -> Option<Arc<SigilPattern>> {
        self.read().by_id.get(id).cloned()
    }

    /// Removes the pattern registered under `id`.
    pub fn remove(&self, id: &str) -> Option<Arc<SigilPattern>> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let removed = entries.by_id.remove(id)?;
        entries.unlink_key(&removed);
        Some(removed)
    }

    /// Removes every pattern.
    pub fn clear(&self) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.by_id.clear();
        entries.by_key.clear();
    }

    /// Number of registered patterns.
    pub fn len(&self) -> usize {
        self.read().by_id.len()
    }

    /// Returns true if no pattern is registered.
    pub fn is_empty(&self) -> bool {
        self.read().by_id.is_empty()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Entries> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }
}
