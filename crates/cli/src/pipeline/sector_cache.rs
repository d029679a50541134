//! Sector results cached by full lap-pair identity.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use contracts::{SectorKey, SectorResult};

/// Memo of sector comparisons.
///
/// Keyed by `(hero, hero lap, rival, rival lap)`; a changed key is always a
/// fresh computation.
#[derive(Debug, Default)]
pub struct SectorCache {
    entries: HashMap<SectorKey, Option<Vec<SectorResult>>>,
    hits: u64,
    misses: u64,
}

impl SectorCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached result for `key`, computing it on first use
    pub fn get_or_compute<F>(&mut self, key: SectorKey, compute: F) -> Option<&[SectorResult]>
    where
        F: FnOnce() -> Option<Vec<SectorResult>>,
    {
        let slot = match self.entries.entry(key) {
            Entry::Occupied(entry) => {
                self.hits += 1;
                entry.into_mut()
            }
            Entry::Vacant(entry) => {
                self.misses += 1;
                entry.insert(compute())
            }
        };
        slot.as_deref()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}
