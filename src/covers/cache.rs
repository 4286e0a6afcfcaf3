//! In-memory cover cache shared across concurrent resolutions.
//!
//! The cache maps an identifier to its completed resolution result. Both
//! outcomes are remembered: a `Some(url)` hit and a `None` miss. Remembering
//! misses bounds retry storms against providers that keep failing for the
//! same identifier. Entries are never evicted; the cache lives and dies with
//! the resolver that owns it.

use dashmap::DashMap;

/// A cache used to skip provider queries for identifiers that have already
/// completed a resolution.
#[derive(Debug, Default)]
pub struct CoverCache {
    entries: DashMap<String, Option<String>>,
}

impl CoverCache {
    /// Creates a new, empty [`CoverCache`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a completed resolution result.
    ///
    /// The outer `Option` is the cache hit/miss; the inner `Option` is the
    /// remembered resolution result (URL or "no cover").
    #[must_use]
    pub fn lookup(&self, isbn: &str) -> Option<Option<String>> {
        self.entries.get(isbn).map(|entry| entry.value().clone())
    }

    /// Records a completed resolution result for `isbn`.
    pub fn insert(&self, isbn: &str, result: Option<String>) {
        self.entries.insert(isbn.to_string(), result);
    }

    /// Returns the number of cached identifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing has been cached yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
