//! Memoized vector spaces.

use std::fmt;
use std::num::NonZeroUsize;

use lru::LruCache;
use verso_core::text::Tokenizer;

use crate::vector::VectorSpace;

/// Spaces kept by [`SpaceCache::new`].
pub const DEFAULT_SPACE_CAPACITY: usize = 256;

/// Vector spaces keyed by their full ordered batch.
///
/// A lookup hits only for the same documents in the same order, so a cached
/// space is exactly the one [`VectorSpace::build`] would return. One cache
/// must only ever see one tokenizer. At most `capacity` spaces are kept; the
/// least recently used one is evicted first.
pub struct SpaceCache {
    spaces: LruCache<Vec<String>, VectorSpace>,
    hits: usize,
}

impl SpaceCache {
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_SPACE_CAPACITY)
    }

    /// A cache holding at most `capacity` spaces; zero is treated as one.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            spaces: LruCache::new(capacity),
            hits: 0,
        }
    }

    /// The space for `documents`, building it on first use.
    pub fn get_or_build<S: AsRef<str>>(
        &mut self,
        documents: &[S],
        tokenizer: &dyn Tokenizer,
    ) -> &VectorSpace {
        let key: Vec<String> = documents.iter().map(|d| d.as_ref().to_string()).collect();
        if self.spaces.contains(&key) {
            self.hits += 1;
        }
        self.spaces
            .get_or_insert(key, || VectorSpace::build(documents, tokenizer))
    }

    /// Lookups answered without building.
    #[must_use]
    pub fn hits(&self) -> usize {
        self.hits
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.spaces.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spaces.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.spaces.cap().get()
    }

    pub fn clear(&mut self) {
        self.spaces.clear();
        self.hits = 0;
    }
}

impl Default for SpaceCache {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SpaceCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpaceCache")
            .field("len", &self.spaces.len())
            .field("capacity", &self.capacity())
            .field("hits", &self.hits)
            .finish()
    }
}
