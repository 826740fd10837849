pub mod hash;
pub mod store;

use crate::error::Result;
use crate::raster::bitmap::Bitmap;
use crate::trace::vectorizer::Vectorizer;
use hash::compute_cache_key;
use store::CacheStore;

/// Wraps a [`Vectorizer`] and reuses its output for glyph crops it has
/// already traced.
pub struct CachingVectorizer<V> {
    inner: V,
    store: CacheStore,
}

impl<V: Vectorizer> CachingVectorizer<V> {
    pub fn new(inner: V, store: CacheStore) -> Self {
        Self { inner, store }
    }

    pub fn inner(&self) -> &V {
        &self.inner
    }
}

impl<V: Vectorizer> Vectorizer for CachingVectorizer<V> {
    fn identity(&self) -> String {
        self.inner.identity()
    }

    fn vectorize(&self, glyph: &Bitmap) -> Result<Vec<String>> {
        let identity = self.inner.identity();
        let key = compute_cache_key(glyph, &identity);

        if let Some(lines) = self.store.retrieve(&key, &identity)? {
            return Ok(lines);
        }

        let lines = self.inner.vectorize(glyph)?;
        self.store.store(&key, &identity, &lines)?;
        Ok(lines)
    }
}
