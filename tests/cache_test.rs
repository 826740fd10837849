// Phase 6: Cache integration tests
//
// Tests for cache key computation (hash.rs), the file-system cache store
// (store.rs) and the caching vectorizer wrapper.

use std::sync::atomic::{AtomicUsize, Ordering};

use glyphtracer::cache::CachingVectorizer;
use glyphtracer::cache::hash::compute_cache_key;
use glyphtracer::cache::store::CacheStore;
use glyphtracer::error::Result;
use glyphtracer::raster::bitmap::Bitmap;
use glyphtracer::trace::vectorizer::Vectorizer;
use tempfile::tempdir;

fn diagonal(size: u32) -> Bitmap {
    Bitmap::from_fn(size, size, |x, y| x == y).unwrap()
}

fn lines(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|s| s.to_string()).collect()
}

/// Counts how often the wrapped tool actually runs.
struct CountingVectorizer {
    identity: String,
    calls: AtomicUsize,
}

impl CountingVectorizer {
    fn new(identity: &str) -> Self {
        Self {
            identity: identity.to_string(),
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Vectorizer for CountingVectorizer {
    fn identity(&self) -> String {
        self.identity.clone()
    }

    fn vectorize(&self, glyph: &Bitmap) -> Result<Vec<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(vec![
            "0 0 moveto".to_string(),
            format!("{} 0 rlineto", glyph.width()),
            format!("-{} 0 rlineto", glyph.width()),
            "closepath".to_string(),
        ])
    }
}

// ---- hash.rs tests ----

/// Test that the same bitmap and vectorizer always produce the same key.
#[test]
fn test_cache_key_deterministic() {
    let key1 = compute_cache_key(&diagonal(5), "potrace -c --eps -q");
    let key2 = compute_cache_key(&diagonal(5), "potrace -c --eps -q");
    assert_eq!(key1, key2, "Same inputs should produce the same cache key");
}

/// Test that a single flipped pixel changes the key.
#[test]
fn test_cache_key_differs_with_different_pixels() {
    let other = Bitmap::from_fn(5, 5, |x, y| x == y || (x, y) == (4, 0)).unwrap();
    assert_ne!(
        compute_cache_key(&diagonal(5), "potrace"),
        compute_cache_key(&other, "potrace")
    );
}

// ---- store.rs tests ----

/// Test store then retrieve returns the stored lines.
#[test]
fn test_store_and_retrieve() {
    let dir = tempdir().unwrap();
    let store = CacheStore::new(dir.path().join("cache"));
    let key = compute_cache_key(&diagonal(3), "potrace");
    let output = lines(&["0 0 moveto", "closepath"]);

    assert!(!store.contains(&key));
    store.store(&key, "potrace", &output).unwrap();
    assert!(store.contains(&key));

    let cached = store.retrieve(&key, "potrace").unwrap();
    assert_eq!(cached, Some(output));
}

/// Test that a missing entry is a cache miss, not an error.
#[test]
fn test_retrieve_missing_is_none() {
    let dir = tempdir().unwrap();
    let store = CacheStore::new(dir.path());
    let key = compute_cache_key(&diagonal(3), "potrace");
    assert_eq!(store.retrieve(&key, "potrace").unwrap(), None);
}

/// Test that an entry written by another vectorizer is treated as a miss.
#[test]
fn test_retrieve_with_other_vectorizer_is_miss() {
    let dir = tempdir().unwrap();
    let store = CacheStore::new(dir.path());
    let key = compute_cache_key(&diagonal(3), "potrace");
    store.store(&key, "potrace", &lines(&["closepath"])).unwrap();
    assert_eq!(store.retrieve(&key, "/usr/local/bin/potrace").unwrap(), None);
}

/// Test that malformed keys are rejected before touching the file system.
#[test]
fn test_store_rejects_invalid_key() {
    let dir = tempdir().unwrap();
    let store = CacheStore::new(dir.path());
    assert!(store.store("../escape", "potrace", &[]).is_err());
    assert!(store.retrieve("not-a-key", "potrace").is_err());
    assert!(!store.contains("../escape"));
}

/// Test that a corrupted entry surfaces as an error.
#[test]
fn test_corrupted_entry_is_error() {
    let dir = tempdir().unwrap();
    let store = CacheStore::new(dir.path());
    let key = compute_cache_key(&diagonal(3), "potrace");
    std::fs::write(dir.path().join(format!("{key}.json")), "{ not json").unwrap();
    assert!(store.retrieve(&key, "potrace").is_err());
}

// ---- CachingVectorizer tests ----

/// Test that the second request for the same crop is served from disk.
#[test]
fn test_caching_vectorizer_reuses_output() {
    let dir = tempdir().unwrap();
    let cached = CachingVectorizer::new(
        CountingVectorizer::new("stub"),
        CacheStore::new(dir.path()),
    );

    let first = cached.vectorize(&diagonal(4)).unwrap();
    let second = cached.vectorize(&diagonal(4)).unwrap();

    assert_eq!(first, second);
    assert_eq!(cached.inner().calls(), 1);
    assert_eq!(cached.identity(), "stub");
}

/// Test that different crops are traced separately.
#[test]
fn test_caching_vectorizer_distinguishes_crops() {
    let dir = tempdir().unwrap();
    let cached = CachingVectorizer::new(
        CountingVectorizer::new("stub"),
        CacheStore::new(dir.path()),
    );

    let small = cached.vectorize(&diagonal(3)).unwrap();
    let large = cached.vectorize(&diagonal(6)).unwrap();

    assert_ne!(small, large);
    assert_eq!(cached.inner().calls(), 2);
}

/// Test that the cache survives a new wrapper over the same directory.
#[test]
fn test_cache_persists_across_instances() {
    let dir = tempdir().unwrap();
    let first = CachingVectorizer::new(
        CountingVectorizer::new("stub"),
        CacheStore::new(dir.path()),
    );
    first.vectorize(&diagonal(5)).unwrap();

    let second = CachingVectorizer::new(
        CountingVectorizer::new("stub"),
        CacheStore::new(dir.path()),
    );
    second.vectorize(&diagonal(5)).unwrap();
    assert_eq!(second.inner().calls(), 0);
}
