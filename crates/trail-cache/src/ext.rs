//! Extension trait for [`CacheBucket`] with typed convenience methods.

use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::CacheBucket;

/// Typed convenience methods for [`CacheBucket`].
///
/// Kept on an extension trait so [`CacheBucket`] stays object-safe and
/// implementors only deal with raw bytes.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use trail_cache::{Cache, CacheBucketExt, MemoryCache};
///
/// let cache = MemoryCache::new();
/// let bucket = cache.bucket("crumbs");
///
/// bucket.set_json("page", &vec!["Section", "Page"], Duration::from_secs(60));
/// let titles: Option<Vec<String>> = bucket.get_json("page");
/// assert_eq!(titles, Some(vec!["Section".to_owned(), "Page".to_owned()]));
/// ```
pub trait CacheBucketExt: CacheBucket {
    /// Retrieve a JSON-deserialized value from the cache.
    ///
    /// Returns `None` on cache miss, expiry, or deserialization failure.
    fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let bytes = self.get(key)?;
        serde_json::from_slice(&bytes).ok()
    }

    /// Store a value as JSON in the cache.
    ///
    /// Silently does nothing if serialization fails.
    fn set_json<T: Serialize>(&self, key: &str, value: &T, ttl: Duration) {
        if let Ok(bytes) = serde_json::to_vec(value) {
            self.set(key, &bytes, ttl);
        }
    }
}

impl<B: CacheBucket + ?Sized> CacheBucketExt for B {}
