//! Cache abstraction layer for Trail.
//!
//! This crate provides generic caching traits that decouple cache consumers
//! from the underlying storage mechanism. Two traits form the core API:
//!
//! - [`Cache`]: Factory for named cache buckets
//! - [`CacheBucket`]: Key-value store whose entries expire after a TTL
//!
//! # Implementations
//!
//! - [`NullCache`] / [`NullCacheBucket`]: No-op implementations (always miss)
//! - [`MemoryCache`]: In-process implementation for long-running hosts
//! - [`FileCache`]: File-based implementation with version validation
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use trail_cache::{Cache, NullCache};
//!
//! let cache = NullCache;
//! let bucket = cache.bucket("menu-api-short");
//! bucket.set("key", b"[]", Duration::from_secs(3600));
//! assert_eq!(bucket.get("key"), None); // NullCache always misses
//! ```

mod ext;
mod file;
mod memory;

use std::time::Duration;

pub use ext::CacheBucketExt;
pub use file::FileCache;
pub use memory::MemoryCache;

/// A named partition within a [`Cache`].
///
/// Each bucket stores key-value pairs that stay valid for the TTL given at
/// insertion time. Keys are opaque strings chosen by the caller; file-backed
/// implementations use them as file names, so callers should hash anything
/// that is not path-safe.
pub trait CacheBucket: Send + Sync {
    /// Retrieve a cached value.
    ///
    /// Returns `Some(value)` if the key exists and has not expired.
    fn get(&self, key: &str) -> Option<Vec<u8>>;

    /// Store a value in the cache for `ttl`.
    ///
    /// Overwrites any existing entry for the same key. A zero TTL stores an
    /// entry that is already expired.
    fn set(&self, key: &str, value: &[u8], ttl: Duration);
}

/// Factory for named cache [`CacheBucket`]s.
///
/// A `Cache` produces buckets that are logically isolated from each other.
pub trait Cache: Send + Sync {
    /// Open or create a named bucket.
    ///
    /// Calling `bucket` multiple times with the same name returns handles
    /// that share the same underlying storage.
    fn bucket(&self, name: &str) -> Box<dyn CacheBucket>;
}

/// No-op [`CacheBucket`] that never stores or retrieves data.
pub struct NullCacheBucket;

impl CacheBucket for NullCacheBucket {
    fn get(&self, _key: &str) -> Option<Vec<u8>> {
        None
    }

    fn set(&self, _key: &str, _value: &[u8], _ttl: Duration) {}
}

/// No-op [`Cache`] that always returns [`NullCacheBucket`]s.
///
/// Use when caching is disabled.
pub struct NullCache;

impl Cache for NullCache {
    fn bucket(&self, _name: &str) -> Box<dyn CacheBucket> {
        Box::new(NullCacheBucket)
    }
}
