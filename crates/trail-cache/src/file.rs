//! File-based cache implementation.
//!
//! [`FileCache`] stores cache entries as files on disk, organized into buckets
//! (subdirectories). Each entry is a single file with a binary header followed
//! by the data:
//!
//! ```text
//! [expires_at: u64 LE, seconds since Unix epoch][data bytes]
//! ```
//!
//! On read, only the header is read first to check expiry. The full data
//! is read only on cache hit.
//!
//! On construction, [`FileCache`] validates a `VERSION` file in the cache root.
//! If the version mismatches or is missing, the entire cache directory is wiped
//! and recreated.

use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::{Cache, CacheBucket};

/// File-based [`Cache`] rooted at a directory on disk.
///
/// Directory layout:
/// ```text
/// {root}/
/// +-- VERSION            # contains the cache version string
/// +-- menu-api-short/    # bucket "menu-api-short"
/// |   +-- 3f2a...        # cache entry
/// +-- menu-api-long/     # bucket "menu-api-long"
///     +-- ...
/// ```
pub struct FileCache {
    root: PathBuf,
}

impl FileCache {
    /// Create a new file-based cache at `root`, validating the cache version.
    ///
    /// If the `VERSION` file inside `root` does not match `version`, the entire
    /// cache directory is removed and recreated with the new version. Errors
    /// during validation are logged but never fatal.
    #[must_use]
    pub fn new(root: PathBuf, version: &str) -> Self {
        validate_version(&root, version);
        Self { root }
    }
}

impl Cache for FileCache {
    fn bucket(&self, name: &str) -> Box<dyn CacheBucket> {
        Box::new(FileCacheBucket {
            dir: self.root.join(name),
        })
    }
}

/// A single bucket backed by a directory on disk.
struct FileCacheBucket {
    dir: PathBuf,
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs())
}

impl CacheBucket for FileCacheBucket {
    fn get(&self, key: &str) -> Option<Vec<u8>> {
        let path = self.dir.join(key);
        let mut file = File::open(&path).ok()?;

        let mut expiry_buf = [0u8; 8];
        file.read_exact(&mut expiry_buf).ok()?;
        let expires_at = u64::from_le_bytes(expiry_buf);

        if unix_now() >= expires_at {
            tracing::debug!("cache entry expired: {}", path.display());
            let _ = fs::remove_file(&path);
            return None;
        }

        let mut data = Vec::new();
        file.read_to_end(&mut data).ok()?;
        Some(data)
    }

    fn set(&self, key: &str, value: &[u8], ttl: Duration) {
        let path = self.dir.join(key);

        // Cache is optional, write failures are ignored
        let Some(parent) = path.parent() else {
            return;
        };
        if fs::create_dir_all(parent).is_err() {
            return;
        }

        let expires_at = unix_now().saturating_add(ttl.as_secs());
        let mut buf = Vec::with_capacity(8 + value.len());
        buf.extend_from_slice(&expires_at.to_le_bytes());
        buf.extend_from_slice(value);

        let _ = fs::write(&path, &buf);
    }
}

/// Validate the cache version, wiping the directory on mismatch.
fn validate_version(root: &Path, version: &str) {
    let version_file = root.join("VERSION");

    match fs::read_to_string(&version_file) {
        Ok(stored) if stored == version => {
            tracing::debug!("cache version matches: {version}");
            return;
        }
        Ok(stored) => {
            tracing::info!(
                "cache version mismatch (stored={stored}, current={version}), wiping cache"
            );
        }
        Err(_) => {
            tracing::info!("no cache VERSION file found, initializing cache");
        }
    }

    if root.exists()
        && let Err(e) = fs::remove_dir_all(root)
    {
        tracing::warn!("failed to remove cache directory: {e}");
    }
    if let Err(e) = fs::create_dir_all(root) {
        tracing::warn!("failed to create cache directory: {e}");
        return;
    }
    if let Err(e) = fs::write(&version_file, version) {
        tracing::warn!("failed to write cache VERSION file: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const HOUR: Duration = Duration::from_secs(3600);

    #[test]
    fn test_file_bucket_set_and_get() {
        let tmp = TempDir::new().unwrap();
        let cache = FileCache::new(tmp.path().join("cache"), "v1");
        let bucket = cache.bucket("menu-api-short");

        bucket.set("abc123", b"[{\"title\":\"Section\"}]", HOUR);
        assert_eq!(
            bucket.get("abc123"),
            Some(b"[{\"title\":\"Section\"}]".to_vec())
        );
    }

    #[test]
    fn test_file_bucket_expired_entry_misses_and_is_removed() {
        let tmp = TempDir::new().unwrap();
        let cache = FileCache::new(tmp.path().join("cache"), "v1");
        let bucket = cache.bucket("menu-api-short");

        bucket.set("key", b"data", Duration::ZERO);
        assert_eq!(bucket.get("key"), None);
        assert!(!tmp.path().join("cache/menu-api-short/key").exists());
    }

    #[test]
    fn test_file_bucket_get_nonexistent_key() {
        let tmp = TempDir::new().unwrap();
        let cache = FileCache::new(tmp.path().join("cache"), "v1");

        assert_eq!(cache.bucket("menu-api-short").get("nonexistent"), None);
    }

    #[test]
    fn test_file_bucket_overwrite() {
        let tmp = TempDir::new().unwrap();
        let cache = FileCache::new(tmp.path().join("cache"), "v1");
        let bucket = cache.bucket("menu-api-long");

        bucket.set("key", b"first", HOUR);
        bucket.set("key", b"second", HOUR);

        assert_eq!(bucket.get("key"), Some(b"second".to_vec()));
    }

    #[test]
    fn test_file_cache_buckets_are_isolated() {
        let tmp = TempDir::new().unwrap();
        let cache = FileCache::new(tmp.path().join("cache"), "v1");

        let short = cache.bucket("menu-api-short");
        let long = cache.bucket("menu-api-long");

        short.set("key", b"short-data", HOUR);
        long.set("key", b"long-data", HOUR);

        assert_eq!(short.get("key"), Some(b"short-data".to_vec()));
        assert_eq!(long.get("key"), Some(b"long-data".to_vec()));
    }

    #[test]
    fn test_file_bucket_truncated_header_misses() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("cache");
        let cache = FileCache::new(root.clone(), "v1");

        fs::create_dir_all(root.join("menu-api-short")).unwrap();
        fs::write(root.join("menu-api-short/key"), b"abc").unwrap();

        assert_eq!(cache.bucket("menu-api-short").get("key"), None);
    }

    #[test]
    fn test_version_match_keeps_cache() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("cache");

        let cache = FileCache::new(root.clone(), "v1");
        cache.bucket("menu-api-long").set("key", b"data", HOUR);

        let cache = FileCache::new(root, "v1");
        assert_eq!(
            cache.bucket("menu-api-long").get("key"),
            Some(b"data".to_vec())
        );
    }

    #[test]
    fn test_version_mismatch_wipes_cache() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("cache");

        let cache = FileCache::new(root.clone(), "v1");
        cache.bucket("menu-api-long").set("key", b"data", HOUR);

        let cache = FileCache::new(root.clone(), "v2");
        assert_eq!(cache.bucket("menu-api-long").get("key"), None);
        assert_eq!(fs::read_to_string(root.join("VERSION")).unwrap(), "v2");
    }
}
