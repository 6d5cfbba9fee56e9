//! Two-tier cache in front of a [`CrumbSource`].
//!
//! Fresh answers live in a short-lived bucket and are served without touching
//! the service. Every successful live answer is also copied into a long-lived
//! bucket, which is only read when the service fails: a stale trail beats an
//! empty one.

use std::time::Duration;

use sha2::{Digest, Sha256};
use tracing::debug;
use trail_cache::{Cache, CacheBucket, CacheBucketExt};

use crate::error::MenuApiError;
use crate::source::CrumbSource;
use crate::types::{CrumbItem, CrumbRequest, trailing_slash};

const SHORT_BUCKET: &str = "menu-api-short";
const LONG_BUCKET: &str = "menu-api-long";

/// [`CrumbSource`] decorator caching answers by page URL, language and call type.
pub struct CachedCrumbSource<S> {
    inner: S,
    short: Box<dyn CacheBucket>,
    long: Box<dyn CacheBucket>,
    short_ttl: Duration,
    long_ttl: Duration,
}

impl<S: CrumbSource> CachedCrumbSource<S> {
    /// Wrap `inner`, storing answers in buckets opened from `cache`.
    #[must_use]
    pub fn new(inner: S, cache: &dyn Cache, short_ttl: Duration, long_ttl: Duration) -> Self {
        Self {
            inner,
            short: cache.bucket(SHORT_BUCKET),
            long: cache.bucket(LONG_BUCKET),
            short_ttl,
            long_ttl,
        }
    }

    /// Path-safe cache key for a request.
    fn cache_key(request: &CrumbRequest<'_>) -> String {
        let mut hasher = Sha256::new();
        hasher.update(trailing_slash(request.url).as_bytes());
        hasher.update(b"\n");
        hasher.update(request.page.lang.as_bytes());
        hasher.update(b"\n");
        hasher.update(request.kind.as_str().as_bytes());
        hex::encode(hasher.finalize())
    }
}

impl<S: CrumbSource> CrumbSource for CachedCrumbSource<S> {
    fn try_fetch(&self, request: &CrumbRequest<'_>) -> Result<Vec<CrumbItem>, MenuApiError> {
        let key = Self::cache_key(request);

        if let Some(items) = self.short.get_json::<Vec<CrumbItem>>(&key) {
            debug!(kind = %request.kind, url = request.url, "menu-api cache hit");
            return Ok(items);
        }

        match self.inner.try_fetch(request) {
            Ok(items) => {
                self.short.set_json(&key, &items, self.short_ttl);
                self.long.set_json(&key, &items, self.long_ttl);
                Ok(items)
            }
            Err(e) => {
                if let Some(items) = self.long.get_json::<Vec<CrumbItem>>(&key) {
                    tracing::warn!(
                        kind = %request.kind,
                        url = request.url,
                        "menu-api call failed, serving stale answer: {e}"
                    );
                    return Ok(items);
                }
                Err(e)
            }
        }
    }
}
