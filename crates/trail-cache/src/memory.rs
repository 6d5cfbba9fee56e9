//! In-process cache implementation.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::{Duration, Instant};

use crate::{Cache, CacheBucket};

struct Entry {
    /// `None` when the TTL reaches past what `Instant` can represent.
    expires_at: Option<Instant>,
    data: Vec<u8>,
}

type Store = Arc<RwLock<HashMap<(String, String), Entry>>>;

/// In-memory [`Cache`] shared by all buckets it hands out.
///
/// Expired entries are dropped lazily when read.
#[derive(Default)]
pub struct MemoryCache {
    store: Store,
}

impl MemoryCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Cache for MemoryCache {
    fn bucket(&self, name: &str) -> Box<dyn CacheBucket> {
        Box::new(MemoryCacheBucket {
            name: name.to_owned(),
            store: Arc::clone(&self.store),
        })
    }
}

struct MemoryCacheBucket {
    name: String,
    store: Store,
}

impl CacheBucket for MemoryCacheBucket {
    fn get(&self, key: &str) -> Option<Vec<u8>> {
        let id = (self.name.clone(), key.to_owned());
        {
            let store = self.store.read().unwrap_or_else(PoisonError::into_inner);
            let entry = store.get(&id)?;
            if entry.expires_at.is_none_or(|at| Instant::now() < at) {
                return Some(entry.data.clone());
            }
        }

        self.store
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id);
        None
    }

    fn set(&self, key: &str, value: &[u8], ttl: Duration) {
        let entry = Entry {
            expires_at: Instant::now().checked_add(ttl),
            data: value.to_vec(),
        };
        self.store
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert((self.name.clone(), key.to_owned()), entry);
    }
}
