use crate::core::cache::Cache;
use async_trait::async_trait;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::debug;

struct CacheEntry<V> {
    value: V,
    inserted_at: Instant,
    ttl: Option<Duration>,
}

impl<V> CacheEntry<V> {
    fn is_expired(&self, now: Instant) -> bool {
        self.ttl
            .is_some_and(|ttl| now.duration_since(self.inserted_at) >= ttl)
    }
}

/// In-memory cache shared by every request the server handles.
pub struct MemoryCache<K, V>
where
    K: Eq + Hash + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    inner: Arc<Mutex<HashMap<K, CacheEntry<V>>>>,
}

impl<K, V> MemoryCache<K, V>
where
    K: Eq + Hash + Send + Sync,
    V: Clone + Send + Sync,
{
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl<K, V> Default for MemoryCache<K, V>
where
    K: Eq + Hash + Send + Sync,
    V: Clone + Send + Sync,
{
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<K, V> Cache<K, V> for MemoryCache<K, V>
where
    K: Eq + Hash + Send + Sync + std::fmt::Debug + 'static,
    V: Clone + Send + Sync + 'static,
{
    async fn get(&self, key: &K) -> Option<V> {
        let mut cache = self.inner.lock().await;
        let expired = match cache.get(key) {
            Some(entry) if entry.is_expired(Instant::now()) => true,
            Some(entry) => {
                debug!("Cache HIT for key: {:?}", key);
                return Some(entry.value.clone());
            }
            None => false,
        };
        if expired {
            debug!("Cache entry expired for key: {:?}", key);
            cache.remove(key);
        } else {
            debug!("Cache MISS for key: {:?}", key);
        }
        None
    }

    async fn put(&self, key: K, value: V, ttl: Option<Duration>) {
        let entry = CacheEntry {
            value,
            inserted_at: Instant::now(),
            ttl,
        };

        let mut cache = self.inner.lock().await;
        debug!("Cache PUT for key: {:?}", key);
        cache.insert(key, entry);
    }
}
