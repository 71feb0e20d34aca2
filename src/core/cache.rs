use async_trait::async_trait;
use std::time::Duration;

/// Key-value cache with optional per-entry expiry.
///
/// Entries are immutable once written: `put` replaces, it never mutates in
/// place. An expired entry is never returned by `get`.
#[async_trait]
pub trait Cache<K, V>: Send + Sync
where
    K: Send + Sync,
    V: Clone + Send + Sync,
{
    async fn get(&self, key: &K) -> Option<V>;

    /// Stores `value`; `ttl` of `None` keeps it until removed.
    async fn put(&self, key: K, value: V, ttl: Option<Duration>);
}
