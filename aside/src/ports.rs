//! Ports are the pluggable extension points for cache storage.

use async_trait::async_trait;
use shared::{Result, TtlSeconds};

/// Port for cache entry storage.
///
/// Callers must consult [`is_enabled`](CacheBackend::is_enabled) before
/// every other operation; a disabled backend always misses and discards
/// writes. An absent key is a `None`/`false` answer, never an error.
#[async_trait]
pub trait CacheBackend: Send + Sync + 'static {
    fn is_enabled(&self) -> bool;

    /// Stored value for `key`, if present and not expired.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Whether a live entry exists for `key`. Checked before every
    /// write to keep keys write-once per TTL window.
    async fn exists(&self, key: &str) -> Result<bool>;

    /// Insert an entry. Backends without expiry ignore `ttl`.
    async fn set(&self, key: &str, value: String, ttl: TtlSeconds) -> Result<()>;
}
