//! In-process map backend.

use async_trait::async_trait;
use aside::CacheBackend;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use shared::{Error, Result, TtlSeconds};

/// Process-lifetime key/value store with no expiry.
///
/// Entries live until the process exits; the TTL passed to `set` is
/// ignored. Writes to a live key are rejected as an invariant breach,
/// this backend assumes callers honor the exists-before-set discipline.
/// One instance is constructed at startup and shared by reference.
pub struct MapBackend {
    entries: DashMap<String, String>,
    enabled: bool,
}

impl MapBackend {
    pub fn new(enabled: bool) -> Self {
        Self {
            entries: DashMap::new(),
            enabled,
        }
    }

    /// Number of live entries, for tests and diagnostics.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl CacheBackend for MapBackend {
    fn is_enabled(&self) -> bool {
        self.enabled
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        if !self.enabled {
            return Ok(None);
        }
        Ok(self.entries.get(key).map(|entry| entry.value().clone()))
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        if !self.enabled {
            return Ok(false);
        }
        Ok(self.entries.contains_key(key))
    }

    async fn set(&self, key: &str, value: String, _ttl: TtlSeconds) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }
        match self.entries.entry(key.to_string()) {
            Entry::Vacant(slot) => {
                slot.insert(value);
                Ok(())
            }
            Entry::Occupied(_) => Err(Error::DuplicateKey(key.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_then_get_round_trips() {
        let backend = MapBackend::new(true);
        backend
            .set("k", "v".to_string(), TtlSeconds(60))
            .await
            .unwrap();

        assert_eq!(backend.get("k").await.unwrap(), Some("v".to_string()));
        assert!(backend.exists("k").await.unwrap());
    }

    #[tokio::test]
    async fn absent_key_is_a_miss_not_an_error() {
        let backend = MapBackend::new(true);
        assert_eq!(backend.get("missing").await.unwrap(), None);
        assert!(!backend.exists("missing").await.unwrap());
    }

    #[tokio::test]
    async fn second_write_to_a_live_key_is_rejected() {
        let backend = MapBackend::new(true);
        backend
            .set("k", "first".to_string(), TtlSeconds(60))
            .await
            .unwrap();

        let result = backend.set("k", "second".to_string(), TtlSeconds(60)).await;
        assert!(matches!(result, Err(Error::DuplicateKey(_))));
        // The original entry is untouched.
        assert_eq!(backend.get("k").await.unwrap(), Some("first".to_string()));
    }

    #[tokio::test]
    async fn disabled_map_misses_and_discards() {
        let backend = MapBackend::new(false);
        backend
            .set("k", "v".to_string(), TtlSeconds(60))
            .await
            .unwrap();

        assert!(!backend.is_enabled());
        assert_eq!(backend.get("k").await.unwrap(), None);
        assert!(!backend.exists("k").await.unwrap());
        assert!(backend.is_empty());
    }

    #[tokio::test]
    async fn concurrent_writes_to_distinct_keys_all_land() {
        let backend = std::sync::Arc::new(MapBackend::new(true));

        let mut tasks = Vec::new();
        for i in 0..16 {
            let backend = backend.clone();
            tasks.push(tokio::spawn(async move {
                backend
                    .set(&format!("k{i}"), format!("v{i}"), TtlSeconds(60))
                    .await
                    .unwrap();
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }

        assert_eq!(backend.len(), 16);
        for i in 0..16 {
            assert_eq!(
                backend.get(&format!("k{i}")).await.unwrap(),
                Some(format!("v{i}"))
            );
        }
    }
}
