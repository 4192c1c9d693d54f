//! Redis-backed cache with per-entry expiration.

use async_trait::async_trait;
use aside::CacheBackend;
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, Client};
use shared::{CacheSettings, Error, Result, TtlSeconds};
use tokio::sync::OnceCell;
use tracing::info;

/// Networked key/value backend. The store owns expiry: entries are set
/// with `SET key value EX ttl` and report absent once the TTL elapses.
///
/// When disabled no client is built and no connection is ever
/// attempted; every operation is inert. When enabled the multiplexed
/// connection is established once, lazily, on first use. Network
/// failures are not retried here, they surface as [`Error::Backend`].
pub struct RedisBackend {
    client: Option<Client>,
    connection: OnceCell<MultiplexedConnection>,
}

impl RedisBackend {
    /// Build from settings. A missing URL with caching enabled is a
    /// configuration error (normally caught earlier, at env load).
    pub fn from_settings(settings: &CacheSettings) -> Result<Self> {
        if !settings.enabled {
            return Ok(Self::disabled());
        }

        let url = settings.redis_url.as_deref().ok_or_else(|| {
            Error::Config("redis backend enabled without a connection URL".to_string())
        })?;
        Self::connect(url)
    }

    /// An enabled backend for `url`. The client is created eagerly but
    /// does not dial until the first operation.
    pub fn connect(url: &str) -> Result<Self> {
        let client =
            Client::open(url).map_err(|e| Error::Backend(format!("invalid redis URL: {e}")))?;
        Ok(Self {
            client: Some(client),
            connection: OnceCell::new(),
        })
    }

    /// A backend that never connects and treats every read as a miss
    /// and every write as a discard.
    pub fn disabled() -> Self {
        Self {
            client: None,
            connection: OnceCell::new(),
        }
    }

    async fn connection(&self) -> Result<MultiplexedConnection> {
        // is_enabled is checked by callers; reaching here without a
        // client would be a programming error, reported as a backend
        // fault rather than a panic.
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| Error::Backend("backend is disabled".to_string()))?;

        let connection = self
            .connection
            .get_or_try_init(|| async {
                let connection = client
                    .get_multiplexed_async_connection()
                    .await
                    .map_err(|e| Error::Backend(format!("redis connect failed: {e}")))?;
                info!("connected to redis");
                Ok::<_, Error>(connection)
            })
            .await?;
        Ok(connection.clone())
    }
}

#[async_trait]
impl CacheBackend for RedisBackend {
    fn is_enabled(&self) -> bool {
        self.client.is_some()
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        if !self.is_enabled() {
            return Ok(None);
        }
        let mut connection = self.connection().await?;
        connection
            .get::<_, Option<String>>(key)
            .await
            .map_err(|e| Error::Backend(format!("redis GET failed: {e}")))
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        if !self.is_enabled() {
            return Ok(false);
        }
        let mut connection = self.connection().await?;
        connection
            .exists::<_, bool>(key)
            .await
            .map_err(|e| Error::Backend(format!("redis EXISTS failed: {e}")))
    }

    async fn set(&self, key: &str, value: String, ttl: TtlSeconds) -> Result<()> {
        if !self.is_enabled() {
            return Ok(());
        }
        let mut connection = self.connection().await?;
        connection
            .set_ex::<_, _, ()>(key, value, ttl.0)
            .await
            .map_err(|e| Error::Backend(format!("redis SET failed: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn disabled_backend_is_inert() {
        let backend = RedisBackend::disabled();

        assert!(!backend.is_enabled());
        assert_eq!(backend.get("k").await.unwrap(), None);
        assert!(!backend.exists("k").await.unwrap());
        // A write is a silent discard, not an error.
        backend
            .set("k", "v".to_string(), TtlSeconds(1))
            .await
            .unwrap();
        assert_eq!(backend.get("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn disabled_settings_never_require_a_url() {
        let mut settings = CacheSettings::local(false);
        settings.backend = shared::BackendKind::Redis;
        settings.redis_url = None;

        let backend = RedisBackend::from_settings(&settings).unwrap();
        assert!(!backend.is_enabled());
    }

    #[tokio::test]
    async fn invalid_url_is_rejected_up_front() {
        assert!(matches!(
            RedisBackend::connect("not-a-url"),
            Err(Error::Backend(_))
        ));
    }

    // Needs a live Redis on localhost:6379; run with `--ignored`.
    #[tokio::test]
    #[ignore]
    async fn ttl_expiry_reports_absence() {
        let backend = RedisBackend::connect("redis://127.0.0.1:6379").unwrap();
        let key = format!("aside-test-{}", std::process::id());

        backend
            .set(&key, "v".to_string(), TtlSeconds(1))
            .await
            .unwrap();
        assert!(backend.exists(&key).await.unwrap());
        assert_eq!(backend.get(&key).await.unwrap(), Some("v".to_string()));

        tokio::time::sleep(std::time::Duration::from_millis(1500)).await;

        assert!(!backend.exists(&key).await.unwrap());
        assert_eq!(backend.get(&key).await.unwrap(), None);
    }
}
