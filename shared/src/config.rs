use crate::{Error, Result, TtlSeconds};
use tracing::warn;

/// Which cache backend the process runs with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackendKind {
    /// In-process map, no expiry, lives for the process.
    Map,
    /// Networked key/value store with per-entry TTL.
    Redis,
}

/// What a backend failure does to the request that triggered it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Propagate the backend error; the request fails.
    FailClosed,
    /// Log and degrade: reads count as misses, writes are discarded.
    FailOpen,
}

/// Cache configuration, read once at process start.
#[derive(Clone, Debug)]
pub struct CacheSettings {
    pub enabled: bool,
    pub backend: BackendKind,
    pub redis_url: Option<String>,
    pub default_ttl: TtlSeconds,
    pub failure_policy: FailurePolicy,
}

impl CacheSettings {
    const DEFAULT_TTL_SECONDS: u64 = 60;

    /// Load settings from the environment. Fails when the redis backend
    /// is enabled without a connection URL.
    pub fn from_env() -> Result<Self> {
        let enabled = std::env::var("ASIDE_CACHE_ENABLED")
            .map(|v| matches!(v.as_str(), "1" | "true" | "yes"))
            .unwrap_or(true);

        let backend = match std::env::var("ASIDE_BACKEND").as_deref() {
            Ok("map") => BackendKind::Map,
            Ok("redis") | Err(_) => BackendKind::Redis,
            Ok(other) => {
                return Err(Error::Config(format!("unknown backend '{other}'")));
            }
        };

        let redis_url = std::env::var("ASIDE_REDIS_URL").ok();

        if enabled && backend == BackendKind::Redis && redis_url.is_none() {
            return Err(Error::Config(
                "ASIDE_REDIS_URL is required when the redis backend is enabled".to_string(),
            ));
        }

        let default_ttl = std::env::var("ASIDE_DEFAULT_TTL_SECONDS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .map(TtlSeconds)
            .unwrap_or(TtlSeconds(Self::DEFAULT_TTL_SECONDS));

        let failure_policy = match std::env::var("ASIDE_FAILURE_POLICY").as_deref() {
            Ok("fail-open") => FailurePolicy::FailOpen,
            Ok("fail-closed") | Err(_) => FailurePolicy::FailClosed,
            Ok(other) => {
                warn!("unknown failure policy '{}', using fail-closed", other);
                FailurePolicy::FailClosed
            }
        };

        Ok(Self {
            enabled,
            backend,
            redis_url,
            default_ttl,
            failure_policy,
        })
    }

    /// Settings for an in-process map backend, no environment involved.
    /// Convenient for tests and single-instance deployments.
    pub fn local(enabled: bool) -> Self {
        Self {
            enabled,
            backend: BackendKind::Map,
            redis_url: None,
            default_ttl: TtlSeconds(Self::DEFAULT_TTL_SECONDS),
            failure_policy: FailurePolicy::FailClosed,
        }
    }
}

/// HTTP listener configuration for the demo server.
#[derive(Clone, Debug)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl ServerSettings {
    pub fn from_env() -> Self {
        let host = std::env::var("ASIDE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = std::env::var("ASIDE_HTTP_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .unwrap_or(8080);
        Self { host, port }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
