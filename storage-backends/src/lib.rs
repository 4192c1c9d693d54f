#![deny(clippy::all)]

//! Cache backend adapters: an in-process map and a Redis-backed store.

mod map_backend;
mod redis_backend;

pub use map_backend::MapBackend;
pub use redis_backend::RedisBackend;

use aside::CacheBackend;
use shared::{BackendKind, CacheSettings, Result};
use std::sync::Arc;

/// Build the backend the settings select. The map backend ignores the
/// TTL and failure-policy knobs; the redis backend needs a URL when
/// enabled, which `CacheSettings::from_env` has already validated.
pub fn from_settings(settings: &CacheSettings) -> Result<Arc<dyn CacheBackend>> {
    match settings.backend {
        BackendKind::Map => Ok(Arc::new(MapBackend::new(settings.enabled))),
        BackendKind::Redis => Ok(Arc::new(RedisBackend::from_settings(settings)?)),
    }
}
