//! The cache-aside interceptor: wraps exactly one handler invocation in
//! the lookup / invoke / populate cycle.

use crate::codec;
use crate::flight::FlightGroup;
use crate::key::{CacheKey, KeyBuilder};
use crate::outcome::{Invocation, Outcome};
use crate::plan::CachePlan;
use crate::ports::CacheBackend;
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::{CacheSettings, Error, FailurePolicy, Result, TtlSeconds};
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, warn};

/// Orchestrates the intercept/populate cycle around handler invocations.
///
/// One instance is constructed at startup with the shared backend and
/// injected wherever handlers are dispatched.
pub struct CacheAside {
    backend: Arc<dyn CacheBackend>,
    default_ttl: TtlSeconds,
    failure_policy: FailurePolicy,
    flight: FlightGroup,
}

impl CacheAside {
    pub fn new(backend: Arc<dyn CacheBackend>, settings: &CacheSettings) -> Self {
        Self {
            backend,
            default_ttl: settings.default_ttl,
            failure_policy: settings.failure_policy,
            flight: FlightGroup::new(),
        }
    }

    /// Run `handler` through the cache-aside cycle under `plan`.
    ///
    /// On a hit the handler never runs and the stored payload comes
    /// back with [`Source::Cache`](crate::Source::Cache). On a miss the
    /// handler runs; a success-class outcome with a payload is stored
    /// under the derived key for the plan's TTL (or the configured
    /// default). The backend's enabled flag is consulted fresh on every
    /// invocation, so a runtime toggle takes effect on the next call.
    pub async fn intercept<T, F, Fut>(
        &self,
        plan: &CachePlan,
        args: &[(&str, Option<&str>)],
        handler: F,
    ) -> Result<Invocation<T>>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Outcome<T>>,
    {
        if !self.backend.is_enabled() {
            return Ok(Invocation::live(handler().await));
        }

        let key = KeyBuilder::build(&plan.schema, &plan.handler_identity, args);
        debug!(key = %key, "cache lookup");

        // Hold the per-key flight for the whole cycle so concurrent
        // identical misses collapse into one handler run.
        let _permit = self.flight.acquire(key.storage()).await;

        if let Some(raw) = self.lookup(&key).await? {
            match codec::decode::<T>(&raw) {
                Ok(payload) => {
                    debug!(key = %key, "cache hit");
                    return Ok(Invocation::cached(payload));
                }
                Err(e) => {
                    // The stored bytes are unusable; treat like a
                    // backend fault under the configured policy.
                    if self.failure_policy == FailurePolicy::FailClosed {
                        return Err(Error::Backend(format!(
                            "undecodable entry for key '{key}': {e}"
                        )));
                    }
                    warn!(key = %key, error = %e, "undecodable cache entry, running handler");
                }
            }
        }

        let outcome = handler().await;

        if outcome.is_cacheable() {
            self.store(plan, &key, &outcome).await?;
        }

        Ok(Invocation::live(outcome))
    }

    async fn lookup(&self, key: &CacheKey) -> Result<Option<String>> {
        match self.backend.get(key.storage()).await {
            Ok(value) => Ok(value),
            Err(e) => match self.failure_policy {
                FailurePolicy::FailClosed => Err(e),
                FailurePolicy::FailOpen => {
                    warn!(key = %key, error = %e, "backend get failed, treating as miss");
                    Ok(None)
                }
            },
        }
    }

    async fn store<T: Serialize>(
        &self,
        plan: &CachePlan,
        key: &CacheKey,
        outcome: &Outcome<T>,
    ) -> Result<()> {
        let payload = match outcome {
            Outcome::Success {
                payload: Some(payload),
                ..
            } => payload,
            // is_cacheable() gates entry here.
            _ => return Ok(()),
        };

        let present = match self.backend.exists(key.storage()).await {
            Ok(present) => present,
            Err(e) => match self.failure_policy {
                FailurePolicy::FailClosed => return Err(e),
                FailurePolicy::FailOpen => {
                    warn!(key = %key, error = %e, "backend exists failed, skipping store");
                    return Ok(());
                }
            },
        };
        if present {
            debug!(key = %key, "entry already live, skipping store");
            return Ok(());
        }

        let value = match codec::encode(payload) {
            Ok(value) => value,
            Err(e) => {
                // A payload that will not serialize only loses the
                // caching side effect, never the request.
                warn!(key = %key, error = %e, "payload not serializable, skipping store");
                return Ok(());
            }
        };

        let ttl = plan.ttl.unwrap_or(self.default_ttl);
        match self.backend.set(key.storage(), value, ttl).await {
            Ok(()) => {
                debug!(key = %key, ttl_seconds = ttl.0, "stored cache entry");
                Ok(())
            }
            Err(e) => match self.failure_policy {
                FailurePolicy::FailClosed => Err(e),
                FailurePolicy::FailOpen => {
                    warn!(key = %key, error = %e, "backend set failed, discarding write");
                    Ok(())
                }
            },
        }
    }
}
