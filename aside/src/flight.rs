//! Per-key coalescing of concurrent invocations.
//!
//! Concurrent calls that derive the same key serialize through one
//! async lock; whoever wins re-checks the backend once the losers would
//! otherwise have raced it into duplicate handler runs.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

#[derive(Default)]
pub struct FlightGroup {
    inflight: Mutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

impl FlightGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive flight on `key`. The permit releases the key
    /// on drop and removes the registry slot once no caller holds it.
    pub async fn acquire(&self, key: &str) -> FlightPermit<'_> {
        let slot = {
            let mut registry = self.lock_registry();
            registry
                .entry(key.to_string())
                .or_insert_with(|| Arc::new(AsyncMutex::new(())))
                .clone()
        };

        let guard = slot.lock_owned().await;

        FlightPermit {
            key: key.to_string(),
            group: self,
            _guard: guard,
        }
    }

    fn lock_registry(&self) -> std::sync::MutexGuard<'_, HashMap<String, Arc<AsyncMutex<()>>>> {
        self.inflight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

pub struct FlightPermit<'a> {
    key: String,
    group: &'a FlightGroup,
    _guard: OwnedMutexGuard<()>,
}

impl Drop for FlightPermit<'_> {
    fn drop(&mut self) {
        let mut registry = self.group.lock_registry();
        // One clone lives in the registry, one inside our guard. More
        // than two means another caller is still waiting on the slot.
        let unused = registry
            .get(&self.key)
            .is_some_and(|slot| Arc::strong_count(slot) <= 2);
        if unused {
            registry.remove(&self.key);
        }
    }
}
