use crate::data::UserData;
use aside::{CacheAside, CacheBackend};
use shared::CacheSettings;
use std::sync::Arc;

/// Server state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<CacheAside>,
    pub data: Arc<UserData>,
}

impl AppState {
    pub fn new(
        backend: Arc<dyn CacheBackend>,
        settings: &CacheSettings,
        data: Arc<UserData>,
    ) -> Self {
        Self {
            cache: Arc::new(CacheAside::new(backend, settings)),
            data,
        }
    }
}
