//! Per-handler cache registration.

use shared::TtlSeconds;

/// What a registered handler told the cache layer about itself: the
/// schema tag namespacing its entries, the identity naming the
/// operation, and an optional TTL override.
#[derive(Clone, Debug)]
pub struct CachePlan {
    pub schema: String,
    pub handler_identity: String,
    pub ttl: Option<TtlSeconds>,
}

impl CachePlan {
    pub fn new(schema: impl Into<String>, handler_identity: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            handler_identity: handler_identity.into(),
            ttl: None,
        }
    }

    pub fn with_ttl(mut self, seconds: u64) -> Self {
        self.ttl = Some(TtlSeconds(seconds));
        self
    }
}
