// shared/src/lib.rs

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A write hit a key that already holds a live entry. Only reachable
    /// when the exists-before-set discipline is bypassed, so this is an
    /// invariant breach rather than a user-facing condition.
    #[error("duplicate key: {0}")]
    DuplicateKey(String),
    /// The remote store could not be reached or rejected an operation.
    #[error("backend: {0}")]
    Backend(String),
    /// Invalid or incomplete startup configuration. Fatal at boot.
    #[error("configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Entry lifetime in whole seconds. Backends without expiry ignore it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TtlSeconds(pub u64);

pub mod config;

pub use config::{BackendKind, CacheSettings, FailurePolicy};
