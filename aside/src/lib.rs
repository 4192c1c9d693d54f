#![deny(clippy::all)]

//! Cache-aside layer: key derivation, backend port, and the
//! get-or-populate interceptor that wraps handler invocations.

pub mod codec;
pub mod flight;
pub mod interceptor;
pub mod key;
pub mod outcome;
pub mod plan;
pub mod ports;

pub use interceptor::CacheAside;
pub use key::{CacheKey, KeyBuilder};
pub use outcome::{Invocation, Outcome, Source};
pub use plan::CachePlan;
pub use ports::CacheBackend;
