//! Cache key derivation.
//!
//! A key is derived from a schema tag, the handler identity, and the
//! handler's resolved arguments in declaration order. Two renderings are
//! kept: a length-prefixed storage form that cannot collide across
//! distinct inputs, and a plain delimiter-joined debug form for logs.

use std::fmt;

/// A derived cache key.
///
/// `storage` is what backends are addressed with; `debug` is the
/// human-readable `schema-identity-name-value-...` join.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheKey {
    storage: String,
    debug: String,
}

impl CacheKey {
    pub fn storage(&self) -> &str {
        &self.storage
    }

    pub fn debug(&self) -> &str {
        &self.debug
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.debug)
    }
}

/// Pure key construction. No state, no failure modes.
pub struct KeyBuilder;

impl KeyBuilder {
    /// Build a key from `(schema, handler_identity, args)`.
    ///
    /// Arguments the dispatcher resolved to nothing are passed as `None`
    /// and still contribute to the key; omitting them would collide two
    /// different invocations into one entry.
    pub fn build(schema: &str, handler_identity: &str, args: &[(&str, Option<&str>)]) -> CacheKey {
        let mut storage = String::new();
        Self::push_component(&mut storage, schema);
        Self::push_component(&mut storage, handler_identity);

        let mut debug = format!("{schema}-{handler_identity}");

        for (name, value) in args {
            Self::push_component(&mut storage, name);
            match value {
                Some(v) => Self::push_component(&mut storage, v),
                // Self-delimiting absent-value marker; a digit never
                // starts one, so it cannot be read as a length prefix.
                None => storage.push('*'),
            }
            debug.push('-');
            debug.push_str(name);
            debug.push('-');
            debug.push_str(value.unwrap_or(""));
        }

        CacheKey { storage, debug }
    }

    fn push_component(out: &mut String, part: &str) {
        out.push_str(&part.len().to_string());
        out.push(':');
        out.push_str(part);
    }
}
