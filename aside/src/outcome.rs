//! Handler invocation outcomes.

/// Result of running a wrapped handler to completion.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome<T> {
    Success { status: u16, payload: Option<T> },
    Failure { status: u16, detail: String },
}

impl<T> Outcome<T> {
    pub fn ok(payload: T) -> Self {
        Outcome::Success {
            status: 200,
            payload: Some(payload),
        }
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Outcome::Failure {
            status: 404,
            detail: detail.into(),
        }
    }

    /// Only success-class outcomes carrying a payload are stored.
    pub fn is_cacheable(&self) -> bool {
        match self {
            Outcome::Success { status, payload } => {
                (200..300).contains(status) && payload.is_some()
            }
            Outcome::Failure { .. } => false,
        }
    }
}

/// Where an invocation result came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Source {
    /// Served from a stored entry; the handler never ran.
    Cache,
    /// Produced by running the handler.
    Live,
}

/// An outcome paired with its source. The source is observable to the
/// embedding code and tests only; HTTP callers see identical bodies
/// either way.
#[derive(Clone, Debug)]
pub struct Invocation<T> {
    pub outcome: Outcome<T>,
    pub source: Source,
}

impl<T> Invocation<T> {
    pub fn live(outcome: Outcome<T>) -> Self {
        Self {
            outcome,
            source: Source::Live,
        }
    }

    pub fn cached(payload: T) -> Self {
        Self {
            outcome: Outcome::ok(payload),
            source: Source::Cache,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_with_payload_is_cacheable() {
        assert!(Outcome::ok("body").is_cacheable());
    }

    #[test]
    fn failure_is_not_cacheable() {
        assert!(!Outcome::<String>::not_found("missing").is_cacheable());
    }

    #[test]
    fn empty_payload_is_not_cacheable() {
        let outcome: Outcome<String> = Outcome::Success {
            status: 200,
            payload: None,
        };
        assert!(!outcome.is_cacheable());
    }

    #[test]
    fn non_success_status_is_not_cacheable() {
        let outcome = Outcome::Success {
            status: 301,
            payload: Some("moved"),
        };
        assert!(!outcome.is_cacheable());
    }
}
