//! Error types for stateful closures.
//!
//! Every failure in this crate is a contract violation by the caller: a
//! handler declared with too few parameters, a call with the wrong number of
//! arguments, a value used as a callable that is not one, or an arity outside
//! the supported range. None of them are retried or recovered internally;
//! they propagate to the immediate caller of the offending operation.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PondError>;

/// Represents errors that can occur when building or invoking callables.
///
/// # Examples
///
/// ```rust
/// use pond::PondError;
///
/// let error = PondError::arity_mismatch(2, 3);
/// assert_eq!(error.to_string(), "expected 2 argument(s), but got 3");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PondError {
    /// A handler was declared with fewer than two parameters, so it cannot
    /// receive the self-reference and the current state.
    #[error("handler must declare at least 2 parameters, but declares {arity}")]
    HandlerArityTooSmall {
        /// The declared arity of the rejected handler.
        arity: usize,
    },

    /// A call site supplied a different number of arguments than the
    /// callable's fixed arity.
    #[error("expected {expected} argument(s), but got {actual}")]
    ArityMismatch {
        /// The arity of the callable.
        expected: usize,
        /// The number of arguments supplied.
        actual: usize,
    },

    /// A value was used as a callable but is neither a primitive nor a
    /// composite.
    #[error("a value of kind `{kind}` is not callable")]
    UnsupportedCallableKind {
        /// The kind of the offending value.
        kind: &'static str,
    },

    /// A composite's inner callable did not return a `(value, next)` pair.
    #[error("expected a (value, next) pair, but got a value of kind `{kind}`")]
    MalformedResult {
        /// The kind of the value actually returned.
        kind: &'static str,
    },

    /// The requested arity is outside the supported fixed range.
    #[error("arity {arity} exceeds the supported maximum of {maximum}")]
    ArityTooLarge {
        /// The requested arity.
        arity: usize,
        /// The largest arity supported in this position.
        maximum: usize,
    },
}

impl PondError {
    /// Creates an [`PondError::ArityMismatch`].
    #[must_use]
    pub const fn arity_mismatch(expected: usize, actual: usize) -> Self {
        Self::ArityMismatch { expected, actual }
    }

    /// Creates an [`PondError::ArityTooLarge`].
    #[must_use]
    pub const fn arity_too_large(arity: usize, maximum: usize) -> Self {
        Self::ArityTooLarge { arity, maximum }
    }

    /// Creates an [`PondError::UnsupportedCallableKind`].
    #[must_use]
    pub const fn unsupported(kind: &'static str) -> Self {
        Self::UnsupportedCallableKind { kind }
    }

    /// Creates an [`PondError::MalformedResult`].
    #[must_use]
    pub const fn malformed(kind: &'static str) -> Self {
        Self::MalformedResult { kind }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(
        PondError::HandlerArityTooSmall { arity: 1 },
        "handler must declare at least 2 parameters, but declares 1"
    )]
    #[case(PondError::arity_mismatch(1, 0), "expected 1 argument(s), but got 0")]
    #[case(PondError::unsupported("int"), "a value of kind `int` is not callable")]
    #[case(
        PondError::malformed("atom"),
        "expected a (value, next) pair, but got a value of kind `atom`"
    )]
    #[case(
        PondError::arity_too_large(11, 10),
        "arity 11 exceeds the supported maximum of 10"
    )]
    fn test_display(#[case] error: PondError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    fn test_error_trait_without_source() {
        use std::error::Error;

        let error = PondError::arity_mismatch(2, 1);
        assert!(error.source().is_none());
    }

    #[rstest]
    fn test_equality() {
        assert_eq!(
            PondError::arity_mismatch(2, 1),
            PondError::ArityMismatch {
                expected: 2,
                actual: 1
            }
        );
        assert_ne!(PondError::arity_mismatch(2, 1), PondError::arity_mismatch(1, 2));
    }
}
