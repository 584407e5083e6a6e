//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Only deterministic construction failures live here (validation,
/// invariants). Storage and browser failures belong to the crates that own
/// those concerns.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. blank username, unknown role name).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A domain invariant was violated (e.g. a route policy with no roles).
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_context() {
        let err = DomainError::validation("username must not be empty");
        assert_eq!(err.to_string(), "validation failed: username must not be empty");

        let err = DomainError::invariant("role set is empty");
        assert_eq!(err.to_string(), "invariant violated: role set is empty");
    }
}
