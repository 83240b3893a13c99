//! Store error taxonomy.
//!
//! Low-level failures are wrapped with the failing operation's name at
//! each call layer ([`StoreError::op`]), so the original cause stays
//! inspectable however deep the call chain. The `is_*` helpers walk the
//! wrapping chain to classify an error.

use thiserror::Error;

/// Result type alias for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Errors returned by the store layer.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Key absent, or the decode target is missing.
    #[error("{0} not found")]
    NotFound(String),

    /// Create collision on an existing entity.
    #[error("{0} already exists")]
    AlreadyExists(String),

    /// A collection key is present conceptually but holds no elements.
    /// Distinguished from [`StoreError::NotFound`]: "no clients
    /// configured" and "integrity failure wiped the list" are different
    /// alarms.
    #[error("{0} has zero length")]
    ZeroLength(String),

    /// Transport-level failure of the underlying store connection.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Stored value could not be decoded.
    #[error("decode failed: {0}")]
    Decode(String),

    /// Invalid connection or namespace configuration.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A lower-level error wrapped with the failing operation's name.
    #[error("{op} failed: {source}")]
    Op {
        /// Name of the failing operation.
        op: &'static str,
        /// The underlying error.
        #[source]
        source: Box<StoreError>,
    },
}

impl StoreError {
    /// Wraps this error with the name of the failing operation.
    #[must_use]
    pub fn op(self, op: &'static str) -> Self {
        Self::Op {
            op,
            source: Box::new(self),
        }
    }

    /// Returns the innermost error of the wrapping chain.
    #[must_use]
    pub fn root(&self) -> &Self {
        match self {
            Self::Op { source, .. } => source.root(),
            other => other,
        }
    }

    /// Whether the root cause is [`StoreError::NotFound`].
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self.root(), Self::NotFound(_))
    }

    /// Whether the root cause is [`StoreError::AlreadyExists`].
    #[must_use]
    pub fn is_already_exists(&self) -> bool {
        matches!(self.root(), Self::AlreadyExists(_))
    }

    /// Whether the root cause is [`StoreError::ZeroLength`].
    #[must_use]
    pub fn is_zero_length(&self) -> bool {
        matches!(self.root(), Self::ZeroLength(_))
    }

    /// Whether the root cause is [`StoreError::Unavailable`].
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        matches!(self.root(), Self::Unavailable(_))
    }
}

/// Extension for attaching operation context to store results.
pub(crate) trait OpContext<T> {
    /// Wraps the error side with the failing operation's name.
    fn in_op(self, op: &'static str) -> StoreResult<T>;
}

impl<T> OpContext<T> for StoreResult<T> {
    fn in_op(self, op: &'static str) -> StoreResult<T> {
        self.map_err(|err| err.op(op))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrapped_cause_stays_inspectable() {
        let err = StoreError::NotFound("client \"app1\"".to_string())
            .op("fetch_client")
            .op("get_clients_from_realm");

        assert!(err.is_not_found());
        assert!(!err.is_zero_length());
        assert_eq!(
            err.to_string(),
            "get_clients_from_realm failed: fetch_client failed: client \"app1\" not found"
        );
    }

    #[test]
    fn zero_length_distinct_from_not_found() {
        let err = StoreError::ZeroLength("client list of realm \"acme\"".to_string());
        assert!(err.is_zero_length());
        assert!(!err.is_not_found());
    }
}
