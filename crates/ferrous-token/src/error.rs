//! Token error types.

use thiserror::Error;

/// Result type alias for token operations.
pub type TokenResult<T> = std::result::Result<T, TokenError>;

/// Errors returned during token issuance.
///
/// A signing failure always surfaces here; callers never receive an
/// empty token string in place of an error.
#[derive(Debug, Error)]
pub enum TokenError {
    /// The token could not be signed.
    #[error("token signing failed: {0}")]
    Signing(String),
}
