//! # ferrous-token
//!
//! Access and refresh token issuance for the ferrous authorization
//! server.
//!
//! Tokens are compact HS256 JWTs. Access tokens embed the user's full
//! profile document next to the fixed protocol claims; refresh tokens
//! carry the fixed claims only.
//!
//! ## Modules
//!
//! - [`claims`] - canonical claim sets for access and refresh tokens
//! - [`error`] - token error types
//! - [`issuer`] - HS256 signing

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod claims;
pub mod error;
pub mod issuer;

pub use claims::TokenClaims;
pub use error::{TokenError, TokenResult};
pub use issuer::JwtIssuer;
