//! Canonical claim sets for access and refresh tokens.
//!
//! The claim set is one statically-shaped struct with a flattened
//! dynamic tail: fixed protocol claims are struct fields, and for access
//! tokens the user's profile document is merged into the
//! `#[serde(flatten)]` map. The whole set serializes exactly once, so
//! caller-supplied profile fields survive into the token unmodified. A
//! profile field whose name collides with a fixed claim is dropped; the
//! fixed claim wins.

use ferrous_model::{User, UserSession};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Audience of access tokens.
const ACCOUNT_AUDIENCE: &str = "account";

/// Fixed claim names that a merged profile field must not shadow.
const RESERVED_CLAIMS: [&str; 10] = [
    "iss",
    "aud",
    "typ",
    "scope",
    "jti",
    "iat",
    "exp",
    "sub",
    "session_id",
    "session_state",
];

/// The claim set of an access or refresh token.
///
/// Constructed fresh on every issuance and immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Issuer, the realm base URL.
    pub iss: String,
    /// Audience: `"account"` for access tokens, the issuer for refresh
    /// tokens.
    pub aud: String,
    /// Token type, e.g. `Bearer` or `Refresh`.
    pub typ: String,
    /// Verification scope.
    pub scope: String,
    /// Fresh random token id.
    pub jti: Uuid,
    /// Issued-at, taken from the session start (Unix timestamp).
    pub iat: i64,
    /// Expiry, taken from the session expiry (Unix timestamp).
    pub exp: i64,
    /// Subject, the session's user id.
    pub sub: Uuid,
    /// Owning session id.
    pub session_id: Uuid,
    /// Session state, equal to the session id.
    pub session_state: Uuid,
    /// Merged user profile fields (access tokens only).
    #[serde(flatten)]
    pub profile: Map<String, Value>,
}

impl TokenClaims {
    /// Builds the claim set of an access token, merging the user's full
    /// profile document.
    #[must_use]
    pub fn access(
        realm_base_url: &str,
        token_type: &str,
        scope: &str,
        session: &UserSession,
        user: &User,
    ) -> Self {
        let mut claims = Self::common(realm_base_url, ACCOUNT_AUDIENCE, token_type, scope, session);
        claims.merge_profile(user);
        claims
    }

    /// Builds the claim set of a refresh token. No profile is merged.
    #[must_use]
    pub fn refresh(realm_base_url: &str, token_type: &str, scope: &str, session: &UserSession) -> Self {
        Self::common(realm_base_url, realm_base_url, token_type, scope, session)
    }

    fn common(issuer: &str, audience: &str, token_type: &str, scope: &str, session: &UserSession) -> Self {
        Self {
            iss: issuer.to_string(),
            aud: audience.to_string(),
            typ: token_type.to_string(),
            scope: scope.to_string(),
            jti: Uuid::new_v4(),
            iat: session.started.timestamp(),
            exp: session.expired.timestamp(),
            sub: session.user_id,
            session_id: session.id,
            session_state: session.id,
            profile: Map::new(),
        }
    }

    fn merge_profile(&mut self, user: &User) {
        let Some(fields) = user.document().as_object() else {
            return;
        };
        for (key, value) in fields {
            if RESERVED_CLAIMS.contains(&key.as_str()) {
                tracing::warn!(claim = %key, "profile field shadows a fixed claim; dropped");
                continue;
            }
            self.profile.insert(key.clone(), value.clone());
        }
    }
}
