//! HS256 token signing.

use ferrous_model::{User, UserSession};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};

use crate::claims::TokenClaims;
use crate::error::{TokenError, TokenResult};

/// Signs access and refresh tokens with an HMAC-SHA256 key.
///
/// Output is the compact form: three dot-separated base64url segments
/// (header, claims, signature).
pub struct JwtIssuer {
    key: EncodingKey,
}

impl std::fmt::Debug for JwtIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtIssuer")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

impl JwtIssuer {
    /// Creates an issuer from the raw signing key.
    #[must_use]
    pub fn new(sign_key: &[u8]) -> Self {
        Self {
            key: EncodingKey::from_secret(sign_key),
        }
    }

    /// Generates a signed access token embedding the user's full profile
    /// document next to the fixed claims.
    ///
    /// ## Errors
    ///
    /// Returns [`TokenError::Signing`] when signing fails.
    pub fn generate_access_token(
        &self,
        realm_base_url: &str,
        token_type: &str,
        scope: &str,
        session: &UserSession,
        user: &User,
    ) -> TokenResult<String> {
        self.sign(&TokenClaims::access(
            realm_base_url,
            token_type,
            scope,
            session,
            user,
        ))
    }

    /// Generates a signed refresh token carrying the fixed claims only.
    ///
    /// ## Errors
    ///
    /// Returns [`TokenError::Signing`] when signing fails.
    pub fn generate_refresh_token(
        &self,
        realm_base_url: &str,
        token_type: &str,
        scope: &str,
        session: &UserSession,
    ) -> TokenResult<String> {
        self.sign(&TokenClaims::refresh(realm_base_url, token_type, scope, session))
    }

    fn sign(&self, claims: &TokenClaims) -> TokenResult<String> {
        encode(&Header::new(Algorithm::HS256), claims, &self.key).map_err(|err| {
            tracing::error!(%err, "token signing failed");
            TokenError::Signing(err.to_string())
        })
    }
}
