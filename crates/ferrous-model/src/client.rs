//! Client domain model.
//!
//! Clients represent applications registered under a realm. A client is
//! identified by an immutable UUID and a name that is unique only within
//! its realm, so a client record is always addressed as (realm, name).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// OAuth 2.0 client type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientType {
    /// Public client (cannot keep secrets, e.g. SPAs, mobile apps).
    #[default]
    Public,
    /// Confidential client (can keep secrets).
    Confidential,
}

/// Scheme used by a client to authenticate itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuthenticationType {
    /// Client id plus shared secret.
    #[default]
    ClientIdAndSecret,
}

/// Authentication descriptor of a client.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Authentication {
    /// Authentication scheme.
    #[serde(rename = "type")]
    pub auth_type: AuthenticationType,
    /// Secret material for the scheme (e.g. the client secret).
    pub value: String,
}

/// An application registered under a realm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    /// Immutable identity of the client.
    pub id: Uuid,
    /// Name, unique within the owning realm. Mutable.
    pub name: String,
    /// Client type.
    #[serde(rename = "type")]
    pub client_type: ClientType,
    /// How the client authenticates.
    pub auth: Authentication,
}

impl Client {
    /// Creates a client with a fresh identity and an empty secret.
    #[must_use]
    pub fn new(name: impl Into<String>, client_type: ClientType) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            client_type,
            auth: Authentication::default(),
        }
    }

    /// Sets the authentication secret.
    #[must_use]
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.auth.value = secret.into();
        self
    }
}
