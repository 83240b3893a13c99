//! Realm domain model.
//!
//! A realm is the tenant boundary: it owns its clients and users and
//! carries its own token expirations. The `clients` and `users` vectors
//! are creation-time seed payloads; once a realm is stored, its clients
//! and users live under their own keys and the persisted realm record
//! carries neither.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::client::Client;
use crate::user::User;

/// A tenant boundary owning clients and users.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Realm {
    /// Globally unique realm name. Primary key, non-empty.
    pub name: String,
    /// Access token expiration in seconds. Must be positive.
    pub token_expiration: i64,
    /// Refresh token expiration in seconds. Must be positive.
    pub refresh_token_expiration: i64,
    /// Clients to seed when the realm is created.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub clients: Vec<Client>,
    /// Users to seed when the realm is created.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub users: Vec<User>,
}

impl Realm {
    /// Creates a realm with no seed clients or users.
    #[must_use]
    pub fn new(name: impl Into<String>, token_expiration: i64, refresh_token_expiration: i64) -> Self {
        Self {
            name: name.into(),
            token_expiration,
            refresh_token_expiration,
            clients: Vec::new(),
            users: Vec::new(),
        }
    }

    /// Adds a client to the creation-time seed payload.
    #[must_use]
    pub fn with_client(mut self, client: Client) -> Self {
        self.clients.push(client);
        self
    }

    /// Adds a user to the creation-time seed payload.
    #[must_use]
    pub fn with_user(mut self, user: User) -> Self {
        self.users.push(user);
        self
    }
}

/// Lightweight `{id, name}` projection stored in a realm's client and
/// user indexes instead of the full records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRef {
    /// Identity of the referenced entity.
    pub id: Uuid,
    /// Realm-unique name of the referenced entity.
    pub name: String,
}

impl From<&Client> for EntityRef {
    fn from(client: &Client) -> Self {
        Self {
            id: client.id,
            name: client.name.clone(),
        }
    }
}
