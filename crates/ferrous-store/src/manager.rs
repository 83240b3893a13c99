//! CRUD and consistency logic for realms, clients and users.
//!
//! Every entity is one JSON value under its own key. Each realm
//! additionally keeps two list-valued indexes: its client memberships
//! and its user entries, both holding lightweight `{id, name}`
//! projections ([`EntityRef`]). The store has no transactions, so
//! multi-key sequences here are individually-ordered round-trips:
//! records are written before index entries and deleted before index
//! entries are removed. Index removal uses the store's atomic
//! [`list_remove`](crate::kv::KvStore::list_remove), so a removal never
//! rewrites the whole list and cannot clobber a concurrent writer's
//! change. A record write whose index append fails is left behind and
//! is repaired by the next delete of the same name.

use ferrous_model::{Client, EntityRef, Realm, User};
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use crate::error::{OpContext, StoreError, StoreResult};
use crate::keys::KeySpace;
use crate::kv::KvStore;

/// Key-value-backed manager of tenant data.
#[derive(Debug)]
pub struct DataManager<S> {
    store: S,
    keys: KeySpace,
}

impl<S: KvStore> DataManager<S> {
    /// Creates a manager over `store`, scoping every key by `keys`.
    pub const fn new(store: S, keys: KeySpace) -> Self {
        Self { store, keys }
    }

    /// Returns the key space used by this manager.
    #[must_use]
    pub const fn keys(&self) -> &KeySpace {
        &self.keys
    }

    // === Realms ===

    /// Reads a realm by name.
    ///
    /// ## Errors
    ///
    /// [`StoreError::NotFound`] when the realm key is absent or its
    /// record is undecodable.
    pub async fn get_realm(&self, name: &str) -> StoreResult<Realm> {
        self.get_json("realm", &self.keys.realm(name), &format!("realm \"{name}\""))
            .await
            .in_op("get_realm")
    }

    /// Creates a realm, bulk-seeding the clients and users embedded in
    /// the realm value. The persisted realm record carries neither seed
    /// list; they live under their own keys.
    ///
    /// ## Errors
    ///
    /// [`StoreError::AlreadyExists`] when a realm of that name exists.
    pub async fn create_realm(&self, realm: &Realm) -> StoreResult<()> {
        let realm_key = self.keys.realm(&realm.name);
        if self.store.get(&realm_key).await.in_op("create_realm")?.is_some() {
            return Err(StoreError::AlreadyExists(format!("realm \"{}\"", realm.name)).op("create_realm"));
        }

        let record = Realm {
            clients: Vec::new(),
            users: Vec::new(),
            ..realm.clone()
        };
        self.set_json("realm", &realm_key, &record)
            .await
            .in_op("create_realm")?;

        for client in &realm.clients {
            self.seed_client(&realm.name, client).await.in_op("create_realm")?;
        }
        for user in &realm.users {
            self.seed_user(&realm.name, user).await.in_op("create_realm")?;
        }
        Ok(())
    }

    /// Deletes a realm together with every client and user it indexes.
    ///
    /// ## Errors
    ///
    /// [`StoreError::NotFound`] when the realm record is absent. Missing
    /// or empty indexes are tolerated.
    pub async fn delete_realm(&self, name: &str) -> StoreResult<()> {
        let realm_key = self.keys.realm(name);
        if self.store.get(&realm_key).await.in_op("delete_realm")?.is_none() {
            return Err(StoreError::NotFound(format!("realm \"{name}\"")).op("delete_realm"));
        }

        let clients_key = self.keys.realm_clients(name);
        for entry in self.read_refs(&clients_key).await.in_op("delete_realm")? {
            self.store
                .delete(&self.keys.client(name, &entry.name))
                .await
                .in_op("delete_realm")?;
        }

        let users_key = self.keys.realm_users(name);
        for entry in self.read_refs(&users_key).await.in_op("delete_realm")? {
            self.store
                .delete(&self.keys.user(name, &entry.name))
                .await
                .in_op("delete_realm")?;
        }

        self.store.delete(&clients_key).await.in_op("delete_realm")?;
        self.store.delete(&users_key).await.in_op("delete_realm")?;
        self.store.delete(&realm_key).await.in_op("delete_realm")?;
        Ok(())
    }

    // === Clients ===

    /// Reads a client and verifies it is a member of the realm's client
    /// index. A record without a membership entry is reported absent,
    /// with a data-integrity warning.
    ///
    /// ## Errors
    ///
    /// [`StoreError::NotFound`] when the record or its membership entry
    /// is missing.
    pub async fn get_client(&self, realm: &str, name: &str) -> StoreResult<Client> {
        let client = self.fetch_client(realm, name).await.in_op("get_client")?;

        let members = self
            .read_refs(&self.keys.realm_clients(realm))
            .await
            .in_op("get_client")?;
        if !members.iter().any(|m| m.name == name) {
            tracing::warn!(realm, client = name, "client record has no membership entry");
            return Err(
                StoreError::NotFound(format!("client \"{name}\" in realm \"{realm}\"")).op("get_client"),
            );
        }
        Ok(client)
    }

    /// Reads every client of a realm by resolving its membership index.
    ///
    /// ## Errors
    ///
    /// [`StoreError::ZeroLength`] when the index is empty or absent, and
    /// a `NotFound`-wrapping error when a membership entry has no
    /// corresponding record (logged as a data-integrity failure).
    pub async fn get_clients_from_realm(&self, realm: &str) -> StoreResult<Vec<Client>> {
        let members = self
            .realm_clients(realm)
            .await
            .in_op("get_clients_from_realm")?;

        let mut clients = Vec::with_capacity(members.len());
        for member in members {
            let client = self.fetch_client(realm, &member.name).await.map_err(|err| {
                if err.is_not_found() {
                    tracing::error!(
                        realm,
                        client = %member.name,
                        "membership entry has no client record"
                    );
                }
                err.op("get_clients_from_realm")
            })?;
            clients.push(client);
        }
        Ok(clients)
    }

    /// Creates a client in a realm: writes the record, then appends its
    /// membership entry.
    ///
    /// ## Errors
    ///
    /// [`StoreError::AlreadyExists`] when the (realm, name) pair is
    /// taken, [`StoreError::NotFound`] when the realm does not exist.
    pub async fn create_client(&self, realm: &str, client: &Client) -> StoreResult<()> {
        match self.fetch_client(realm, &client.name).await {
            Ok(_) => {
                return Err(StoreError::AlreadyExists(format!(
                    "client \"{}\" in realm \"{realm}\"",
                    client.name
                ))
                .op("create_client"));
            }
            Err(err) if err.is_not_found() => {}
            Err(err) => return Err(err.op("create_client")),
        }
        self.get_realm(realm).await.in_op("create_client")?;

        self.seed_client(realm, client).await.in_op("create_client")
    }

    /// Updates a client addressed by its current name.
    ///
    /// An identity or name change is a full delete of the old client
    /// (record and membership entry) followed by a create of the new
    /// one. Otherwise the record is overwritten in place and the
    /// membership entry stays valid.
    ///
    /// ## Errors
    ///
    /// [`StoreError::NotFound`] when no client of that name exists.
    pub async fn update_client(&self, realm: &str, name: &str, client: &Client) -> StoreResult<()> {
        let old = self.get_client(realm, name).await.in_op("update_client")?;

        if client.id != old.id || client.name != old.name {
            self.delete_client(realm, name).await.in_op("update_client")?;
            self.create_client(realm, client).await.in_op("update_client")?;
        } else {
            self.set_json("client", &self.keys.client(realm, &client.name), client)
                .await
                .in_op("update_client")?;
        }
        Ok(())
    }

    /// Deletes a client record and removes its membership entry.
    ///
    /// Idempotent: an absent record, an absent index and a
    /// missing membership entry are all non-error outcomes.
    pub async fn delete_client(&self, realm: &str, name: &str) -> StoreResult<()> {
        self.store
            .delete(&self.keys.client(realm, name))
            .await
            .in_op("delete_client")?;
        self.remove_ref(&self.keys.realm_clients(realm), name)
            .await
            .in_op("delete_client")
    }

    // === Users ===

    /// Reads a user document by name.
    ///
    /// ## Errors
    ///
    /// [`StoreError::NotFound`] when the user key is absent.
    pub async fn get_user(&self, realm: &str, name: &str) -> StoreResult<User> {
        self.get_json(
            "user",
            &self.keys.user(realm, name),
            &format!("user \"{name}\" in realm \"{realm}\""),
        )
        .await
        .in_op("get_user")
    }

    /// Reads every user of a realm by resolving its user index.
    ///
    /// ## Errors
    ///
    /// [`StoreError::ZeroLength`] when the index is empty or absent, and
    /// a `NotFound`-wrapping error for a dangling index entry.
    pub async fn get_users(&self, realm: &str) -> StoreResult<Vec<User>> {
        let entries = self
            .read_refs(&self.keys.realm_users(realm))
            .await
            .in_op("get_users")?;
        if entries.is_empty() {
            return Err(StoreError::ZeroLength(format!("user list of realm \"{realm}\"")).op("get_users"));
        }

        let mut users = Vec::with_capacity(entries.len());
        for entry in entries {
            let user = self.get_user(realm, &entry.name).await.map_err(|err| {
                if err.is_not_found() {
                    tracing::error!(realm, user = %entry.name, "user index entry has no user record");
                }
                err.op("get_users")
            })?;
            users.push(user);
        }
        Ok(users)
    }

    /// Creates a user in a realm: writes the document, then appends its
    /// index entry. The document must carry a `preferred_username`.
    ///
    /// ## Errors
    ///
    /// [`StoreError::AlreadyExists`] when the username is taken,
    /// [`StoreError::NotFound`] when the realm does not exist,
    /// [`StoreError::Decode`] when the document has no username.
    pub async fn create_user(&self, realm: &str, user: &User) -> StoreResult<()> {
        let name = Self::username(user).in_op("create_user")?;
        match self.get_user(realm, name).await {
            Ok(_) => {
                return Err(
                    StoreError::AlreadyExists(format!("user \"{name}\" in realm \"{realm}\""))
                        .op("create_user"),
                );
            }
            Err(err) if err.is_not_found() => {}
            Err(err) => return Err(err.op("create_user")),
        }
        self.get_realm(realm).await.in_op("create_user")?;

        self.seed_user(realm, user).await.in_op("create_user")
    }

    /// Deletes a user document and removes its index entry.
    ///
    /// Idempotent on a missing record or index entry.
    pub async fn delete_user(&self, realm: &str, name: &str) -> StoreResult<()> {
        self.store
            .delete(&self.keys.user(realm, name))
            .await
            .in_op("delete_user")?;
        self.remove_ref(&self.keys.realm_users(realm), name)
            .await
            .in_op("delete_user")
    }

    // === Helpers ===

    /// Reads the realm's client index, distinguishing an empty/absent
    /// index ([`StoreError::ZeroLength`]) from other failures.
    async fn realm_clients(&self, realm: &str) -> StoreResult<Vec<EntityRef>> {
        let entries = self
            .read_refs(&self.keys.realm_clients(realm))
            .await
            .in_op("realm_clients")?;
        if entries.is_empty() {
            tracing::warn!(realm, "realm has no clients in the store");
            return Err(
                StoreError::ZeroLength(format!("client list of realm \"{realm}\"")).op("realm_clients"),
            );
        }
        Ok(entries)
    }

    /// Reads a client record without membership verification.
    async fn fetch_client(&self, realm: &str, name: &str) -> StoreResult<Client> {
        self.get_json(
            "client",
            &self.keys.client(realm, name),
            &format!("client \"{name}\" in realm \"{realm}\""),
        )
        .await
        .in_op("fetch_client")
    }

    /// Writes a client record and appends its membership entry.
    async fn seed_client(&self, realm: &str, client: &Client) -> StoreResult<()> {
        self.set_json("client", &self.keys.client(realm, &client.name), client)
            .await?;
        let entry = encode("client membership", &EntityRef::from(client))?;
        self.store
            .list_append(&self.keys.realm_clients(realm), &entry)
            .await
    }

    /// Writes a user document and appends its index entry.
    async fn seed_user(&self, realm: &str, user: &User) -> StoreResult<()> {
        let name = Self::username(user)?;
        self.set_json("user", &self.keys.user(realm, name), user).await?;
        let entry = encode(
            "user index entry",
            &EntityRef {
                id: user.id().unwrap_or_else(Uuid::new_v4),
                name: name.to_string(),
            },
        )?;
        self.store
            .list_append(&self.keys.realm_users(realm), &entry)
            .await
    }

    /// Removes every index entry whose name matches, by atomically
    /// removing each matched element's exact stored form.
    async fn remove_ref(&self, key: &str, name: &str) -> StoreResult<()> {
        for raw in self.store.list_read(key).await? {
            match serde_json::from_str::<EntityRef>(&raw) {
                Ok(entry) if entry.name == name => {
                    self.store.list_remove(key, &raw).await?;
                }
                Ok(_) => {}
                Err(err) => {
                    tracing::error!(key, %err, "malformed index entry");
                }
            }
        }
        Ok(())
    }

    /// Reads and decodes a whole `{id, name}` index. Empty when the key
    /// is absent.
    async fn read_refs(&self, key: &str) -> StoreResult<Vec<EntityRef>> {
        let raw = self.store.list_read(key).await?;
        let mut entries = Vec::with_capacity(raw.len());
        for element in raw {
            let entry = serde_json::from_str::<EntityRef>(&element).map_err(|err| {
                tracing::error!(key, %err, "malformed index entry");
                StoreError::Decode(format!("index entry of \"{key}\": {err}"))
            })?;
            entries.push(entry);
        }
        Ok(entries)
    }

    /// Reads one JSON record. An undecodable record is logged at error
    /// level and reported as [`StoreError::NotFound`]: it is unusable to
    /// the caller either way.
    async fn get_json<T: DeserializeOwned>(
        &self,
        kind: &'static str,
        key: &str,
        entity: &str,
    ) -> StoreResult<T> {
        let Some(raw) = self.store.get(key).await? else {
            return Err(StoreError::NotFound(entity.to_string()));
        };
        serde_json::from_str(&raw).map_err(|err| {
            tracing::error!(kind, key, %err, "stored record failed to decode");
            StoreError::NotFound(entity.to_string())
        })
    }

    /// Writes one JSON record, silently replacing any existing value.
    async fn set_json<T: Serialize>(&self, kind: &'static str, key: &str, value: &T) -> StoreResult<()> {
        let raw = encode(kind, value)?;
        self.store.set(key, &raw).await
    }

    fn username(user: &User) -> StoreResult<&str> {
        user.username().ok_or_else(|| {
            StoreError::Decode("user document has no preferred_username".to_string())
        })
    }
}

fn encode<T: Serialize>(kind: &'static str, value: &T) -> StoreResult<String> {
    serde_json::to_string(value).map_err(|err| {
        tracing::error!(kind, %err, "value failed to encode");
        StoreError::Decode(format!("{kind} encode: {err}"))
    })
}
