//! Deterministic key templates for stored entities.
//!
//! The same logical identity always yields the same key, across
//! processes. Templates (namespace `{ns}`):
//!
//! - realm → `fe_realm_{ns}_{realm}`
//! - realm client index → `fe_realm_{ns}_{realm}_clients`
//! - realm user index → `fe_realm_{ns}_{realm}_users`
//! - client → `fe_client_{ns}_{realm}_{client}`
//! - user → `fe_user_{ns}_{realm}_{user}`

/// Key naming for one logical namespace.
#[derive(Debug, Clone)]
pub struct KeySpace {
    namespace: String,
}

impl KeySpace {
    /// Creates a key space for the given namespace.
    #[must_use]
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    /// Returns the namespace.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Key of a realm record.
    #[must_use]
    pub fn realm(&self, realm: &str) -> String {
        format!("fe_realm_{}_{realm}", self.namespace)
    }

    /// Key of a realm's client index list.
    #[must_use]
    pub fn realm_clients(&self, realm: &str) -> String {
        format!("fe_realm_{}_{realm}_clients", self.namespace)
    }

    /// Key of a realm's user index list.
    #[must_use]
    pub fn realm_users(&self, realm: &str) -> String {
        format!("fe_realm_{}_{realm}_users", self.namespace)
    }

    /// Key of a client record.
    #[must_use]
    pub fn client(&self, realm: &str, client: &str) -> String {
        format!("fe_client_{}_{realm}_{client}", self.namespace)
    }

    /// Key of a user record.
    #[must_use]
    pub fn user(&self, realm: &str, user: &str) -> String {
        format!("fe_user_{}_{realm}_{user}", self.namespace)
    }
}
