//! User domain model.
//!
//! Users are opaque JSON documents rather than fixed structs: callers may
//! store arbitrary profile fields and they must survive storage and token
//! issuance byte-for-byte. The only field this crate interprets is
//! `preferred_username`, which may sit at the top level or nested under
//! an `info` object.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// An opaque user profile document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct User(Value);

impl User {
    /// Wraps a raw profile document.
    #[must_use]
    pub const fn new(document: Value) -> Self {
        Self(document)
    }

    /// Returns the raw profile document.
    #[must_use]
    pub const fn document(&self) -> &Value {
        &self.0
    }

    /// Returns the user's `preferred_username`, looked up at the top
    /// level first and under `info` second.
    #[must_use]
    pub fn username(&self) -> Option<&str> {
        if let Some(name) = self.0.get("preferred_username").and_then(Value::as_str) {
            return Some(name);
        }
        self.0
            .get("info")
            .and_then(|info| info.get("preferred_username"))
            .and_then(Value::as_str)
    }

    /// Returns the user's id when the document carries one.
    #[must_use]
    pub fn id(&self) -> Option<Uuid> {
        let raw = self
            .0
            .get("id")
            .or_else(|| self.0.get("info").and_then(|info| info.get("id")))?;
        raw.as_str().and_then(|s| Uuid::parse_str(s).ok())
    }
}

impl From<Value> for User {
    fn from(document: Value) -> Self {
        Self(document)
    }
}
