//! User session model.
//!
//! Session lifecycle is owned by an external session manager; this crate
//! only defines the value consumed by token issuance.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An authenticated user session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSession {
    /// Unique session identifier.
    pub id: Uuid,
    /// User who owns this session.
    pub user_id: Uuid,
    /// When the session was started.
    pub started: DateTime<Utc>,
    /// When the session expires.
    pub expired: DateTime<Utc>,
}

impl UserSession {
    /// Creates a session starting now with the given lifetime.
    #[must_use]
    pub fn new(user_id: Uuid, lifetime: Duration) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            started: now,
            expired: now + lifetime,
        }
    }
}
