//! # ferrous-store
//!
//! Key-value-backed tenant data for the ferrous authorization server.
//!
//! Realms, clients and users are stored as individual JSON values under
//! deterministic keys, with per-realm client and user indexes kept as
//! list-valued keys (one JSON element per slot). The store has no native
//! transactions, so the [`DataManager`] is responsible for keeping the
//! indexes consistent with the individual records.
//!
//! ## Modules
//!
//! - [`config`] - data source connection configuration
//! - [`error`] - store error taxonomy
//! - [`keys`] - deterministic key templates
//! - [`kv`] - the [`KvStore`] primitive trait
//! - [`manager`] - CRUD and consistency logic for tenant entities
//! - [`memory`] - in-memory [`KvStore`] for tests and development
//! - [`redis`] - Redis [`KvStore`] built on `fred`

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod config;
pub mod error;
pub mod keys;
pub mod kv;
pub mod manager;
pub mod memory;
pub mod redis;

pub use config::DataSourceConfig;
pub use error::{StoreError, StoreResult};
pub use keys::KeySpace;
pub use kv::KvStore;
pub use manager::DataManager;
pub use memory::MemoryKvStore;
pub use redis::RedisKvStore;
