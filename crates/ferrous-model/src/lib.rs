//! # ferrous-model
//!
//! Domain models for the ferrous authorization server (Realm, Client, User, sessions).
//!
//! This crate defines the core tenant entities shared by the store and
//! token crates. Entities are plain `serde`-serializable values; all
//! persistence logic lives in `ferrous-store`.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod client;
pub mod realm;
pub mod session;
pub mod user;

pub use client::{Authentication, AuthenticationType, Client, ClientType};
pub use realm::{EntityRef, Realm};
pub use session::UserSession;
pub use user::User;
