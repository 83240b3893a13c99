//! Key-value primitives.
//!
//! [`KvStore`] is the minimal surface the data manager needs from the
//! backing store: plain values plus list-valued keys holding one encoded
//! element per slot. Implementations must be safe for concurrent use;
//! transport failures surface as [`StoreError::Unavailable`] and are
//! never swallowed past this layer.
//!
//! [`StoreError::Unavailable`]: crate::error::StoreError::Unavailable

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::StoreResult;

/// Primitive operations against the backing key-value store.
///
/// Keys are fully formed by the caller (see [`KeySpace`]); values are
/// UTF-8 encoded JSON documents.
///
/// [`KeySpace`]: crate::keys::KeySpace
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Reads a value. `None` when the key is absent.
    async fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Writes a value. An existing value is silently replaced.
    async fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Deletes a key. `false` when the key was absent.
    async fn delete(&self, key: &str) -> StoreResult<bool>;

    /// Appends one element to a list-valued key, creating it if absent.
    async fn list_append(&self, key: &str, element: &str) -> StoreResult<()>;

    /// Reads all elements of a list-valued key, in order. Empty when the
    /// key is absent.
    async fn list_read(&self, key: &str) -> StoreResult<Vec<String>>;

    /// Atomically removes every element byte-equal to `element`,
    /// returning the number removed. Unlike a read-filter-rewrite of the
    /// whole list, this cannot race another writer's append or removal.
    async fn list_remove(&self, key: &str, element: &str) -> StoreResult<u64>;
}

#[async_trait]
impl<S: KvStore + ?Sized> KvStore for Arc<S> {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value).await
    }

    async fn delete(&self, key: &str) -> StoreResult<bool> {
        (**self).delete(key).await
    }

    async fn list_append(&self, key: &str, element: &str) -> StoreResult<()> {
        (**self).list_append(key, element).await
    }

    async fn list_read(&self, key: &str) -> StoreResult<Vec<String>> {
        (**self).list_read(key).await
    }

    async fn list_remove(&self, key: &str, element: &str) -> StoreResult<u64> {
        (**self).list_remove(key, element).await
    }
}
