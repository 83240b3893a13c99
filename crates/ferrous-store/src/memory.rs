//! In-memory key-value store.
//!
//! Mirrors the observable semantics of the Redis backend, including
//! auto-deletion of lists that become empty. Used by the test suites and
//! embeddable for local development.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::error::{StoreError, StoreResult};
use crate::kv::KvStore;

#[derive(Debug, Clone)]
enum Entry {
    Value(String),
    List(Vec<String>),
}

/// A `Mutex<HashMap>`-backed [`KvStore`].
#[derive(Debug, Default)]
pub struct MemoryKvStore {
    entries: Mutex<HashMap<String, Entry>>,
}

impl MemoryKvStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, Entry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn wrong_type(key: &str) -> StoreError {
        StoreError::Unavailable(format!("wrong value kind for key \"{key}\""))
    }
}

#[async_trait]
impl KvStore for MemoryKvStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        match self.entries().get(key) {
            None => Ok(None),
            Some(Entry::Value(value)) => Ok(Some(value.clone())),
            Some(Entry::List(_)) => Err(Self::wrong_type(key)),
        }
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.entries()
            .insert(key.to_string(), Entry::Value(value.to_string()));
        Ok(())
    }

    async fn delete(&self, key: &str) -> StoreResult<bool> {
        Ok(self.entries().remove(key).is_some())
    }

    async fn list_append(&self, key: &str, element: &str) -> StoreResult<()> {
        let mut entries = self.entries();
        match entries
            .entry(key.to_string())
            .or_insert_with(|| Entry::List(Vec::new()))
        {
            Entry::List(list) => {
                list.push(element.to_string());
                Ok(())
            }
            Entry::Value(_) => Err(Self::wrong_type(key)),
        }
    }

    async fn list_read(&self, key: &str) -> StoreResult<Vec<String>> {
        match self.entries().get(key) {
            None => Ok(Vec::new()),
            Some(Entry::List(list)) => Ok(list.clone()),
            Some(Entry::Value(_)) => Err(Self::wrong_type(key)),
        }
    }

    async fn list_remove(&self, key: &str, element: &str) -> StoreResult<u64> {
        let mut entries = self.entries();
        let Some(entry) = entries.get_mut(key) else {
            return Ok(0);
        };
        let Entry::List(list) = entry else {
            return Err(Self::wrong_type(key));
        };
        let before = list.len();
        list.retain(|e| e != element);
        let removed = before - list.len();
        if list.is_empty() {
            entries.remove(key);
        }
        Ok(removed as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_overwrites_without_error() {
        let store = MemoryKvStore::new();
        store.set("k", "one").await.unwrap();
        store.set("k", "two").await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), Some("two".to_string()));
    }

    #[tokio::test]
    async fn delete_reports_absence() {
        let store = MemoryKvStore::new();
        store.set("k", "v").await.unwrap();
        assert!(store.delete("k").await.unwrap());
        assert!(!store.delete("k").await.unwrap());
        assert_eq!(store.get("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn list_append_and_read_preserve_order() {
        let store = MemoryKvStore::new();
        store.list_append("l", "a").await.unwrap();
        store.list_append("l", "b").await.unwrap();
        store.list_append("l", "c").await.unwrap();
        assert_eq!(store.list_read("l").await.unwrap(), vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn list_remove_drops_equal_elements_only() {
        let store = MemoryKvStore::new();
        for e in ["a", "b", "a", "c"] {
            store.list_append("l", e).await.unwrap();
        }
        assert_eq!(store.list_remove("l", "a").await.unwrap(), 2);
        assert_eq!(store.list_read("l").await.unwrap(), vec!["b", "c"]);
        assert_eq!(store.list_remove("l", "missing").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn emptied_list_key_is_removed() {
        let store = MemoryKvStore::new();
        store.list_append("l", "a").await.unwrap();
        store.list_remove("l", "a").await.unwrap();
        assert_eq!(store.list_read("l").await.unwrap(), Vec::<String>::new());
        assert!(!store.delete("l").await.unwrap());
    }

    #[tokio::test]
    async fn list_read_of_absent_key_is_empty() {
        let store = MemoryKvStore::new();
        assert!(store.list_read("missing").await.unwrap().is_empty());
    }
}
