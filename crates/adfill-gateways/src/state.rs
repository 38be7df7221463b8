//! Durable key-value state port
//!
//! The only state surviving between invocations: the resume cursor and the
//! run-start timestamp. Plain get/set/delete with no race protection —
//! invocations are serialized by the trigger mechanism, so none is needed.

use crate::error::GatewayError;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;

/// Durable key-value store
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Read a value, `None` if the key is absent
    async fn get(&self, key: &str) -> Result<Option<String>, GatewayError>;

    /// Write a value, overwriting any previous one
    async fn set(&self, key: &str, value: &str) -> Result<(), GatewayError>;

    /// Delete a key (no-op if absent)
    async fn delete(&self, key: &str) -> Result<(), GatewayError>;
}

/// In-memory state adapter
///
/// Survives across `run()` calls within one process, which is exactly what
/// the simulator needs to exercise resume-across-invocations.
#[derive(Debug, Default)]
pub struct InMemoryStateStore {
    entries: Mutex<HashMap<String, String>>,
}

impl InMemoryStateStore {
    /// Create empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all entries (for assertions)
    #[inline]
    #[must_use]
    pub fn snapshot(&self) -> HashMap<String, String> {
        self.entries.lock().clone()
    }
}

#[async_trait]
impl StateStore for InMemoryStateStore {
    async fn get(&self, key: &str) -> Result<Option<String>, GatewayError> {
        Ok(self.entries.lock().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), GatewayError> {
        self.entries
            .lock()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), GatewayError> {
        self.entries.lock().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn get_set_delete_round_trip() {
        let store = InMemoryStateStore::new();

        assert_eq!(store.get("cursor").await.unwrap(), None);

        store.set("cursor", "42").await.unwrap();
        assert_eq!(store.get("cursor").await.unwrap(), Some("42".to_string()));

        store.set("cursor", "43").await.unwrap();
        assert_eq!(store.get("cursor").await.unwrap(), Some("43".to_string()));

        store.delete("cursor").await.unwrap();
        assert_eq!(store.get("cursor").await.unwrap(), None);
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let store = InMemoryStateStore::new();
        store.delete("missing").await.unwrap();
        store.delete("missing").await.unwrap();
    }
}
