use crate::domain::ports::FlagStore;
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory store for session flags.
///
/// Uses `Arc<RwLock<HashMap<String, String>>>` to allow shared concurrent
/// access. Stands in for the device's secure key-value store, which is out of
/// scope; session flags do not outlive the process.
#[derive(Default, Clone)]
pub struct InMemoryFlagStore {
    flags: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryFlagStore {
    /// Creates a new, empty in-memory flag store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FlagStore for InMemoryFlagStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let flags = self.flags.read().await;
        Ok(flags.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut flags = self.flags.write().await;
        flags.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_flag_store_roundtrip() {
        let store = InMemoryFlagStore::new();
        assert!(store.get("active_tab").await.unwrap().is_none());

        store.set("active_tab", "coupons").await.unwrap();
        assert_eq!(
            store.get("active_tab").await.unwrap().as_deref(),
            Some("coupons")
        );

        store.set("active_tab", "money").await.unwrap();
        assert_eq!(
            store.get("active_tab").await.unwrap().as_deref(),
            Some("money")
        );
    }
}
