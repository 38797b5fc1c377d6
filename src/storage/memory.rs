use crate::storage::Storage;
use crate::Result;
use anyhow::anyhow;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// A `Storage` that holds values in memory. Clones share the same underlying map, which lets a
/// test reopen a ledger over the values a previous ledger saved.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    data: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the raw text stored under `key`.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.data.lock().ok()?.get(key).cloned()
    }
}

#[async_trait::async_trait]
impl Storage for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let data = self
            .data
            .lock()
            .map_err(|_| anyhow!("The in-memory storage lock is poisoned"))?;
        Ok(data.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut data = self
            .data
            .lock()
            .map_err(|_| anyhow!("The in-memory storage lock is poisoned"))?;
        data.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
