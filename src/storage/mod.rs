//! The persistence adapter: a minimal get/set-by-key contract over text values, and a typed
//! wrapper that stores values as JSON.
//!
//! The ledger only depends on the `Storage` trait, so the medium can be swapped. `FileStorage`
//! keeps one file per key in a directory. `MemoryStorage` keeps everything in process.

mod file;
mod memory;

use crate::Result;
use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, trace, warn};

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// The key under which the transaction list is stored, newest first.
pub const TRANSACTIONS_KEY: &str = "transactions";

/// The key under which the savings goal is stored.
pub const SAVINGS_GOAL_KEY: &str = "savingsGoal";

/// A key-value store of text values.
#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// Returns the value stored under `key`, or `None` if nothing has been stored there.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Serializes values to JSON text on the way into a `Storage` and back out again.
#[derive(Debug, Clone)]
pub struct Persistence<S> {
    storage: S,
}

impl<S> Persistence<S>
where
    S: Storage,
{
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Serializes `value` and writes it under `key`.
    pub async fn save<T>(&self, key: &str, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        let text = serde_json::to_string(value)
            .with_context(|| format!("Unable to serialize the value for '{key}'"))?;
        trace!("Saving {} bytes under '{key}'", text.len());
        self.storage.set(key, &text).await
    }

    /// Reads and deserializes the value under `key`. A missing key, a read failure, or a value
    /// that does not deserialize all produce `None`.
    pub async fn load<T>(&self, key: &str) -> Option<T>
    where
        T: DeserializeOwned,
    {
        let text = match self.storage.get(key).await {
            Ok(Some(text)) => text,
            Ok(None) => {
                debug!("Nothing stored under '{key}'");
                return None;
            }
            Err(e) => {
                warn!("Unable to read '{key}', using the default: {e:#}");
                return None;
            }
        };
        match serde_json::from_str(&text) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("The value stored under '{key}' is malformed, using the default: {e}");
                None
            }
        }
    }
}
