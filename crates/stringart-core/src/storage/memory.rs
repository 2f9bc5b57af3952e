//! In-memory storage.

use super::{BoxFuture, Storage, StorageError, StorageResult, validate_name};
use std::collections::BTreeMap;
use std::sync::RwLock;

/// Ephemeral storage holding document text, e.g. for a session without a
/// filesystem or for tests.
#[derive(Default)]
pub struct MemoryStorage {
    documents: RwLock<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn read(&self, name: &str) -> BoxFuture<'_, StorageResult<String>> {
        let name = name.to_string();
        Box::pin(async move {
            let documents = self.documents.read().map_err(|_| StorageError::Poisoned)?;
            documents.get(&name).cloned().ok_or(StorageError::NotFound(name))
        })
    }

    fn write(&self, name: &str, json: String) -> BoxFuture<'_, StorageResult<()>> {
        let name = name.to_string();
        Box::pin(async move {
            validate_name(&name)?;
            let mut documents = self.documents.write().map_err(|_| StorageError::Poisoned)?;
            documents.insert(name, json);
            Ok(())
        })
    }

    fn remove(&self, name: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let name = name.to_string();
        Box::pin(async move {
            let mut documents = self.documents.write().map_err(|_| StorageError::Poisoned)?;
            Ok(documents.remove(&name).is_some())
        })
    }

    fn names(&self) -> BoxFuture<'_, StorageResult<Vec<String>>> {
        Box::pin(async move {
            let documents = self.documents.read().map_err(|_| StorageError::Poisoned)?;
            Ok(documents.keys().cloned().collect())
        })
    }
}
