//! In-memory storage implementation.

use super::{Storage, StorageError, StorageResult, format};
use crate::document::Document;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory storage for testing and ephemeral use.
///
/// Documents are kept in their serialized form, so loading goes through the
/// same validation as reading a file.
#[derive(Default)]
pub struct MemoryStorage {
    documents: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create a new empty memory storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store raw JSON under `name`, bypassing serialization.
    pub fn insert_raw(&self, name: &str, json: impl Into<String>) -> StorageResult<()> {
        let mut docs = self
            .documents
            .write()
            .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
        docs.insert(name.to_string(), json.into());
        Ok(())
    }

    /// The raw JSON stored under `name`.
    pub fn raw(&self, name: &str) -> StorageResult<String> {
        let docs = self
            .documents
            .read()
            .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
        docs.get(name)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(name.to_string()))
    }
}

impl Storage for MemoryStorage {
    fn save(&self, name: &str, document: &Document) -> StorageResult<()> {
        let json = format::to_json(document)?;
        self.insert_raw(name, json)
    }

    fn load(&self, name: &str) -> StorageResult<Document> {
        format::from_json(&self.raw(name)?)
    }

    fn delete(&self, name: &str) -> StorageResult<()> {
        let mut docs = self
            .documents
            .write()
            .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
        docs.remove(name);
        Ok(())
    }

    fn list(&self) -> StorageResult<Vec<String>> {
        let docs = self
            .documents
            .read()
            .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
        Ok(docs.keys().cloned().collect())
    }

    fn exists(&self, name: &str) -> StorageResult<bool> {
        let docs = self
            .documents
            .read()
            .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
        Ok(docs.contains_key(name))
    }
}
