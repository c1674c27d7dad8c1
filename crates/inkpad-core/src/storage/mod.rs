//! Storage abstraction for persistence.

mod file;
pub mod format;
mod memory;

pub use file::{FileStorage, load_path, save_path};
pub use format::{from_json, to_json};
pub use memory::MemoryStorage;

use crate::document::Document;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Document not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Malformed record {index}: {reason}")]
    MalformedRecord { index: usize, reason: String },
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for document storage backends.
///
/// Calls are synchronous; documents are small enough to read and write on
/// the interaction thread.
pub trait Storage: Send + Sync {
    /// Save a document.
    fn save(&self, name: &str, document: &Document) -> StorageResult<()>;

    /// Load a document.
    fn load(&self, name: &str) -> StorageResult<Document>;

    /// Delete a document.
    fn delete(&self, name: &str) -> StorageResult<()>;

    /// List all document names.
    fn list(&self) -> StorageResult<Vec<String>>;

    /// Check if a document exists.
    fn exists(&self, name: &str) -> StorageResult<bool>;
}
