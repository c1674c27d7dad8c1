//! File-based storage implementation.

use super::{Storage, StorageError, StorageResult, format};
use crate::document::Document;
use std::fs;
use std::path::{Path, PathBuf};

/// File-based storage.
///
/// Stores documents as JSON files in a specified directory.
pub struct FileStorage {
    /// Base directory for document storage.
    base_path: PathBuf,
}

impl FileStorage {
    /// Create a new file storage with the given base directory.
    ///
    /// Creates the directory if it doesn't exist.
    pub fn new(base_path: PathBuf) -> StorageResult<Self> {
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(|e| {
                StorageError::Io(format!("Failed to create storage directory: {}", e))
            })?;
        }
        Ok(Self { base_path })
    }

    /// Get the file path for a document name.
    ///
    /// A trailing `.json` is optional; anything that is not a safe filename
    /// character becomes `_`.
    fn document_path(&self, name: &str) -> PathBuf {
        let stem = name.strip_suffix(".json").unwrap_or(name);
        let safe_name: String = stem
            .chars()
            .map(|c| {
                if c.is_alphanumeric() || c == '-' || c == '_' || c == ' ' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.base_path.join(format!("{}.json", safe_name))
    }

    /// Get the base path.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

/// Write `document` to an arbitrary path, as picked in a save dialog.
pub fn save_path(path: &Path, document: &Document) -> StorageResult<()> {
    let json = format::to_json(document)?;
    fs::write(path, json)
        .map_err(|e| StorageError::Io(format!("Failed to write {}: {}", path.display(), e)))?;
    log::info!("saved {} shapes to {}", document.len(), path.display());
    Ok(())
}

/// Read a document from an arbitrary path, as picked in an open dialog.
pub fn load_path(path: &Path) -> StorageResult<Document> {
    if !path.exists() {
        return Err(StorageError::NotFound(path.display().to_string()));
    }
    let json = fs::read_to_string(path)
        .map_err(|e| StorageError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
    let document = format::from_json(&json)?;
    log::info!("loaded {} shapes from {}", document.len(), path.display());
    Ok(document)
}

impl Storage for FileStorage {
    fn save(&self, name: &str, document: &Document) -> StorageResult<()> {
        save_path(&self.document_path(name), document)
    }

    fn load(&self, name: &str) -> StorageResult<Document> {
        let path = self.document_path(name);
        if !path.exists() {
            return Err(StorageError::NotFound(name.to_string()));
        }
        load_path(&path)
    }

    fn delete(&self, name: &str) -> StorageResult<()> {
        let path = self.document_path(name);
        if path.exists() {
            fs::remove_file(&path).map_err(|e| {
                StorageError::Io(format!("Failed to delete {}: {}", path.display(), e))
            })?;
        }
        Ok(())
    }

    fn list(&self) -> StorageResult<Vec<String>> {
        if !self.base_path.exists() {
            return Ok(vec![]);
        }

        let entries = fs::read_dir(&self.base_path)
            .map_err(|e| StorageError::Io(format!("Failed to read directory: {}", e)))?;

        let mut names = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().is_some_and(|e| e == "json") {
                if let Some(name) = path.file_stem().and_then(|s| s.to_str()) {
                    names.push(name.to_string());
                }
            }
        }
        Ok(names)
    }

    fn exists(&self, name: &str) -> StorageResult<bool> {
        Ok(self.document_path(name).exists())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Rectangle, Shape};
    use kurbo::Point;
    use tempfile::tempdir;

    fn sample() -> Document {
        let mut doc = Document::new();
        doc.add_shape(Shape::Rectangle(Rectangle::new(Point::new(1.0, 2.0), 3.0, 4.0)));
        doc
    }

    #[test]
    fn test_file_storage_save_load() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();

        storage.save("drawing", &sample()).unwrap();
        let loaded = storage.load("drawing").unwrap();
        assert_eq!(loaded.len(), 1);
        assert!(dir.path().join("drawing.json").exists());
    }

    #[test]
    fn test_file_storage_not_found() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();

        let result = storage.load("nonexistent");
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_file_storage_list() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();

        storage.save("doc1", &sample()).unwrap();
        storage.save("doc2.json", &sample()).unwrap();
        fs::write(dir.path().join("notes.txt"), "not a drawing").unwrap();

        let list = storage.list().unwrap();
        assert_eq!(list.len(), 2);
        assert!(list.contains(&"doc1".to_string()));
        assert!(list.contains(&"doc2".to_string()));
    }

    #[test]
    fn test_file_storage_delete() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();

        storage.save("test", &sample()).unwrap();
        assert!(storage.exists("test").unwrap());

        storage.delete("test").unwrap();
        assert!(!storage.exists("test").unwrap());
    }

    #[test]
    fn test_file_storage_sanitizes_name() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();

        storage.save("test/doc:with*special", &sample()).unwrap();
        let loaded = storage.load("test/doc:with*special").unwrap();
        assert_eq!(loaded.len(), 1);
    }

    #[test]
    fn test_save_into_missing_directory_is_io_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("out.json");
        let result = save_path(&path, &sample());
        assert!(matches!(result, Err(StorageError::Io(_))));
    }

    #[test]
    fn test_load_garbage_is_serialization_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("garbage.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(load_path(&path), Err(StorageError::Serialization(_))));
    }
}
