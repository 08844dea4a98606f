pub mod multipart;
pub mod naming;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Filesystem-backed storage for uploaded blobs, referenced by the
/// generated names produced in [`naming`].
#[derive(Debug, Clone)]
pub struct BlobStorage {
    root: PathBuf,
}

impl BlobStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Creates the storage directory if it does not exist yet.
    pub fn init(&self) -> io::Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root)?;
        }
        Ok(())
    }

    /// Absolute-ish path for a name this service generated itself.
    pub fn path_of(&self, stored_name: &str) -> PathBuf {
        self.root.join(stored_name)
    }

    /// Resolves a client-supplied name to a path inside the storage root.
    /// Names with path separators or parent components are rejected.
    pub fn resolve(&self, name: &str) -> Option<PathBuf> {
        if name.is_empty() || name.contains('/') || name.contains('\\') || name.contains("..") {
            return None;
        }
        let path = self.root.join(name);
        if Path::new(name).components().count() != 1 {
            return None;
        }
        Some(path)
    }

    /// Reads a stored blob; None when the name is unsafe or the file is
    /// missing/unreadable.
    pub fn read(&self, name: &str) -> Option<Vec<u8>> {
        let path = self.resolve(name)?;
        fs::read(path).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let storage = BlobStorage::new(dir.path().join("uploads"));
        storage.init().unwrap();
        assert!(dir.path().join("uploads").is_dir());
        // idempotent
        storage.init().unwrap();
    }

    #[test]
    fn test_resolve_rejects_traversal() {
        let storage = BlobStorage::new("uploads");
        assert!(storage.resolve("../secret").is_none());
        assert!(storage.resolve("a/b").is_none());
        assert!(storage.resolve("a\\b").is_none());
        assert!(storage.resolve("").is_none());
        assert!(storage.resolve("1700000000123_notes.pdf").is_some());
    }

    #[test]
    fn test_read_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = BlobStorage::new(dir.path());
        std::fs::write(storage.path_of("1_a.txt"), b"hello").unwrap();
        assert_eq!(storage.read("1_a.txt").unwrap(), b"hello");
        assert!(storage.read("1_missing.txt").is_none());
    }
}
