//! In-memory storage backend for tests.

use super::{DirEntry, Storage};
use crate::error::RepoError;
use parking_lot::RwLock;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/// Map-backed storage. Directories and files live in separate ordered maps
/// so listings come out name-sorted like the filesystem backend's.
#[derive(Default)]
pub struct MemoryStorage {
    files: RwLock<BTreeMap<PathBuf, String>>,
    dirs: RwLock<BTreeSet<PathBuf>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn ancestors_of(rel: &Path) -> Vec<PathBuf> {
        rel.ancestors()
            .filter(|a| !a.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .collect()
    }
}

impl Storage for MemoryStorage {
    fn exists(&self, rel: &Path) -> bool {
        rel.as_os_str().is_empty()
            || self.files.read().contains_key(rel)
            || self.dirs.read().contains(rel)
    }

    fn is_dir(&self, rel: &Path) -> bool {
        rel.as_os_str().is_empty() || self.dirs.read().contains(rel)
    }

    fn read(&self, rel: &Path) -> Result<String, RepoError> {
        self.files
            .read()
            .get(rel)
            .cloned()
            .ok_or_else(|| RepoError::StorageUnavailable(format!("{}: no such file", rel.display())))
    }

    fn write(&self, rel: &Path, contents: &str) -> Result<(), RepoError> {
        if let Some(parent) = rel.parent() {
            self.create_dir_all(parent)?;
        }
        self.files.write().insert(rel.to_path_buf(), contents.to_string());
        Ok(())
    }

    fn create_dir_all(&self, rel: &Path) -> Result<(), RepoError> {
        let mut dirs = self.dirs.write();
        for ancestor in Self::ancestors_of(rel) {
            dirs.insert(ancestor);
        }
        Ok(())
    }

    fn entries(&self, rel: &Path) -> Result<Vec<DirEntry>, RepoError> {
        let mut out = Vec::new();
        let child_of = |candidate: &Path| -> Option<String> {
            let stripped = if rel.as_os_str().is_empty() {
                candidate
            } else {
                candidate.strip_prefix(rel).ok()?
            };
            let mut components = stripped.components();
            let first = components.next()?;
            if components.next().is_some() {
                return None;
            }
            Some(first.as_os_str().to_string_lossy().to_string())
        };
        for dir in self.dirs.read().iter() {
            if let Some(name) = child_of(dir) {
                out.push(DirEntry { name, is_dir: true });
            }
        }
        for file in self.files.read().keys() {
            if let Some(name) = child_of(file) {
                out.push(DirEntry {
                    name,
                    is_dir: false,
                });
            }
        }
        out.sort_by(|a, b| a.name.cmp(&b.name));
        out.dedup();
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_creates_parent_dirs() {
        let storage = MemoryStorage::new();
        storage
            .write(Path::new("acme/west/meta.json"), "{}")
            .unwrap();
        assert!(storage.is_dir(Path::new("acme")));
        assert!(storage.is_dir(Path::new("acme/west")));
        assert_eq!(storage.read(Path::new("acme/west/meta.json")).unwrap(), "{}");
    }

    #[test]
    fn test_root_always_exists() {
        let storage = MemoryStorage::new();
        assert!(storage.exists(Path::new("")));
        assert!(storage.is_dir(Path::new("")));
    }

    #[test]
    fn test_entries_lists_direct_children_only() {
        let storage = MemoryStorage::new();
        storage.write(Path::new("a/index.md"), "x").unwrap();
        storage.write(Path::new("a/b/index.md"), "y").unwrap();
        storage.write(Path::new("c.md"), "z").unwrap();
        let root_entries = storage.entries(Path::new("")).unwrap();
        let names: Vec<_> = root_entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["a", "c.md"]);
        let a_entries = storage.entries(Path::new("a")).unwrap();
        let names: Vec<_> = a_entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["b", "index.md"]);
    }

    #[test]
    fn test_missing_file_read_is_storage_error() {
        let storage = MemoryStorage::new();
        assert!(matches!(
            storage.read(Path::new("nope.md")),
            Err(RepoError::StorageUnavailable(_))
        ));
    }
}
