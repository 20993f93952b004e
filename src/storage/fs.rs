//! Filesystem storage backend.

use super::{DirEntry, Storage};
use crate::error::RepoError;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Storage rooted at a real directory. The root is canonicalized once at
/// construction; `contains` re-resolves targets against it to defend
/// against symlinks pointing outside the tree.
pub struct FsStorage {
    root: PathBuf,
}

impl FsStorage {
    /// Open (creating if needed) a storage root.
    pub fn create(root: &Path) -> Result<Self, RepoError> {
        fs::create_dir_all(root)?;
        let root = dunce::canonicalize(root)
            .map_err(|e| RepoError::StorageUnavailable(format!("{}: {}", root.display(), e)))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn abs(&self, rel: &Path) -> PathBuf {
        self.root.join(rel)
    }
}

impl Storage for FsStorage {
    fn exists(&self, rel: &Path) -> bool {
        self.abs(rel).exists()
    }

    fn is_dir(&self, rel: &Path) -> bool {
        self.abs(rel).is_dir()
    }

    fn read(&self, rel: &Path) -> Result<String, RepoError> {
        fs::read_to_string(self.abs(rel))
            .map_err(|e| RepoError::StorageUnavailable(format!("{}: {}", rel.display(), e)))
    }

    fn write(&self, rel: &Path, contents: &str) -> Result<(), RepoError> {
        let abs = self.abs(rel);
        if let Some(parent) = abs.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| RepoError::StorageUnavailable(format!("{}: {}", rel.display(), e)))?;
        }
        fs::write(&abs, contents)
            .map_err(|e| RepoError::StorageUnavailable(format!("{}: {}", rel.display(), e)))
    }

    fn create_dir_all(&self, rel: &Path) -> Result<(), RepoError> {
        fs::create_dir_all(self.abs(rel))
            .map_err(|e| RepoError::StorageUnavailable(format!("{}: {}", rel.display(), e)))
    }

    fn entries(&self, rel: &Path) -> Result<Vec<DirEntry>, RepoError> {
        let abs = self.abs(rel);
        if !abs.is_dir() {
            return Ok(Vec::new());
        }
        let mut out = Vec::new();
        for entry in WalkDir::new(&abs)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry
                .map_err(|e| RepoError::StorageUnavailable(format!("{}: {}", rel.display(), e)))?;
            out.push(DirEntry {
                name: entry.file_name().to_string_lossy().to_string(),
                is_dir: entry.file_type().is_dir(),
            });
        }
        Ok(out)
    }

    fn contains(&self, rel: &Path) -> Result<(), RepoError> {
        // Resolve the deepest existing ancestor; the not-yet-created tail of
        // a path is lexically safe because segments are slug-validated.
        let mut probe = self.abs(rel);
        while !probe.exists() {
            match probe.parent() {
                Some(parent) => probe = parent.to_path_buf(),
                None => break,
            }
        }
        let resolved = dunce::canonicalize(&probe)
            .map_err(|e| RepoError::StorageUnavailable(format!("{}: {}", rel.display(), e)))?;
        if resolved == self.root || resolved.starts_with(&self.root) {
            Ok(())
        } else {
            Err(RepoError::OutOfBounds(rel.display().to_string()))
        }
    }
}
