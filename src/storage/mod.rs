//! Storage port.
//!
//! The repository never touches the filesystem directly; it goes through
//! this trait so the core can run against an in-memory backend in tests.
//! All paths are relative to the storage root.

mod fs;
mod memory;

pub use fs::FsStorage;
pub use memory::MemoryStorage;

use crate::error::RepoError;
use std::path::Path;

/// One directory entry, name plus kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub is_dir: bool,
}

/// Storage operations needed by the repository, tree builder, and index.
///
/// `entries` returns children name-sorted (byte order) so every traversal
/// is deterministic regardless of backend.
pub trait Storage: Send + Sync {
    fn exists(&self, rel: &Path) -> bool;

    fn is_dir(&self, rel: &Path) -> bool;

    fn read(&self, rel: &Path) -> Result<String, RepoError>;

    fn write(&self, rel: &Path, contents: &str) -> Result<(), RepoError>;

    fn create_dir_all(&self, rel: &Path) -> Result<(), RepoError>;

    /// Name-sorted entries of a directory; an absent directory lists empty.
    fn entries(&self, rel: &Path) -> Result<Vec<DirEntry>, RepoError>;

    /// Verify the location stays inside the storage root. Backends without
    /// link semantics have nothing to check.
    fn contains(&self, rel: &Path) -> Result<(), RepoError> {
        let _ = rel;
        Ok(())
    }
}
