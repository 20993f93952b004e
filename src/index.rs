//! Content index: denormalized full-text search over the tree.
//!
//! Rebuilt wholesale after every mutation; there is no incremental path, so
//! the artifact can never drift from the tree. The scan is a full traversal
//! of every directory (not the tree builder's container-gated recursion), so
//! descriptors under leaf nodes are found too.

use crate::address::NodeHandle;
use crate::error::RepoError;
use crate::repo::defaults::META_FILE;
use crate::storage::Storage;
use crate::types::{Descriptor, NodeKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Index artifact file name, at the storage root. Dot-named, so node
/// enumeration (directories only) never sees it.
pub const INDEX_FILE: &str = ".index.json";

/// One denormalized search record per node: derived, never authoritative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub path: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub content: String,
    pub updated: DateTime<Utc>,
}

/// Full-scan index over a storage port.
pub struct ContentIndex {
    storage: Arc<dyn Storage>,
}

impl ContentIndex {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Scan every descriptor in the tree, concatenate each node's markdown
    /// documents (name-sorted for determinism), and replace the persisted
    /// artifact wholesale.
    pub fn rebuild(&self) -> Result<Vec<IndexEntry>, RepoError> {
        let mut entries = Vec::new();
        self.scan(&NodeHandle::root(), &mut entries)?;
        let raw = serde_json::to_string_pretty(&entries)
            .map_err(|e| RepoError::StorageUnavailable(format!("index artifact: {}", e)))?;
        self.storage.write(Path::new(INDEX_FILE), &raw)?;
        debug!(entries = entries.len(), "index rebuilt");
        Ok(entries)
    }

    /// Load the persisted artifact, falling back to a synchronous rebuild
    /// when none exists yet.
    pub fn load(&self) -> Result<Vec<IndexEntry>, RepoError> {
        if !self.storage.exists(Path::new(INDEX_FILE)) {
            return self.rebuild();
        }
        let raw = self.storage.read(Path::new(INDEX_FILE))?;
        serde_json::from_str(&raw)
            .map_err(|e| RepoError::StorageUnavailable(format!("index artifact: {}", e)))
    }

    /// Case-insensitive substring match against `title + "\n" + content`.
    /// An empty query returns nothing: search is opt-in, not list-everything.
    pub fn search(&self, query: &str) -> Result<Vec<IndexEntry>, RepoError> {
        if query.is_empty() {
            return Ok(Vec::new());
        }
        let needle = query.to_lowercase();
        Ok(self
            .load()?
            .into_iter()
            .filter(|entry| {
                format!("{}\n{}", entry.title, entry.content)
                    .to_lowercase()
                    .contains(&needle)
            })
            .collect())
    }

    fn scan(&self, handle: &NodeHandle, out: &mut Vec<IndexEntry>) -> Result<(), RepoError> {
        let dir = handle.rel_path();
        let listing = self.storage.entries(&dir)?;
        let meta_path = dir.join(META_FILE);
        if self.storage.exists(&meta_path) {
            let raw = self.storage.read(&meta_path)?;
            let descriptor: Descriptor = serde_json::from_str(&raw).map_err(|e| {
                RepoError::StorageUnavailable(format!("descriptor at {}: {}", handle.address(), e))
            })?;
            let mut texts = Vec::new();
            for entry in &listing {
                if !entry.is_dir && entry.name.ends_with(".md") {
                    texts.push(self.storage.read(&dir.join(&entry.name))?);
                }
            }
            out.push(IndexEntry {
                path: handle.address(),
                title: descriptor.title,
                kind: descriptor.kind,
                content: texts.join("\n"),
                updated: descriptor.updated,
            });
        }
        for entry in listing {
            if entry.is_dir {
                self.scan(&handle.child(&entry.name), out)?;
            }
        }
        Ok(())
    }
}
