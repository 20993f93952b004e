//! Node addressing and path resolution.
//!
//! An address is a slash-separated list of slugs relative to the storage
//! root. Resolution here is purely lexical: every segment must match the
//! slug alphabet, which rules out `..`, separators, and anything else that
//! could steer outside the root. The filesystem backend adds a canonicalized
//! containment check for symlink tricks (see `storage::FsStorage`).

use crate::error::RepoError;
use std::path::PathBuf;

/// A verified position in the content tree, held as slug segments relative
/// to the storage root. `(parent, slug)` is a node's stable identity, so the
/// handle is the node's address in structured form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeHandle {
    segments: Vec<String>,
}

impl NodeHandle {
    /// Handle for the storage root itself.
    pub fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// The node's own slug; `None` for the root.
    pub fn slug(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// Parent handle; the root is its own parent.
    pub fn parent(&self) -> NodeHandle {
        let mut segments = self.segments.clone();
        segments.pop();
        NodeHandle { segments }
    }

    pub fn child(&self, slug: &str) -> NodeHandle {
        let mut segments = self.segments.clone();
        segments.push(slug.to_string());
        NodeHandle { segments }
    }

    /// Slash-separated address, empty for the root.
    pub fn address(&self) -> String {
        self.segments.join("/")
    }

    /// Relative filesystem path under the storage root.
    pub fn rel_path(&self) -> PathBuf {
        self.segments.iter().collect()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

/// Parse and validate a caller-supplied address. Empty segments (doubled or
/// trailing slashes) are tolerated and dropped; an empty address resolves to
/// the root. Never touches the filesystem.
pub fn resolve(address: &str) -> Result<NodeHandle, RepoError> {
    let mut segments = Vec::new();
    for segment in address.split('/').filter(|s| !s.is_empty()) {
        if !valid_segment(segment) {
            return Err(RepoError::InvalidAddress(address.to_string()));
        }
        segments.push(segment.to_string());
    }
    Ok(NodeHandle { segments })
}

fn valid_segment(segment: &str) -> bool {
    segment
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}
