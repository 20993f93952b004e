//! Tree builder: the full navigable hierarchy for presentation.
//!
//! Siblings are ordered by descriptor title (the presentation ordering;
//! `list_children` keeps byte order for machine-facing listings). Recursion
//! descends only into container kinds; a leaf's subdirectories are not
//! nodes. Directories without a descriptor are not nodes either and are
//! skipped silently.

use crate::address::NodeHandle;
use crate::error::RepoError;
use crate::repo::{MetaLookup, NodeRepository};
use crate::types::NodeKind;
use serde::Serialize;

/// One node of the assembled hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeNode {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub path: String,
    pub children: Vec<TreeNode>,
}

/// Assemble the hierarchy below `handle`.
pub fn build_tree(repo: &NodeRepository, handle: &NodeHandle) -> Result<Vec<TreeNode>, RepoError> {
    let mut nodes = Vec::new();
    for entry in repo.storage().entries(&handle.rel_path())? {
        if !entry.is_dir {
            continue;
        }
        let child = handle.child(&entry.name);
        let descriptor = match repo.lookup_meta(&child)? {
            MetaLookup::Found(descriptor) => descriptor,
            MetaLookup::Absent => continue,
        };
        let children = if descriptor.kind.is_container() {
            build_tree(repo, &child)?
        } else {
            Vec::new()
        };
        nodes.push(TreeNode {
            title: descriptor.title,
            kind: descriptor.kind,
            path: child.address(),
            children,
        });
    }
    nodes.sort_by(|a, b| a.title.cmp(&b.title));
    Ok(nodes)
}
