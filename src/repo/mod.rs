//! Node repository: lifecycle of nodes in the content tree.
//!
//! Owns create, metadata load/update, default provisioning, document
//! writes, service network records, child listing, and breadcrumbs. All
//! filesystem access goes through the storage port; mutating operations are
//! serialized behind a single write lock (single-writer model) and finish
//! with a full index rebuild before returning.

pub mod defaults;

use crate::address::{self, NodeHandle};
use crate::error::RepoError;
use crate::index::ContentIndex;
use crate::schema;
use crate::slug;
use crate::storage::Storage;
use crate::types::{Descriptor, NetworkInterface, NodeKind, ServiceNetwork};
use chrono::Utc;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, info};

pub use defaults::{INDEX_DOC, META_FILE, NETWORK_DOC, SERVICE_DOCS};

/// Outcome of a metadata lookup. Callers decide whether an absent
/// descriptor is an error (`load_meta`) or synthesizable
/// (`load_or_synthesize`).
#[derive(Debug, Clone, PartialEq)]
pub enum MetaLookup {
    Found(Descriptor),
    Absent,
}

/// Child listing entry, name-ordered (byte order, not title order).
#[derive(Debug, Clone, PartialEq)]
pub struct ChildEntry {
    pub title: String,
    pub kind: NodeKind,
    pub path: String,
}

/// Breadcrumb entry, root→node order.
#[derive(Debug, Clone, PartialEq)]
pub struct Crumb {
    pub title: String,
    pub path: String,
}

/// Repository over a storage port.
pub struct NodeRepository {
    storage: Arc<dyn Storage>,
    index: ContentIndex,
    write_lock: Mutex<()>,
}

impl NodeRepository {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        let index = ContentIndex::new(storage.clone());
        Self {
            storage,
            index,
            write_lock: Mutex::new(()),
        }
    }

    pub fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    pub fn index(&self) -> &ContentIndex {
        &self.index
    }

    /// Resolve an address to a verified handle: lexical validation plus the
    /// backend's containment check. Does not require a descriptor to exist.
    pub fn resolve(&self, addr: &str) -> Result<NodeHandle, RepoError> {
        let handle = address::resolve(addr)?;
        self.storage.contains(&handle.rel_path())?;
        Ok(handle)
    }

    /// Create a node under `parent_address`. Leaf-typed parents retarget to
    /// their container ancestor; the child type is validated against the
    /// schema before anything touches storage. The descriptor is written
    /// last so a crash mid-creation cannot leave a descriptor-bearing
    /// half-node, and the index is rebuilt before returning.
    pub fn create(
        &self,
        parent_address: &str,
        title: &str,
        kind: NodeKind,
    ) -> Result<NodeHandle, RepoError> {
        let _guard = self.write_lock.lock();
        let parent = self.retarget(self.resolve(parent_address)?)?;
        let parent_kind = if parent.is_root() {
            None
        } else {
            Some(self.load_meta(&parent)?.kind)
        };
        schema::validate_child(parent_kind, kind)?;

        let base = slug::slugify(title);
        let final_slug = slug::unique_slug(self.storage.as_ref(), &parent, &base);
        let node = parent.child(&final_slug);

        self.storage.create_dir_all(&node.rel_path())?;
        let descriptor = Descriptor::new(title, kind, &final_slug);
        defaults::provision(self.storage.as_ref(), &node, &descriptor)?;
        self.save_meta(&node, &descriptor)?;
        self.index.rebuild()?;
        info!(path = %node.address(), kind = %kind, "node created");
        Ok(node)
    }

    /// Redirect child creation addressed at a leaf node to its parent, so
    /// callers can "create next to" a leaf without knowing the containment
    /// rule. Root and container handles pass through unchanged.
    pub fn retarget(&self, handle: NodeHandle) -> Result<NodeHandle, RepoError> {
        if handle.is_root() {
            return Ok(handle);
        }
        let descriptor = self.load_meta(&handle)?;
        if descriptor.kind.is_leaf() {
            debug!(path = %handle.address(), "retargeting leaf to parent");
            Ok(handle.parent())
        } else {
            Ok(handle)
        }
    }

    /// Two-outcome metadata lookup. The root never has a descriptor.
    pub fn lookup_meta(&self, handle: &NodeHandle) -> Result<MetaLookup, RepoError> {
        if handle.is_root() {
            return Ok(MetaLookup::Absent);
        }
        let meta_path = handle.rel_path().join(META_FILE);
        if !self.storage.exists(&meta_path) {
            return Ok(MetaLookup::Absent);
        }
        let raw = self.storage.read(&meta_path)?;
        let descriptor = serde_json::from_str(&raw).map_err(|e| {
            RepoError::StorageUnavailable(format!("descriptor at {}: {}", handle.address(), e))
        })?;
        Ok(MetaLookup::Found(descriptor))
    }

    /// Load a descriptor or fail with `NodeNotFound`.
    pub fn load_meta(&self, handle: &NodeHandle) -> Result<Descriptor, RepoError> {
        match self.lookup_meta(handle)? {
            MetaLookup::Found(descriptor) => Ok(descriptor),
            MetaLookup::Absent => Err(RepoError::NodeNotFound(handle.address())),
        }
    }

    /// Load a descriptor, synthesizing and persisting a `section`-typed one
    /// when absent. Only for default-provisioning contexts. The root is
    /// never persisted, so it is never a synthesis target.
    pub fn load_or_synthesize(&self, handle: &NodeHandle) -> Result<Descriptor, RepoError> {
        if handle.is_root() {
            return Err(RepoError::NodeNotFound(handle.address()));
        }
        match self.lookup_meta(handle)? {
            MetaLookup::Found(descriptor) => Ok(descriptor),
            MetaLookup::Absent => {
                let name = handle.slug().unwrap_or_default();
                let descriptor = Descriptor::new(name, NodeKind::Section, name);
                self.save_meta(handle, &descriptor)?;
                Ok(descriptor)
            }
        }
    }

    /// Apply a metadata mutation and stamp `updated = now`. The caller is
    /// responsible for rebuilding the index afterwards.
    pub fn update_meta<F>(&self, handle: &NodeHandle, mutate: F) -> Result<Descriptor, RepoError>
    where
        F: FnOnce(&mut Descriptor),
    {
        let _guard = self.write_lock.lock();
        self.update_meta_inner(handle, mutate)
    }

    fn update_meta_inner<F>(&self, handle: &NodeHandle, mutate: F) -> Result<Descriptor, RepoError>
    where
        F: FnOnce(&mut Descriptor),
    {
        let mut descriptor = self.load_meta(handle)?;
        mutate(&mut descriptor);
        descriptor.updated = Utc::now();
        self.save_meta(handle, &descriptor)?;
        Ok(descriptor)
    }

    /// Create missing default documents for a node. Idempotent.
    pub fn provision_defaults(
        &self,
        handle: &NodeHandle,
        descriptor: &Descriptor,
    ) -> Result<(), RepoError> {
        defaults::provision(self.storage.as_ref(), handle, descriptor)
    }

    /// Write a document body. The name must be `index.md` or, for services,
    /// one of the fixed service documents. Bumps `updated` and rebuilds the
    /// index before returning.
    pub fn save_document(
        &self,
        handle: &NodeHandle,
        name: &str,
        content: &str,
    ) -> Result<(), RepoError> {
        let _guard = self.write_lock.lock();
        let descriptor = self.load_meta(handle)?;
        if !defaults::is_editable_document(descriptor.kind, name) {
            return Err(RepoError::InvalidAddress(format!(
                "document name not allowed: {}",
                name
            )));
        }
        self.storage.write(&handle.rel_path().join(name), content)?;
        self.update_meta_inner(handle, |_| {})?;
        self.index.rebuild()?;
        info!(path = %handle.address(), document = name, "document saved");
        Ok(())
    }

    /// Replace a service's network records and regenerate the derived
    /// `service-network.md` table. Bumps `updated` and rebuilds the index.
    pub fn set_service_network(
        &self,
        handle: &NodeHandle,
        items: Vec<NetworkInterface>,
    ) -> Result<(), RepoError> {
        let _guard = self.write_lock.lock();
        let descriptor = self.load_meta(handle)?;
        if descriptor.kind != NodeKind::Service {
            return Err(RepoError::InvalidChildType {
                parent: descriptor.kind.as_str().to_string(),
                child: NodeKind::Network.as_str().to_string(),
                reason: "network records are only valid for service nodes".to_string(),
            });
        }
        let table = defaults::render_network_table(&items);
        self.update_meta_inner(handle, |d| {
            d.service_network = Some(ServiceNetwork { items });
        })?;
        self.storage
            .write(&handle.rel_path().join(NETWORK_DOC), &table)?;
        self.index.rebuild()?;
        info!(path = %handle.address(), "service network updated");
        Ok(())
    }

    /// Direct children carrying a descriptor, in byte order of their slugs.
    /// Deliberately not title-sorted; the tree builder is.
    pub fn list_children(&self, handle: &NodeHandle) -> Result<Vec<ChildEntry>, RepoError> {
        let mut children = Vec::new();
        for entry in self.storage.entries(&handle.rel_path())? {
            if !entry.is_dir {
                continue;
            }
            let child = handle.child(&entry.name);
            if let MetaLookup::Found(descriptor) = self.lookup_meta(&child)? {
                children.push(ChildEntry {
                    title: descriptor.title,
                    kind: descriptor.kind,
                    path: child.address(),
                });
            }
        }
        Ok(children)
    }

    /// Ancestor chain from the root (exclusive) down to the node.
    pub fn breadcrumb(&self, handle: &NodeHandle) -> Result<Vec<Crumb>, RepoError> {
        let mut crumbs = Vec::new();
        let mut current = handle.clone();
        while !current.is_root() {
            let descriptor = self.load_meta(&current)?;
            crumbs.push(Crumb {
                title: descriptor.title,
                path: current.address(),
            });
            current = current.parent();
        }
        crumbs.reverse();
        Ok(crumbs)
    }

    fn save_meta(&self, handle: &NodeHandle, descriptor: &Descriptor) -> Result<(), RepoError> {
        let raw = serde_json::to_string_pretty(descriptor).map_err(|e| {
            RepoError::StorageUnavailable(format!("descriptor at {}: {}", handle.address(), e))
        })?;
        self.storage
            .write(&handle.rel_path().join(META_FILE), &raw)
    }
}
