//! Arbor: Hierarchical Content Store
//!
//! A filesystem-backed tree of typed nodes (company, datacenter, section,
//! document, service, server, network), each node a directory holding a
//! `meta.json` descriptor and markdown documents. Provides safe address
//! resolution, type-constrained creation, slug-based identity, default
//! document provisioning, and a full-text index rebuilt from the tree.

pub mod address;
pub mod config;
pub mod error;
pub mod index;
pub mod logging;
pub mod repo;
pub mod schema;
pub mod seed;
pub mod slug;
pub mod storage;
pub mod tooling;
pub mod tree;
pub mod types;
