//! Tooling & Integration Layer
//!
//! Command-line interface over the node repository. The CLI is a thin
//! collaborator: all structural logic stays in the core modules.

pub mod cli;
