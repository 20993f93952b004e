//! CLI Tooling
//!
//! Command-line interface for store operations: initialization, node
//! creation, listing, tree rendering, document writes, service network
//! records, and search.

use crate::address::NodeHandle;
use crate::config::ArborConfig;
use crate::repo::NodeRepository;
use crate::seed;
use crate::storage::FsStorage;
use crate::tree::{self, TreeNode};
use crate::types::{NetworkInterface, NodeKind};
use clap::{Parser, Subcommand};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;
use std::path::PathBuf;
use std::sync::Arc;

/// Arbor CLI - hierarchical content store
#[derive(Parser)]
#[command(name = "arbor")]
#[command(about = "Hierarchical content store with typed nodes and full-text search")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Storage root (overrides configuration)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Configuration file path
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the storage root and build the index
    Init {
        /// Seed demo content into an empty store
        #[arg(long)]
        demo: bool,
    },
    /// Create a node
    Create {
        /// Node title
        title: String,
        /// Node type (company, dc, section, document, service, server, network)
        #[arg(long)]
        kind: String,
        /// Parent address (empty for the root)
        #[arg(long, default_value = "")]
        parent: String,
    },
    /// List the direct children of a node
    Ls {
        /// Node address (empty for the root)
        #[arg(default_value = "")]
        address: String,
    },
    /// Render the full hierarchy
    Tree,
    /// Show a node's metadata and breadcrumb
    Show {
        /// Node address
        address: String,
    },
    /// Write a document body from a file
    Save {
        /// Node address
        address: String,
        /// Document name (index.md, or a service document)
        #[arg(long)]
        document: String,
        /// File to read the body from
        #[arg(long)]
        from: PathBuf,
    },
    /// Replace a service's network records (JSON list of interfaces)
    Network {
        /// Service node address
        address: String,
        /// JSON array: [{"name", "ip", "mask", "gateway", "dns"}, ...]
        #[arg(long)]
        interfaces: String,
    },
    /// Search titles and document text
    Search {
        /// Query (substring, case-insensitive)
        query: String,
    },
    /// Rebuild the search index from the tree
    Reindex,
}

/// Shared command context: configuration plus repository.
pub struct CliContext {
    repo: NodeRepository,
}

impl CliContext {
    pub fn new(root: Option<PathBuf>, config_file: Option<PathBuf>) -> anyhow::Result<Self> {
        let mut config = ArborConfig::load(config_file.as_deref())?;
        if let Some(root) = root {
            config.content_root = root;
        }
        crate::logging::init_logging(&config.logging)?;
        let storage = Arc::new(FsStorage::create(&config.content_root)?);
        Ok(Self {
            repo: NodeRepository::new(storage),
        })
    }

    pub fn execute(&self, command: &Commands) -> anyhow::Result<String> {
        match command {
            Commands::Init { demo } => {
                if *demo {
                    seed::ensure_demo_data(&self.repo)?;
                }
                let entries = self.repo.index().rebuild()?;
                Ok(format!("Initialized store ({} nodes indexed)", entries.len()))
            }
            Commands::Create {
                title,
                kind,
                parent,
            } => {
                let kind: NodeKind = kind
                    .parse()
                    .map_err(|e: String| anyhow::anyhow!(e))?;
                let node = self.repo.create(parent, title, kind)?;
                Ok(node.address())
            }
            Commands::Ls { address } => {
                let handle = self.repo.resolve(address)?;
                let children = self.repo.list_children(&handle)?;
                let mut table = Table::new();
                table.load_preset(UTF8_BORDERS_ONLY);
                table.set_header(vec!["Title", "Type", "Path"]);
                for child in children {
                    table.add_row(vec![child.title, child.kind.to_string(), child.path]);
                }
                Ok(table.to_string())
            }
            Commands::Tree => {
                let nodes = tree::build_tree(&self.repo, &NodeHandle::root())?;
                let mut out = format!("{}\n", section_heading("Content tree"));
                render_tree(&nodes, 0, &mut out);
                Ok(out)
            }
            Commands::Show { address } => {
                let handle = self.repo.resolve(address)?;
                let descriptor = self.repo.load_meta(&handle)?;
                let crumbs = self.repo.breadcrumb(&handle)?;
                let trail: Vec<&str> = crumbs.iter().map(|c| c.title.as_str()).collect();
                let mut out = String::new();
                out.push_str(&format!("{}\n", section_heading(&descriptor.title)));
                out.push_str(&format!("  Path: {}\n", handle.address()));
                out.push_str(&format!("  Type: {}\n", descriptor.kind));
                out.push_str(&format!("  Created: {}\n", descriptor.created));
                out.push_str(&format!("  Updated: {}\n", descriptor.updated));
                out.push_str(&format!("  Trail: {}\n", trail.join(" / ")));
                if let Some(network) = &descriptor.service_network {
                    out.push_str(&format!("  Interfaces: {}\n", network.items.len()));
                }
                Ok(out)
            }
            Commands::Save {
                address,
                document,
                from,
            } => {
                let handle = self.repo.resolve(address)?;
                let content = std::fs::read_to_string(from)?;
                self.repo.save_document(&handle, document, &content)?;
                Ok(format!("Saved {} at {}", document, handle.address()))
            }
            Commands::Network {
                address,
                interfaces,
            } => {
                let handle = self.repo.resolve(address)?;
                let items: Vec<NetworkInterface> = serde_json::from_str(interfaces)?;
                self.repo.set_service_network(&handle, items)?;
                Ok(format!("Network records updated at {}", handle.address()))
            }
            Commands::Search { query } => {
                let hits = self.repo.index().search(query)?;
                if hits.is_empty() {
                    return Ok("No matches".to_string());
                }
                let mut table = Table::new();
                table.load_preset(UTF8_BORDERS_ONLY);
                table.set_header(vec!["Title", "Type", "Path", "Updated"]);
                for hit in hits {
                    table.add_row(vec![
                        hit.title,
                        hit.kind.to_string(),
                        hit.path,
                        hit.updated.to_rfc3339(),
                    ]);
                }
                Ok(table.to_string())
            }
            Commands::Reindex => {
                let entries = self.repo.index().rebuild()?;
                Ok(format!("Indexed {} nodes", entries.len()))
            }
        }
    }
}

fn section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

fn render_tree(nodes: &[TreeNode], depth: usize, out: &mut String) {
    for node in nodes {
        out.push_str(&"  ".repeat(depth));
        out.push_str(&format!("{} [{}]\n", node.title, node.kind));
        render_tree(&node.children, depth + 1, out);
    }
}
