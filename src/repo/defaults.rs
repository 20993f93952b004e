//! Default document provisioning per node type.
//!
//! Document identities are part of the type contract, not user-chosen:
//! every node owns `index.md`; services own the seven fixed documents.

use crate::address::NodeHandle;
use crate::error::RepoError;
use crate::storage::Storage;
use crate::types::{Descriptor, NetworkInterface, NodeKind};

pub const META_FILE: &str = "meta.json";
pub const INDEX_DOC: &str = "index.md";
pub const NETWORK_DOC: &str = "service-network.md";

/// Fixed service documents: file name and default heading.
pub const SERVICE_DOCS: &[(&str, &str)] = &[
    ("overview.md", "Overview"),
    ("passport.md", "Passport"),
    ("architecture.md", "Architecture"),
    ("operations.md", "Operations"),
    ("incidents.md", "Incidents"),
    ("docs.md", "Documentation"),
    (NETWORK_DOC, "Service network"),
];

const NETWORK_TABLE_HEADER: &str = "| Name | IP | Mask | Gateway | DNS |\n| --- | --- | --- | --- | --- |";

/// Create missing default documents. Idempotent: existing documents are
/// never overwritten.
pub fn provision(
    storage: &dyn Storage,
    handle: &NodeHandle,
    descriptor: &Descriptor,
) -> Result<(), RepoError> {
    let dir = handle.rel_path();
    let index_doc = dir.join(INDEX_DOC);
    if !storage.exists(&index_doc) {
        storage.write(&index_doc, &format!("# {}\n", descriptor.title))?;
    }
    if descriptor.kind == NodeKind::Service {
        for (name, heading) in SERVICE_DOCS {
            let doc = dir.join(name);
            if storage.exists(&doc) {
                continue;
            }
            let body = if *name == NETWORK_DOC {
                format!("{}\n", NETWORK_TABLE_HEADER)
            } else {
                format!("# {}\n", heading)
            };
            storage.write(&doc, &body)?;
        }
    }
    Ok(())
}

/// Whether `name` is a document the repository accepts writes for.
pub fn is_editable_document(kind: NodeKind, name: &str) -> bool {
    name == INDEX_DOC
        || (kind == NodeKind::Service && SERVICE_DOCS.iter().any(|(doc, _)| *doc == name))
}

/// Render the derived network table: header plus one row per record, rows
/// joined with a newline and no trailing newline.
pub fn render_network_table(items: &[NetworkInterface]) -> String {
    let mut rows = vec![NETWORK_TABLE_HEADER.to_string()];
    for item in items {
        rows.push(format!(
            "| {} | {} | {} | {} | {} |",
            item.name, item.ip, item.mask, item.gateway, item.dns
        ));
    }
    rows.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editable_documents_per_kind() {
        assert!(is_editable_document(NodeKind::Section, "index.md"));
        assert!(!is_editable_document(NodeKind::Section, "overview.md"));
        assert!(is_editable_document(NodeKind::Service, "overview.md"));
        assert!(is_editable_document(NodeKind::Service, "service-network.md"));
        assert!(!is_editable_document(NodeKind::Service, "meta.json"));
        assert!(!is_editable_document(NodeKind::Service, "../index.md"));
    }

    #[test]
    fn test_network_table_header_only_when_empty() {
        assert_eq!(
            render_network_table(&[]),
            "| Name | IP | Mask | Gateway | DNS |\n| --- | --- | --- | --- | --- |"
        );
    }

    #[test]
    fn test_network_table_rows() {
        let items = vec![NetworkInterface {
            name: "eth0".to_string(),
            ip: "10.0.0.1".to_string(),
            mask: "255.255.255.0".to_string(),
            gateway: "10.0.0.254".to_string(),
            dns: "8.8.8.8".to_string(),
        }];
        assert_eq!(
            render_network_table(&items),
            "| Name | IP | Mask | Gateway | DNS |\n| --- | --- | --- | --- | --- |\n| eth0 | 10.0.0.1 | 255.255.255.0 | 10.0.0.254 | 8.8.8.8 |"
        );
    }
}
