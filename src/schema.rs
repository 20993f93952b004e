//! Type schema: the parent → allowed-children relation.
//!
//! The relation is total and fixed. A `None` parent stands for the synthetic
//! root type. Validation happens before any filesystem mutation.

use crate::error::RepoError;
use crate::types::NodeKind;

const OBJECT_KINDS: &[NodeKind] = &[
    NodeKind::Section,
    NodeKind::Document,
    NodeKind::Service,
    NodeKind::Server,
    NodeKind::Network,
];

/// Allowed child kinds for a parent kind (`None` = root).
pub fn allowed_children(parent: Option<NodeKind>) -> &'static [NodeKind] {
    match parent {
        None => &[NodeKind::Company],
        Some(NodeKind::Company) => &[NodeKind::Dc],
        Some(NodeKind::Dc) | Some(NodeKind::Section) => OBJECT_KINDS,
        Some(NodeKind::Document)
        | Some(NodeKind::Service)
        | Some(NodeKind::Server)
        | Some(NodeKind::Network) => &[],
    }
}

/// Reject `(parent, child)` pairs outside the relation with a
/// parent-specific reason.
pub fn validate_child(parent: Option<NodeKind>, child: NodeKind) -> Result<(), RepoError> {
    if allowed_children(parent).contains(&child) {
        return Ok(());
    }
    let reason = match parent {
        None => "only companies can be created at the root",
        Some(NodeKind::Company) => "only datacenters can be created under a company",
        Some(NodeKind::Dc) | Some(NodeKind::Section) => {
            "only sections, documents, services, servers, or networks can be created here"
        }
        Some(_) => "this node type cannot have children",
    };
    Err(RepoError::InvalidChildType {
        parent: parent.map(|k| k.as_str().to_string()).unwrap_or_else(|| "root".to_string()),
        child: child.as_str().to_string(),
        reason: reason.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_KINDS: &[NodeKind] = &[
        NodeKind::Company,
        NodeKind::Dc,
        NodeKind::Section,
        NodeKind::Document,
        NodeKind::Service,
        NodeKind::Server,
        NodeKind::Network,
    ];

    #[test]
    fn test_root_accepts_only_companies() {
        assert!(validate_child(None, NodeKind::Company).is_ok());
        for kind in ALL_KINDS.iter().filter(|k| **k != NodeKind::Company) {
            assert!(validate_child(None, *kind).is_err());
        }
    }

    #[test]
    fn test_company_accepts_only_datacenters() {
        assert!(validate_child(Some(NodeKind::Company), NodeKind::Dc).is_ok());
        assert!(validate_child(Some(NodeKind::Company), NodeKind::Service).is_err());
        assert!(validate_child(Some(NodeKind::Company), NodeKind::Company).is_err());
    }

    #[test]
    fn test_containers_accept_objects_but_not_companies() {
        for parent in [NodeKind::Dc, NodeKind::Section] {
            for child in OBJECT_KINDS {
                assert!(validate_child(Some(parent), *child).is_ok());
            }
            assert!(validate_child(Some(parent), NodeKind::Company).is_err());
            assert!(validate_child(Some(parent), NodeKind::Dc).is_err());
        }
    }

    #[test]
    fn test_leaves_accept_nothing() {
        for parent in [
            NodeKind::Document,
            NodeKind::Service,
            NodeKind::Server,
            NodeKind::Network,
        ] {
            assert!(allowed_children(Some(parent)).is_empty());
            for child in ALL_KINDS {
                assert!(validate_child(Some(parent), *child).is_err());
            }
        }
    }

    #[test]
    fn test_rejection_carries_pair_and_reason() {
        let err = validate_child(Some(NodeKind::Company), NodeKind::Server).unwrap_err();
        match err {
            RepoError::InvalidChildType {
                parent,
                child,
                reason,
            } => {
                assert_eq!(parent, "company");
                assert_eq!(child, "server");
                assert!(reason.contains("datacenters"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
