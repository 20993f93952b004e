//! Repository error taxonomy.
//!
//! Every failure surfaced by the core is one of these kinds. The first four
//! are caller-actionable; `StorageUnavailable` wraps any underlying
//! read/write failure and is never swallowed or downgraded.

use thiserror::Error;

/// Errors surfaced by the node repository and its collaborators.
#[derive(Debug, Error)]
pub enum RepoError {
    /// A path segment is malformed (only lowercase ascii letters, digits,
    /// and hyphens are allowed).
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// The resolved location escapes the storage root.
    #[error("address escapes the storage root: {0}")]
    OutOfBounds(String),

    /// The operation requires an existing descriptor that is absent.
    #[error("node not found: {0}")]
    NodeNotFound(String),

    /// The parent/child type pair is not in the schema relation.
    #[error("{reason}")]
    InvalidChildType {
        parent: String,
        child: String,
        reason: String,
    },

    /// An underlying read or write failed.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl From<std::io::Error> for RepoError {
    fn from(err: std::io::Error) -> Self {
        RepoError::StorageUnavailable(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_child_type_displays_reason() {
        let err = RepoError::InvalidChildType {
            parent: "company".to_string(),
            child: "service".to_string(),
            reason: "only datacenters can be created under a company".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "only datacenters can be created under a company"
        );
    }

    #[test]
    fn test_io_error_maps_to_storage_unavailable() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: RepoError = io.into();
        assert!(matches!(err, RepoError::StorageUnavailable(_)));
    }
}
