//! Core types: node kinds, descriptors, and service network records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed enumeration of node types. The storage root is an implicit,
/// synthetic parent and is never persisted, so it has no variant here;
/// schema operations model it as `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Company,
    Dc,
    Section,
    Document,
    Service,
    Server,
    Network,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Company => "company",
            NodeKind::Dc => "dc",
            NodeKind::Section => "section",
            NodeKind::Document => "document",
            NodeKind::Service => "service",
            NodeKind::Server => "server",
            NodeKind::Network => "network",
        }
    }

    /// Container kinds may hold children; everything else is a leaf.
    pub fn is_container(&self) -> bool {
        matches!(self, NodeKind::Company | NodeKind::Dc | NodeKind::Section)
    }

    pub fn is_leaf(&self) -> bool {
        !self.is_container()
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "company" => Ok(NodeKind::Company),
            "dc" => Ok(NodeKind::Dc),
            "section" => Ok(NodeKind::Section),
            "document" => Ok(NodeKind::Document),
            "service" => Ok(NodeKind::Service),
            "server" => Ok(NodeKind::Server),
            "network" => Ok(NodeKind::Network),
            other => Err(format!("unknown node kind: {}", other)),
        }
    }
}

/// One network interface record attached to a service node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkInterface {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub ip: String,
    #[serde(default)]
    pub mask: String,
    #[serde(default)]
    pub gateway: String,
    #[serde(default)]
    pub dns: String,
}

/// Structured network records for a service. The `service-network.md`
/// document is a derived rendering of this, never the source of truth.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceNetwork {
    #[serde(default)]
    pub items: Vec<NetworkInterface>,
}

/// Node metadata descriptor, persisted as `meta.json` in the node directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Descriptor {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub slug: String,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_network: Option<ServiceNetwork>,
}

impl Descriptor {
    /// Build a fresh descriptor with `created == updated == now`. Service
    /// nodes start with an empty network record list.
    pub fn new(title: &str, kind: NodeKind, slug: &str) -> Self {
        let now = Utc::now();
        Self {
            title: title.to_string(),
            kind,
            slug: slug.to_string(),
            created: now,
            updated: now,
            service_network: (kind == NodeKind::Service).then(ServiceNetwork::default),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trips_through_str() {
        for kind in [
            NodeKind::Company,
            NodeKind::Dc,
            NodeKind::Section,
            NodeKind::Document,
            NodeKind::Service,
            NodeKind::Server,
            NodeKind::Network,
        ] {
            assert_eq!(kind.as_str().parse::<NodeKind>().unwrap(), kind);
        }
        assert!("folder".parse::<NodeKind>().is_err());
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&NodeKind::Dc).unwrap(), "\"dc\"");
        assert_eq!(
            serde_json::from_str::<NodeKind>("\"service\"").unwrap(),
            NodeKind::Service
        );
    }

    #[test]
    fn test_container_and_leaf_partition() {
        assert!(NodeKind::Company.is_container());
        assert!(NodeKind::Dc.is_container());
        assert!(NodeKind::Section.is_container());
        assert!(NodeKind::Document.is_leaf());
        assert!(NodeKind::Service.is_leaf());
        assert!(NodeKind::Server.is_leaf());
        assert!(NodeKind::Network.is_leaf());
    }

    #[test]
    fn test_descriptor_wire_format() {
        let descriptor = Descriptor::new("RDS Farm", NodeKind::Service, "rds-farm");
        let json: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&descriptor).unwrap()).unwrap();
        assert_eq!(json["title"], "RDS Farm");
        assert_eq!(json["type"], "service");
        assert_eq!(json["slug"], "rds-farm");
        assert!(json["created"].is_string());
        assert_eq!(json["service_network"]["items"], serde_json::json!([]));
    }

    #[test]
    fn test_descriptor_omits_network_for_plain_nodes() {
        let descriptor = Descriptor::new("West", NodeKind::Dc, "west");
        let raw = serde_json::to_string(&descriptor).unwrap();
        assert!(!raw.contains("service_network"));
        let back: Descriptor = serde_json::from_str(&raw).unwrap();
        assert_eq!(back, descriptor);
    }
}
