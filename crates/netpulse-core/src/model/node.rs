// ── Node domain types ──

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::ids::{EdgeId, NodeId};

/// What a node represents on the diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
#[non_exhaustive]
pub enum NodeKind {
    /// Gateway / firewall.
    Gateway,
    Switch,
    Server,
    Workstation,
    Printer,
    Mobile,
    AccessPoint,
}

/// Device operational status. The only node field that mutates after
/// topology initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum NodeStatus {
    Online,
    Offline,
    Warning,
}

impl NodeStatus {
    pub fn is_online(self) -> bool {
        matches!(self, Self::Online)
    }
}

/// Diagram coordinate, fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One simulated network device.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    pub kind: NodeKind,
    /// Display address, e.g. a dotted quad.
    pub address: String,
    pub status: NodeStatus,
    pub position: Position,
    /// Edge ids incident to this node, in edge-insertion order.
    /// Derived by [`Topology::new`](crate::Topology::new) — any value
    /// supplied by the host is discarded.
    #[serde(default)]
    pub links: Vec<EdgeId>,
    /// Kind-dependent extras (model name, uptime, load percentage).
    #[serde(default)]
    pub attributes: Map<String, Value>,
}

impl Node {
    /// Create an online node with no attributes.
    pub fn new(
        id: impl Into<NodeId>,
        name: impl Into<String>,
        kind: NodeKind,
        address: impl Into<String>,
        position: Position,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            address: address.into(),
            status: NodeStatus::Online,
            position,
            links: Vec::new(),
            attributes: Map::new(),
        }
    }

    pub fn with_status(mut self, status: NodeStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}
