// ── Edge domain types ──

use serde::{Deserialize, Serialize};

use super::ids::{EdgeId, NodeId};

/// Physical medium of a link. Drives rendering style only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LinkMedium {
    Fiber,
    /// Copper / ethernet.
    Copper,
    Wireless,
}

/// One simulated link between two devices.
///
/// `from`/`to` are ordered for traversal purposes; the physical link is
/// bidirectional. Only `active` mutates after topology initialization —
/// inactive edges carry no packets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    pub from: NodeId,
    pub to: NodeId,
    pub medium: LinkMedium,
    /// Display string, e.g. `"1 Gbps"`.
    pub capacity_label: String,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl Edge {
    /// Create an active edge.
    pub fn new(
        id: impl Into<EdgeId>,
        from: impl Into<NodeId>,
        to: impl Into<NodeId>,
        medium: LinkMedium,
        capacity_label: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            from: from.into(),
            to: to.into(),
            medium,
            capacity_label: capacity_label.into(),
            active: true,
        }
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// The endpoint opposite `node`, if `node` is an endpoint at all.
    pub fn peer_of(&self, node: &NodeId) -> Option<&NodeId> {
        if self.from == *node {
            Some(&self.to)
        } else if self.to == *node {
            Some(&self.from)
        } else {
            None
        }
    }
}
