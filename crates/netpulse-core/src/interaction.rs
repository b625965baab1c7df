// ── Interaction layer ──
//
// Selection/hover state for the UI, independent of the simulation
// loops. Holds node *ids*, never owning references — projections are
// resolved against the current topology on demand, so a selection of a
// missing node simply yields nothing.

use std::sync::Arc;

use arc_swap::ArcSwap;
use serde::Serialize;

use crate::model::{Edge, Node, NodeId};
use crate::topology::Topology;

/// Read-only projection of one node and its resolved neighborhood.
#[derive(Debug, Clone, Serialize)]
pub struct NodeDetails {
    pub node: Node,
    /// Incident edges resolved to their far endpoints, in link order.
    pub neighbors: Vec<NeighborLink>,
}

/// One incident edge plus the device on its far end.
#[derive(Debug, Clone, Serialize)]
pub struct NeighborLink {
    pub edge: Edge,
    pub peer: Node,
}

/// UI selection/hover state. Owned mutably by the host; stateless with
/// respect to the simulation.
pub struct Interaction {
    topology: Arc<ArcSwap<Topology>>,
    selected: Option<NodeId>,
    hovered: Option<NodeId>,
}

impl Interaction {
    pub(crate) fn new(topology: Arc<ArcSwap<Topology>>) -> Self {
        Self {
            topology,
            selected: None,
            hovered: None,
        }
    }

    /// Set or clear the selection. Unknown ids are accepted — derived
    /// views downstream come back empty instead of erroring.
    pub fn select(&mut self, id: Option<NodeId>) {
        self.selected = id;
    }

    /// Set or clear the hover target. Same contract as [`select`](Self::select).
    pub fn hover(&mut self, id: Option<NodeId>) {
        self.hovered = id;
    }

    pub fn selected(&self) -> Option<&NodeId> {
        self.selected.as_ref()
    }

    pub fn hovered(&self) -> Option<&NodeId> {
        self.hovered.as_ref()
    }

    /// Details for the current selection, if it resolves.
    pub fn selected_details(&self) -> Option<NodeDetails> {
        self.selected.as_ref().and_then(|id| self.details_for(id))
    }

    /// Computed on demand, not cached — the underlying model rarely
    /// changes within a session. Dangling link references are skipped.
    pub fn details_for(&self, id: &NodeId) -> Option<NodeDetails> {
        let topology = self.topology.load();
        let node = topology.node(id)?.clone();

        let neighbors = node
            .links
            .iter()
            .filter_map(|edge_id| {
                let edge = topology.edge(edge_id)?;
                let peer = topology.node(edge.peer_of(id)?)?;
                Some(NeighborLink {
                    edge: edge.clone(),
                    peer: peer.clone(),
                })
            })
            .collect();

        Some(NodeDetails { node, neighbors })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{LinkMedium, NodeKind, Position};

    fn shared_topology() -> Arc<ArcSwap<Topology>> {
        let nodes = vec![
            Node::new("gw", "Gateway", NodeKind::Gateway, "192.168.1.1", Position::new(0.0, 0.0)),
            Node::new("sw", "Switch", NodeKind::Switch, "192.168.1.2", Position::new(1.0, 0.0)),
            Node::new("srv", "Server", NodeKind::Server, "192.168.1.10", Position::new(2.0, 0.0)),
        ];
        let edges = vec![
            Edge::new("gw-sw", "gw", "sw", LinkMedium::Fiber, "10 Gbps"),
            Edge::new("sw-srv", "sw", "srv", LinkMedium::Copper, "1 Gbps"),
        ];
        Arc::new(ArcSwap::from_pointee(
            Topology::new(nodes, edges).unwrap(),
        ))
    }

    #[test]
    fn details_resolve_neighbors_to_far_endpoints() {
        let interaction = Interaction::new(shared_topology());
        let details = interaction.details_for(&"sw".into()).unwrap();

        assert_eq!(details.node.name, "Switch");
        let peers: Vec<&str> = details
            .neighbors
            .iter()
            .map(|n| n.peer.id.as_str())
            .collect();
        assert_eq!(peers, vec!["gw", "srv"]);
    }

    #[test]
    fn selecting_unknown_node_yields_empty_views() {
        let mut interaction = Interaction::new(shared_topology());
        interaction.select(Some("ghost".into()));
        assert!(interaction.selected_details().is_none());
    }

    #[test]
    fn select_and_hover_are_independent() {
        let mut interaction = Interaction::new(shared_topology());
        interaction.select(Some("gw".into()));
        interaction.hover(Some("srv".into()));

        assert_eq!(interaction.selected().unwrap().as_str(), "gw");
        assert_eq!(interaction.hovered().unwrap().as_str(), "srv");

        interaction.select(None);
        assert!(interaction.selected().is_none());
        assert_eq!(interaction.hovered().unwrap().as_str(), "srv");
    }
}
