// ── Topology model ──
//
// The static device/link graph. Built once from host-supplied node and
// edge lists, validated up front so the simulation loops can trust
// structural integrity. Lookups return `Option` — render code skips
// missing references instead of crashing mid-frame.

use indexmap::IndexMap;

use crate::error::CoreError;
use crate::model::{Edge, EdgeId, Node, NodeId, NodeStatus};

/// The fixed graph of simulated devices and links.
///
/// Shared between the host and the scheduler task through an
/// `ArcSwap<Topology>` held by [`Simulation`](crate::Simulation); the
/// mutators here are applied via RCU, so readers always observe a
/// consistent graph. Only node `status` and edge `active` flags change
/// after construction.
#[derive(Debug, Clone, Default)]
pub struct Topology {
    nodes: IndexMap<NodeId, Node>,
    edges: IndexMap<EdgeId, Edge>,
}

impl Topology {
    /// Build and validate the graph.
    ///
    /// Fails with [`CoreError::Validation`] on duplicate node/edge ids or
    /// an edge referencing an unknown node. Each node's `links` list is
    /// derived here, in edge-insertion order.
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Result<Self, CoreError> {
        let mut node_map: IndexMap<NodeId, Node> = IndexMap::with_capacity(nodes.len());
        for mut node in nodes {
            node.links.clear();
            let id = node.id.clone();
            if node_map.insert(id.clone(), node).is_some() {
                return Err(CoreError::validation(format!("duplicate node id `{id}`")));
            }
        }

        let mut edge_map: IndexMap<EdgeId, Edge> = IndexMap::with_capacity(edges.len());
        for edge in edges {
            if edge_map.contains_key(&edge.id) {
                return Err(CoreError::validation(format!(
                    "duplicate edge id `{}`",
                    edge.id
                )));
            }
            for endpoint in [&edge.from, &edge.to] {
                if !node_map.contains_key(endpoint) {
                    return Err(CoreError::validation(format!(
                        "edge `{}` references unknown node `{endpoint}`",
                        edge.id
                    )));
                }
            }
            if let Some(from_node) = node_map.get_mut(&edge.from) {
                from_node.links.push(edge.id.clone());
            }
            if edge.to != edge.from {
                if let Some(to_node) = node_map.get_mut(&edge.to) {
                    to_node.links.push(edge.id.clone());
                }
            }
            edge_map.insert(edge.id.clone(), edge);
        }

        Ok(Self {
            nodes: node_map,
            edges: edge_map,
        })
    }

    // ── Structural queries ───────────────────────────────────────────

    /// O(1) node lookup. `None` for unknown ids — never panics.
    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// O(1) edge lookup. `None` for unknown ids — never panics.
    pub fn edge(&self, id: &EdgeId) -> Option<&Edge> {
        self.edges.get(id)
    }

    /// Edge ids incident to `id`, in edge-insertion order. Empty for
    /// unknown ids.
    pub fn neighbors_of(&self, id: &NodeId) -> &[EdgeId] {
        self.nodes.get(id).map_or(&[], |node| node.links.as_slice())
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    /// Edges currently eligible to carry packets.
    pub fn active_edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values().filter(|edge| edge.active)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    // ── Mutators ─────────────────────────────────────────────────────
    //
    // Pure data updates; rendering layers re-derive colors/opacity from
    // status on every frame, so nothing cascades here.

    /// Returns `false` if the node does not exist.
    pub fn set_node_status(&mut self, id: &NodeId, status: NodeStatus) -> bool {
        match self.nodes.get_mut(id) {
            Some(node) => {
                node.status = status;
                true
            }
            None => false,
        }
    }

    /// Returns `false` if the edge does not exist.
    pub fn set_edge_active(&mut self, id: &EdgeId, active: bool) -> bool {
        match self.edges.get_mut(id) {
            Some(edge) => {
                edge.active = active;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{LinkMedium, NodeKind, Position};

    fn node(id: &str) -> Node {
        Node::new(id, id.to_uppercase(), NodeKind::Server, "10.0.0.1", Position::new(0.0, 0.0))
    }

    fn edge(id: &str, from: &str, to: &str) -> Edge {
        Edge::new(id, from, to, LinkMedium::Copper, "1 Gbps")
    }

    #[test]
    fn builds_links_in_edge_insertion_order() {
        let topo = Topology::new(
            vec![node("a"), node("b"), node("c")],
            vec![edge("e1", "a", "b"), edge("e2", "c", "a"), edge("e3", "b", "c")],
        )
        .unwrap();

        let a_links: Vec<&str> = topo
            .neighbors_of(&"a".into())
            .iter()
            .map(EdgeId::as_str)
            .collect();
        assert_eq!(a_links, vec!["e1", "e2"]);
    }

    #[test]
    fn neighbors_are_exactly_incident_edges() {
        let topo = Topology::new(
            vec![node("a"), node("b"), node("c")],
            vec![edge("e1", "a", "b"), edge("e2", "b", "c")],
        )
        .unwrap();

        for n in ["a", "b", "c"] {
            let nid = NodeId::from(n);
            let expected: Vec<&EdgeId> = topo
                .edges()
                .filter(|e| e.from == nid || e.to == nid)
                .map(|e| &e.id)
                .collect();
            let actual: Vec<&EdgeId> = topo.neighbors_of(&nid).iter().collect();
            assert_eq!(actual, expected, "neighbors of {n}");
        }
    }

    #[test]
    fn rejects_duplicate_node_id() {
        let err = Topology::new(vec![node("a"), node("a")], vec![]).unwrap_err();
        assert!(matches!(err, CoreError::Validation { .. }));
    }

    #[test]
    fn rejects_duplicate_edge_id() {
        let err = Topology::new(
            vec![node("a"), node("b")],
            vec![edge("e1", "a", "b"), edge("e1", "b", "a")],
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::Validation { .. }));
    }

    #[test]
    fn rejects_edge_with_unknown_endpoint() {
        let err =
            Topology::new(vec![node("a")], vec![edge("e1", "a", "ghost")]).unwrap_err();
        assert!(matches!(err, CoreError::Validation { .. }));
    }

    #[test]
    fn lookups_return_none_for_missing_ids() {
        let topo = Topology::new(vec![node("a")], vec![]).unwrap();
        assert!(topo.node(&"ghost".into()).is_none());
        assert!(topo.edge(&"ghost".into()).is_none());
        assert!(topo.neighbors_of(&"ghost".into()).is_empty());
    }

    #[test]
    fn mutators_report_whether_target_exists() {
        let mut topo =
            Topology::new(vec![node("a"), node("b")], vec![edge("e1", "a", "b")]).unwrap();

        assert!(topo.set_node_status(&"a".into(), NodeStatus::Warning));
        assert_eq!(topo.node(&"a".into()).unwrap().status, NodeStatus::Warning);

        assert!(topo.set_edge_active(&"e1".into(), false));
        assert!(!topo.edge(&"e1".into()).unwrap().active);

        assert!(!topo.set_node_status(&"ghost".into(), NodeStatus::Offline));
        assert!(!topo.set_edge_active(&"ghost".into(), true));
    }

    #[test]
    fn host_supplied_links_are_discarded() {
        let mut n = node("a");
        n.links.push(EdgeId::new("stale"));
        let topo = Topology::new(vec![n, node("b")], vec![edge("e1", "a", "b")]).unwrap();
        let links: Vec<&str> = topo
            .neighbors_of(&"a".into())
            .iter()
            .map(EdgeId::as_str)
            .collect();
        assert_eq!(links, vec!["e1"]);
    }
}
