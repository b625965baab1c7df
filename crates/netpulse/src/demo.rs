//! Built-in demo topology: a small office network.
//!
//! Used whenever `--topology` is not given, so every command works out of
//! the box.

use serde_json::json;

use netpulse_core::{Edge, LinkMedium, Node, NodeKind, NodeStatus, Position};

pub fn nodes() -> Vec<Node> {
    vec![
        Node::new(
            "gw-1",
            "Edge Gateway",
            NodeKind::Gateway,
            "10.0.0.1",
            Position::new(400.0, 60.0),
        )
        .with_attribute("model", json!("EG-2400")),
        Node::new(
            "sw-core",
            "Core Switch",
            NodeKind::Switch,
            "10.0.0.2",
            Position::new(400.0, 200.0),
        )
        .with_attribute("ports", json!(48)),
        Node::new(
            "srv-web",
            "Web Server",
            NodeKind::Server,
            "10.0.1.10",
            Position::new(180.0, 340.0),
        ),
        Node::new(
            "srv-db",
            "Database Server",
            NodeKind::Server,
            "10.0.1.11",
            Position::new(320.0, 340.0),
        ),
        Node::new(
            "ws-dev",
            "Dev Workstation",
            NodeKind::Workstation,
            "10.0.2.21",
            Position::new(480.0, 340.0),
        ),
        Node::new(
            "prn-1",
            "Office Printer",
            NodeKind::Printer,
            "10.0.2.40",
            Position::new(620.0, 340.0),
        )
        .with_status(NodeStatus::Warning)
        .with_attribute("toner_pct", json!(12)),
        Node::new(
            "ap-floor2",
            "Floor 2 AP",
            NodeKind::AccessPoint,
            "10.0.0.5",
            Position::new(620.0, 200.0),
        ),
        Node::new(
            "mob-1",
            "Phone",
            NodeKind::Mobile,
            "10.0.3.77",
            Position::new(720.0, 300.0),
        ),
    ]
}

pub fn edges() -> Vec<Edge> {
    vec![
        Edge::new("gw-sw", "gw-1", "sw-core", LinkMedium::Fiber, "10 Gbps"),
        Edge::new("sw-web", "sw-core", "srv-web", LinkMedium::Copper, "1 Gbps"),
        Edge::new("sw-db", "sw-core", "srv-db", LinkMedium::Copper, "1 Gbps"),
        Edge::new("sw-ws", "sw-core", "ws-dev", LinkMedium::Copper, "1 Gbps"),
        Edge::new("sw-prn", "sw-core", "prn-1", LinkMedium::Copper, "100 Mbps"),
        Edge::new("sw-ap", "sw-core", "ap-floor2", LinkMedium::Copper, "2.5 Gbps"),
        Edge::new("ap-mob", "ap-floor2", "mob-1", LinkMedium::Wireless, "1.2 Gbps"),
    ]
}
