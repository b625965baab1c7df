//! Domain model: the graph entities, packets, and metric samples the
//! renderer consumes. Pure data — behavior lives in the components.

mod edge;
mod ids;
mod metrics;
mod node;
mod packet;

pub use edge::{Edge, LinkMedium};
pub use ids::{EdgeId, NodeId, PacketId};
pub use metrics::MetricSample;
pub use node::{Node, NodeKind, NodeStatus, Position};
pub use packet::{Packet, PacketCategory};

pub(crate) use packet::{PROTOCOL_LABELS, SIZE_LABELS};
