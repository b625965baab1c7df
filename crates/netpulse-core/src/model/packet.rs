// ── Packet domain types ──

use serde::{Deserialize, Serialize};

use super::ids::{EdgeId, PacketId};

/// Traffic class of a simulated packet. Drives rendering color only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PacketCategory {
    Data,
    Control,
    Broadcast,
}

impl PacketCategory {
    pub const ALL: [Self; 3] = [Self::Data, Self::Control, Self::Broadcast];
}

/// Display labels assigned at spawn. Cosmetic, fixed enumerations.
pub(crate) const SIZE_LABELS: [&str; 5] = ["64 B", "256 B", "512 B", "1.2 KB", "4 KB"];
pub(crate) const PROTOCOL_LABELS: [&str; 6] = ["TCP", "UDP", "ICMP", "HTTP", "DNS", "TLS"];

/// One transient unit of simulated traffic traversing an edge.
///
/// Created and destroyed only by the scheduler, at tick boundaries. A
/// packet whose `progress` reaches 100 is removed in the same tick — it
/// is never observable past completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Packet {
    pub id: PacketId,
    /// The edge being traversed.
    pub edge: EdgeId,
    /// Percentage of the edge traversed, in [0, 100].
    pub progress: f64,
    pub category: PacketCategory,
    pub size_label: String,
    pub protocol_label: String,
}

impl Packet {
    pub fn is_complete(&self) -> bool {
        self.progress >= 100.0
    }
}
