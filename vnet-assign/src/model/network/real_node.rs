use serde::{Deserialize, Serialize};
use vnet_core::model::NodeId;

/// a node of the base network.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RealNode {
    pub id: NodeId,
    pub x: f64,
    pub y: f64,
    /// goods may change mode, means or service at this node
    pub transhipment: bool,
}

impl RealNode {
    pub fn new(id: i64, x: f64, y: f64, transhipment: bool) -> RealNode {
        RealNode {
            id: NodeId(id),
            x,
            y,
            transhipment,
        }
    }

    /// straight-line distance to another node.
    pub fn distance_to(&self, other: &RealNode) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}
