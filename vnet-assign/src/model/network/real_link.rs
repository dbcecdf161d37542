use serde::{Deserialize, Serialize};
use vnet_core::model::{LinkId, Means, Mode, NodeId, ServiceId};

/// a link of the base network, travelled by one mode/means combination.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RealLink {
    pub id: LinkId,
    pub node1: NodeId,
    pub node2: NodeId,
    pub mode: Mode,
    pub means: Means,
    pub service: ServiceId,
    pub length: f64,
    /// only travelled from node1 to node2
    pub oneway: bool,
}

impl RealLink {
    pub fn new(id: i64, node1: i64, node2: i64, mode: Mode, means: Means, length: f64) -> RealLink {
        RealLink {
            id: LinkId(id),
            node1: NodeId(node1),
            node2: NodeId(node2),
            mode,
            means,
            service: 0,
            length,
            oneway: false,
        }
    }

    pub fn with_service(mut self, service: ServiceId) -> RealLink {
        self.service = service;
        self
    }

    pub fn oneway(mut self) -> RealLink {
        self.oneway = true;
        self
    }
}
