use std::fmt::Display;

use serde::{Deserialize, Serialize};
use vnet_core::model::{LinkId, Means, Mode, NodeId, ServiceId, HANDLING};

use super::VirtualLinkIndex;

/// role of a virtual node at its real node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VirtualNodeKind {
    /// where the demand of the real node enters the network. only has outgoing links.
    Origin,
    /// where the demand of the real node leaves the network. only has incoming links.
    Destination,
    /// one end of a real link, for one mode/means/service combination
    Endpoint,
}

/// identity of a virtual node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VirtualNodeKey {
    pub kind: VirtualNodeKind,
    pub real_node: NodeId,
    pub real_link: LinkId,
    pub mode: Mode,
    pub means: Means,
    pub service: ServiceId,
}

impl Display for VirtualNodeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({:?} node={} link={} mode={} means={} service={})",
            self.kind, self.real_node, self.real_link, self.mode, self.means, self.service
        )
    }
}

/// a (real node, real link, mode, means, service) combination of the virtual network.
#[derive(Debug, Clone)]
pub struct VirtualNode {
    pub kind: VirtualNodeKind,
    pub real_node: NodeId,
    pub real_link: LinkId,
    pub mode: Mode,
    pub means: Means,
    pub service: ServiceId,
    pub(super) out_links: Vec<VirtualLinkIndex>,
}

impl VirtualNode {
    pub fn endpoint(
        real_node: NodeId,
        real_link: LinkId,
        mode: Mode,
        means: Means,
        service: ServiceId,
    ) -> VirtualNode {
        VirtualNode {
            kind: VirtualNodeKind::Endpoint,
            real_node,
            real_link,
            mode,
            means,
            service,
            out_links: vec![],
        }
    }

    pub fn origin(real_node: NodeId) -> VirtualNode {
        VirtualNode::handling(VirtualNodeKind::Origin, real_node)
    }

    pub fn destination(real_node: NodeId) -> VirtualNode {
        VirtualNode::handling(VirtualNodeKind::Destination, real_node)
    }

    fn handling(kind: VirtualNodeKind, real_node: NodeId) -> VirtualNode {
        VirtualNode {
            kind,
            real_node,
            real_link: LinkId(0),
            mode: HANDLING,
            means: HANDLING,
            service: 0,
            out_links: vec![],
        }
    }

    pub fn key(&self) -> VirtualNodeKey {
        VirtualNodeKey {
            kind: self.kind,
            real_node: self.real_node,
            real_link: self.real_link,
            mode: self.mode,
            means: self.means,
            service: self.service,
        }
    }

    /// outgoing virtual links, in insertion order.
    pub fn out_links(&self) -> &[VirtualLinkIndex] {
        &self.out_links
    }
}
