use serde::{Deserialize, Serialize};
use vnet_core::model::{Means, Mode};

use super::VirtualNodeIndex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VirtualLinkKind {
    /// origin virtual node to a link endpoint
    Loading,
    /// link endpoint to destination virtual node
    Unloading,
    /// along a real link
    Moving,
    /// between two real links at a node, same mode, means and service
    Transit,
    /// between two real links at a node, with a change of mode, means or service
    Transhipment,
}

impl VirtualLinkKind {
    /// links that stay at a real node, where exclusions apply.
    pub fn is_node_transition(&self) -> bool {
        !matches!(self, VirtualLinkKind::Moving)
    }
}

/// a directed edge of the virtual network. flows are kept per group in
/// [`super::GroupFlows`], indexed by the position of the link.
#[derive(Debug, Clone)]
pub struct VirtualLink {
    pub kind: VirtualLinkKind,
    pub begin: VirtualNodeIndex,
    pub end: VirtualNodeIndex,
    /// length of the real link for moving links, 0 otherwise
    pub length: f64,
    /// mode of the vehicle carrying the goods on this link
    pub carrier_mode: Mode,
    /// means of the vehicle carrying the goods on this link
    pub carrier_means: Means,
}
