use vnet_core::model::{GroupId, NodeId, OdClass};

use crate::model::demand::DemandCell;

use super::VirtualNodeIndex;

/// the virtual nodes generated for one real node, together with the demand
/// that originates at this node.
#[derive(Debug, Clone)]
pub struct VirtualNodeList {
    pub real_node: NodeId,
    pub x: f64,
    pub y: f64,
    pub(super) virtual_nodes: Vec<VirtualNodeIndex>,
    pub(super) origin: Option<VirtualNodeIndex>,
    pub(super) destination: Option<VirtualNodeIndex>,
    pub(super) demand: Vec<DemandCell>,
}

impl VirtualNodeList {
    pub fn new(real_node: NodeId, x: f64, y: f64) -> VirtualNodeList {
        VirtualNodeList {
            real_node,
            x,
            y,
            virtual_nodes: vec![],
            origin: None,
            destination: None,
            demand: vec![],
        }
    }

    /// every virtual node generated for this real node, origin and destination included.
    pub fn virtual_nodes(&self) -> &[VirtualNodeIndex] {
        &self.virtual_nodes
    }

    /// virtual node where demand leaving this real node is loaded.
    pub fn origin(&self) -> Option<VirtualNodeIndex> {
        self.origin
    }

    /// virtual node where demand bound to this real node is unloaded.
    pub fn destination(&self) -> Option<VirtualNodeIndex> {
        self.destination
    }

    /// true if some demand of the group and OD class leaves from this node.
    pub fn has_demand_for_group(&self, group: GroupId, od_class: OdClass) -> bool {
        self.demand
            .iter()
            .any(|d| d.group == group && d.od_class == od_class)
    }

    pub fn demand_for_group(
        &self,
        group: GroupId,
        od_class: OdClass,
    ) -> impl Iterator<Item = &DemandCell> {
        self.demand
            .iter()
            .filter(move |d| d.group == group && d.od_class == od_class)
    }

    pub fn demand(&self) -> &[DemandCell] {
        &self.demand
    }
}
