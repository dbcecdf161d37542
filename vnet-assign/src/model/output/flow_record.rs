use serde::{Deserialize, Serialize};
use vnet_core::model::{LinkId, Means, Mode, NodeId, ServiceId};

use crate::model::virtual_network::{VirtualLinkIndex, VirtualNetwork};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GroupFlowValues {
    pub unit_cost: f64,
    pub quantity: f64,
    pub vehicles: u64,
}

/// flow of one virtual link in one time slice, per group and consolidated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowRecord {
    pub link: VirtualLinkIndex,
    pub node1: NodeId,
    pub link1: LinkId,
    pub mode1: Mode,
    pub means1: Means,
    pub service1: ServiceId,
    pub node2: NodeId,
    pub link2: LinkId,
    pub mode2: Mode,
    pub means2: Means,
    pub service2: ServiceId,
    /// start of the time slice
    pub time: u32,
    pub length: f64,
    /// one entry per group, in the order of [`VirtualNetwork::groups`]
    pub groups: Vec<GroupFlowValues>,
    /// average unit cost, weighted by the quantity of each group
    pub unit_cost: f64,
    pub quantity: f64,
    pub vehicles: u64,
}

impl FlowRecord {
    /// the flow records of a virtual network. (link, slice) pairs without flow
    /// are left out unless `complete` is set.
    pub fn from_network(vnet: &VirtualNetwork, complete: bool) -> Vec<FlowRecord> {
        let n_slices = vnet.time_slices().count;
        let mut records = vec![];
        for slice in 0..n_slices {
            for (idx, link) in vnet.links().iter().enumerate() {
                let groups: Vec<GroupFlowValues> = vnet
                    .flows()
                    .iter()
                    .map(|f| {
                        // links without a cost rule are unusable and written at 0
                        let cost = vnet.link_cost(f.group_index(), idx);
                        GroupFlowValues {
                            unit_cost: if cost.is_finite() { cost } else { 0.0 },
                            quantity: f.current(idx, slice),
                            vehicles: f.vehicles(idx, slice),
                        }
                    })
                    .collect();
                let quantity: f64 = groups.iter().map(|g| g.quantity).sum();
                if quantity <= 0.0 && !complete {
                    continue;
                }
                let weighted: f64 = groups
                    .iter()
                    .filter(|g| g.quantity > 0.0)
                    .map(|g| g.unit_cost * g.quantity)
                    .sum();
                let unit_cost = if quantity > 0.0 {
                    weighted / quantity
                } else {
                    0.0
                };
                let (b, e) = (vnet.node(link.begin), vnet.node(link.end));
                records.push(FlowRecord {
                    link: idx,
                    node1: b.real_node,
                    link1: b.real_link,
                    mode1: b.mode,
                    means1: b.means,
                    service1: b.service,
                    node2: e.real_node,
                    link2: e.real_link,
                    mode2: e.mode,
                    means2: e.means,
                    service2: e.service,
                    time: vnet.time_slices().slice_start(slice),
                    length: link.length,
                    vehicles: groups.iter().map(|g| g.vehicles).sum(),
                    groups,
                    unit_cost,
                    quantity,
                });
            }
        }
        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::TimeSlices,
        model::{
            cost::{CostFunctionSet, MovingCost},
            demand::DemandCell,
            network::{BaseNetwork, RealLink, RealNode},
            virtual_network::VirtualLinkKind,
        },
    };
    use vnet_core::model::OdClass;

    fn moving_only() -> VirtualNetwork {
        let base = BaseNetwork::new(
            vec![
                RealNode::new(1, 0.0, 0.0, false),
                RealNode::new(2, 1.0, 0.0, false),
            ],
            vec![RealLink::new(10, 1, 2, 1, 1, 2.0)],
        )
        .unwrap();
        let mut vnet = VirtualNetwork::generate(&base, TimeSlices::default()).unwrap();
        vnet.load_demand_cells(vec![DemandCell::new(0, 1, 2, 10.0)])
            .unwrap();
        let costs = CostFunctionSet {
            moving: vec![MovingCost {
                group: None,
                mode: 1,
                means: 1,
                fixed: 0.0,
                per_length: 1.0,
                congestion: None,
            }],
            ..Default::default()
        };
        vnet.compute_costs(0, OdClass(0), &costs, 1).unwrap();
        vnet
    }

    #[test]
    fn test_complete_network_writes_unusable_links_at_zero_cost() {
        let vnet = moving_only();
        let records = FlowRecord::from_network(&vnet, true);
        assert_eq!(records.len(), vnet.links().len());
        for record in records.iter() {
            assert!(record.groups[0].unit_cost.is_finite());
            assert!(record.unit_cost.is_finite());
            let kind = vnet.links()[record.link].kind;
            if kind == VirtualLinkKind::Moving {
                assert_eq!(record.groups[0].unit_cost, 2.0);
            } else {
                assert_eq!(record.groups[0].unit_cost, 0.0);
            }
        }
        assert!(FlowRecord::from_network(&vnet, false).is_empty());
    }
}
