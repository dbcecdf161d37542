use std::collections::HashMap;

use itertools::Itertools;
use vnet_core::model::{ExclusionSet, GroupId, NodeId, OdClass};

use crate::{
    config::TimeSlices,
    model::{
        cost::CostFunctionSet,
        demand::{DemandCell, DemandError},
        network::BaseNetwork,
    },
};

use super::{
    virtual_network_builder, GroupFlows, VirtualLink, VirtualLinkIndex, VirtualNetworkError,
    VirtualNode, VirtualNodeIndex, VirtualNodeList,
};

/// the virtual network of an assignment run: topology, demand, exclusions,
/// per-group link costs of the current batch and per-group flows.
#[derive(Debug)]
pub struct VirtualNetwork {
    nodes: Vec<VirtualNode>,
    links: Vec<VirtualLink>,
    node_lists: Vec<VirtualNodeList>,
    list_lookup: HashMap<NodeId, usize>,
    time_slices: TimeSlices,
    groups: Vec<GroupId>,
    nb_od_classes: usize,
    exclusions: ExclusionSet,
    /// unit cost per group index and link
    pub(super) costs: Vec<Vec<f64>>,
    flows: Vec<GroupFlows>,
}

impl VirtualNetwork {
    pub(super) fn from_parts(
        nodes: Vec<VirtualNode>,
        links: Vec<VirtualLink>,
        node_lists: Vec<VirtualNodeList>,
        list_lookup: HashMap<NodeId, usize>,
        time_slices: TimeSlices,
    ) -> VirtualNetwork {
        VirtualNetwork {
            nodes,
            links,
            node_lists,
            list_lookup,
            time_slices,
            groups: vec![],
            nb_od_classes: 0,
            exclusions: ExclusionSet::default(),
            costs: vec![],
            flows: vec![],
        }
    }

    /// expands a base network in its virtual network.
    pub fn generate(
        base: &BaseNetwork,
        time_slices: TimeSlices,
    ) -> Result<VirtualNetwork, VirtualNetworkError> {
        virtual_network_builder::generate(base, time_slices)
    }

    pub fn nodes(&self) -> &[VirtualNode] {
        &self.nodes
    }

    pub fn node(&self, index: VirtualNodeIndex) -> &VirtualNode {
        &self.nodes[index]
    }

    pub fn links(&self) -> &[VirtualLink] {
        &self.links
    }

    pub fn link(&self, index: VirtualLinkIndex) -> &VirtualLink {
        &self.links[index]
    }

    pub fn nb_virtual_links(&self) -> usize {
        self.links.len()
    }

    /// node lists in the order of the real nodes of the base network.
    pub fn node_lists(&self) -> &[VirtualNodeList] {
        &self.node_lists
    }

    pub fn node_list_of(&self, real_node: NodeId) -> Option<&VirtualNodeList> {
        self.list_lookup
            .get(&real_node)
            .map(|idx| &self.node_lists[*idx])
    }

    pub fn time_slices(&self) -> &TimeSlices {
        &self.time_slices
    }

    /// commodity groups found in the demand, sorted. flows and costs are
    /// indexed by the position of the group in this list.
    pub fn groups(&self) -> &[GroupId] {
        &self.groups
    }

    pub fn nb_od_classes(&self) -> usize {
        self.nb_od_classes
    }

    /// attaches demand to the node list of its origin. rows with zero
    /// quantity are skipped. flow accumulators are created for every group
    /// found in the demand.
    pub fn load_demand_cells(&mut self, cells: Vec<DemandCell>) -> Result<(), DemandError> {
        let mut accepted = vec![];
        for cell in cells.into_iter() {
            if !cell.quantity.is_finite() || cell.quantity < 0.0 {
                return Err(DemandError::InvalidQuantity(
                    cell.origin,
                    cell.destination,
                    cell.quantity,
                ));
            }
            for node in [cell.origin, cell.destination] {
                let has_handling = self.node_list_of(node).is_some_and(|l| {
                    l.origin().is_some() && l.destination().is_some()
                });
                if !has_handling {
                    return Err(DemandError::UnknownNode(node));
                }
            }
            if cell.time_slice >= self.time_slices.count {
                return Err(DemandError::InvalidTimeSlice(
                    cell.origin,
                    cell.destination,
                    cell.time_slice,
                    self.time_slices.count,
                ));
            }
            if cell.quantity > 0.0 {
                accepted.push(cell);
            }
        }

        self.groups = accepted.iter().map(|c| c.group).unique().sorted().collect();
        self.nb_od_classes = accepted
            .iter()
            .map(|c| c.od_class.index() + 1)
            .max()
            .unwrap_or(0);
        for list in self.node_lists.iter_mut() {
            list.demand.clear();
        }
        let n_cells = accepted.len();
        for cell in accepted.into_iter() {
            if let Some(idx) = self.list_lookup.get(&cell.origin) {
                self.node_lists[*idx].demand.push(cell);
            }
        }
        let n_links = self.links.len();
        let n_slices = self.time_slices.count;
        self.flows = (0..self.groups.len())
            .map(|g| GroupFlows::new(g, n_links, n_slices))
            .collect();
        self.costs = vec![vec![0.0; n_links]; self.groups.len()];
        log::info!(
            "loaded {} demand cells in {} groups and {} OD classes",
            n_cells,
            self.groups.len(),
            self.nb_od_classes
        );
        Ok(())
    }

    pub fn has_demand(&self) -> bool {
        self.node_lists.iter().any(|l| !l.demand.is_empty())
    }

    pub fn od_class_has_demand(&self, od_class: OdClass) -> bool {
        self.node_lists
            .iter()
            .any(|l| l.demand.iter().any(|d| d.od_class == od_class))
    }

    /// number of (group, origin node list) pairs with demand in the OD class.
    /// this is the number of progress updates of a batch.
    pub fn task_length(&self, od_class: OdClass) -> usize {
        self.groups
            .iter()
            .map(|g| {
                self.node_lists
                    .iter()
                    .filter(|l| l.has_demand_for_group(*g, od_class))
                    .count()
            })
            .sum()
    }

    pub fn set_exclusions(&mut self, exclusions: ExclusionSet) {
        log::info!("loaded {} exclusion rules", exclusions.len());
        self.exclusions = exclusions;
    }

    pub fn exclusions(&self) -> &ExclusionSet {
        &self.exclusions
    }

    /// true if an exclusion rule forbids the group to use a transition link at
    /// its real node. moving links are never excluded.
    pub fn is_excluded(&self, group_index: usize, link: VirtualLinkIndex) -> bool {
        let link = &self.links[link];
        if !link.kind.is_node_transition() || self.exclusions.is_empty() {
            return false;
        }
        let (begin, end) = (&self.nodes[link.begin], &self.nodes[link.end]);
        self.exclusions.is_excluded(
            self.groups[group_index],
            begin.real_node,
            begin.mode,
            begin.means,
            end.mode,
            end.means,
        )
    }

    /// unit cost of a link for a group, as computed for the current batch.
    pub fn link_cost(&self, group_index: usize, link: VirtualLinkIndex) -> f64 {
        self.costs[group_index][link]
    }

    /// moves the flow accumulators out of the network, one per group, so
    /// they can be handed to the workers of a batch.
    pub fn take_flows(&mut self) -> Vec<GroupFlows> {
        std::mem::take(&mut self.flows)
    }

    /// puts back the accumulators returned by the workers, in group order.
    pub fn restore_flows(&mut self, mut flows: Vec<GroupFlows>) {
        flows.sort_by_key(|f| f.group_index());
        self.flows = flows;
    }

    pub fn flows(&self) -> &[GroupFlows] {
        &self.flows
    }

    pub fn group_flows(&self, group_index: usize) -> &GroupFlows {
        &self.flows[group_index]
    }

    /// current flow of every group and time slice on a link.
    pub fn total_volume(&self, link: VirtualLinkIndex) -> f64 {
        self.flows.iter().map(|f| f.current_total(link)).sum()
    }

    /// combines current and auxiliary flows of every group, see [`GroupFlows::combine`].
    pub fn combine_flows(&mut self, lambda: f64) {
        for flows in self.flows.iter_mut() {
            flows.combine(lambda);
        }
    }

    /// converts the current flows in vehicles, using the average load of the
    /// vehicle carrying the goods on each link. a carrier with flow but no
    /// average load is reported once per group and counts no vehicles.
    pub fn flows_to_vehicles(&mut self, cost_functions: &CostFunctionSet) {
        for flows in self.flows.iter_mut() {
            let group = self.groups[flows.group_index()];
            let loads = self
                .links
                .iter()
                .map(|l| cost_functions.average_load(group, l.carrier_mode, l.carrier_means))
                .collect_vec();
            let missing = self
                .links
                .iter()
                .zip(loads.iter())
                .enumerate()
                .filter(|(idx, (_, load))| load.is_none() && flows.current_total(*idx) > 0.0)
                .map(|(_, (l, _))| (l.carrier_mode, l.carrier_means))
                .unique()
                .collect_vec();
            for (mode, means) in missing.into_iter() {
                log::warn!(
                    "group {group}: no average load for mode {mode}, means {means}, flow carried without vehicles"
                );
            }
            flows.flows_to_vehicles(&loads);
        }
    }
}
