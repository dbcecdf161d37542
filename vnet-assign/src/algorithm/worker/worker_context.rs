use vnet_core::model::NodeId;

use crate::{
    config::AssignmentParameters,
    model::{
        demand::DemandCell,
        progress::{CancellationToken, ProgressSink},
        virtual_network::{VirtualLinkIndex, VirtualNetwork, VirtualNodeIndex},
    },
};

/// what the workers of a batch share. everything is read-only except the
/// cancellation token.
#[derive(Clone, Copy)]
pub struct WorkerContext<'a> {
    pub vnet: &'a VirtualNetwork,
    pub parameters: &'a AssignmentParameters,
    pub progress: &'a dyn ProgressSink,
    pub cancel: &'a CancellationToken,
}

impl<'a> WorkerContext<'a> {
    /// cost of a link for the group in the current batch, or `None` if the
    /// link is excluded for the group or has no cost rule.
    pub fn usable_cost(&self, group_index: usize, link: VirtualLinkIndex) -> Option<f64> {
        if self.vnet.is_excluded(group_index, link) {
            return None;
        }
        let cost = self.vnet.link_cost(group_index, link);
        cost.is_finite().then_some(cost)
    }

    /// virtual node where the demand bound to a real node is unloaded.
    pub fn destination_of(&self, real_node: NodeId) -> Option<VirtualNodeIndex> {
        self.vnet
            .node_list_of(real_node)
            .and_then(|l| l.destination())
    }

    /// reports an OD pair that cannot be routed. returns true when the run
    /// must stop because lost paths are fatal.
    pub fn lost_path(&self, cell: &DemandCell) -> bool {
        if self.parameters.log_lost_paths {
            log::warn!(
                "lost path for group {} class {} from {} to {} (quantity {})",
                cell.group,
                cell.od_class,
                cell.origin,
                cell.destination,
                cell.quantity
            );
        }
        if self.parameters.abort_on_lost_path {
            self.cancel.cancel();
            return true;
        }
        false
    }
}
