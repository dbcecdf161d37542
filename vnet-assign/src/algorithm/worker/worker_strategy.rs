use crate::model::virtual_network::VirtualNodeList;

use super::{AssignmentWorkerParameters, WorkerContext, WorkerOutcome};

/// the path search and flow deposit of one assignment method.
pub trait WorkerStrategy: Sync {
    /// data computed once per work item and reused for every origin.
    type GroupState;

    fn prepare(&self, ctx: &WorkerContext, item: &AssignmentWorkerParameters) -> Self::GroupState;

    /// routes the demand of the work item's group and OD class leaving one
    /// origin node. implementations check the cancellation token before every
    /// OD pair search and return early once it is set.
    fn assign_origin(
        &self,
        ctx: &WorkerContext,
        state: &Self::GroupState,
        item: &mut AssignmentWorkerParameters,
        origin: &VirtualNodeList,
        outcome: &mut WorkerOutcome,
    );
}
