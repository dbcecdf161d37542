use crate::{
    algorithm::search::one_to_all,
    model::{output::PathRecord, virtual_network::VirtualNodeList},
};

use super::{AssignmentWorkerParameters, WorkerContext, WorkerOutcome, WorkerStrategy};

/// all-or-nothing assignment under the current costs: one shortest path
/// tree per origin, the whole demand of every OD pair deposited on its
/// shortest path in the auxiliary flows.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrankWolfeStrategy;

impl WorkerStrategy for FrankWolfeStrategy {
    type GroupState = ();

    fn prepare(&self, _ctx: &WorkerContext, _item: &AssignmentWorkerParameters) {}

    fn assign_origin(
        &self,
        ctx: &WorkerContext,
        _state: &(),
        item: &mut AssignmentWorkerParameters,
        origin: &VirtualNodeList,
        outcome: &mut WorkerOutcome,
    ) {
        let Some(source) = origin.origin() else {
            return;
        };
        if ctx.cancel.is_cancelled() {
            return;
        }
        let group = ctx.vnet.groups()[item.group_index];
        let tree = one_to_all(ctx.vnet, source, |l| ctx.usable_cost(item.group_index, l));

        for cell in origin.demand_for_group(group, item.od_class) {
            if ctx.cancel.is_cancelled() {
                return;
            }
            let path = ctx
                .destination_of(cell.destination)
                .and_then(|target| Some((tree.cost_to(target)?, tree.path_to(ctx.vnet, target)?)));
            let Some((path_cost, links)) = path else {
                outcome.lost_paths += 1;
                if ctx.lost_path(cell) {
                    return;
                }
                continue;
            };
            for link in links.iter() {
                item.flows
                    .add_auxiliary(*link, cell.time_slice, cell.quantity);
            }
            if ctx.parameters.save_paths {
                outcome.paths.push(PathRecord {
                    iteration: item.iteration,
                    group,
                    od_class: item.od_class,
                    origin: cell.origin,
                    destination: cell.destination,
                    time_slice: cell.time_slice,
                    quantity: cell.quantity,
                    cost: path_cost,
                    links,
                });
            }
        }
    }
}
