use std::collections::HashMap;

use crate::{
    algorithm::search::{heuristic_factor, shortest_path},
    model::{
        output::PathRecord,
        virtual_network::{VirtualLinkIndex, VirtualNodeIndex, VirtualNodeList},
    },
};

use super::{AssignmentWorkerParameters, WorkerContext, WorkerOutcome, WorkerStrategy};

/// routes every OD pair on `iterations` successive shortest paths, each
/// carrying an equal share of the demand. after every route, the cost of
/// the links it used is marked up by `cost_markup` for the next search of
/// the same OD pair, which spreads the demand over alternative routes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactMultiFlowStrategy;

impl WorkerStrategy for ExactMultiFlowStrategy {
    /// heuristic factor of the group
    type GroupState = f64;

    fn prepare(&self, ctx: &WorkerContext, item: &AssignmentWorkerParameters) -> f64 {
        heuristic_factor(ctx.vnet, |l| ctx.usable_cost(item.group_index, l))
    }

    fn assign_origin(
        &self,
        ctx: &WorkerContext,
        factor: &f64,
        item: &mut AssignmentWorkerParameters,
        origin: &VirtualNodeList,
        outcome: &mut WorkerOutcome,
    ) {
        let Some(source) = origin.origin() else {
            return;
        };
        let group = ctx.vnet.groups()[item.group_index];
        let routes = ctx.parameters.iterations;
        let markup = 1.0 + ctx.parameters.cost_markup;

        for cell in origin.demand_for_group(group, item.od_class) {
            if ctx.cancel.is_cancelled() {
                return;
            }
            let Some(target) = ctx.destination_of(cell.destination) else {
                outcome.lost_paths += 1;
                if ctx.lost_path(cell) {
                    return;
                }
                continue;
            };
            let (tx, ty) = match ctx.vnet.node_list_of(cell.destination) {
                Some(l) => (l.x, l.y),
                None => continue,
            };
            let heuristic = |n: VirtualNodeIndex| {
                ctx.vnet
                    .node_list_of(ctx.vnet.node(n).real_node)
                    .map(|l| factor * (l.x - tx).hypot(l.y - ty))
                    .unwrap_or(0.0)
            };
            let share = cell.quantity / routes as f64;
            let mut markups: HashMap<VirtualLinkIndex, f64> = HashMap::new();

            for _ in 0..routes {
                let cost = |l: VirtualLinkIndex| {
                    ctx.usable_cost(item.group_index, l)
                        .map(|c| c * markups.get(&l).copied().unwrap_or(1.0))
                };
                let Some((path_cost, links)) = shortest_path(ctx.vnet, source, target, cost, heuristic)
                else {
                    outcome.lost_paths += 1;
                    if ctx.lost_path(cell) {
                        return;
                    }
                    break;
                };
                for link in links.iter() {
                    item.flows.add_current(*link, cell.time_slice, share);
                    *markups.entry(*link).or_insert(1.0) *= markup;
                }
                if ctx.parameters.save_paths {
                    outcome.paths.push(PathRecord {
                        iteration: item.iteration,
                        group,
                        od_class: item.od_class,
                        origin: cell.origin,
                        destination: cell.destination,
                        time_slice: cell.time_slice,
                        quantity: share,
                        cost: path_cost,
                        links,
                    });
                }
            }
        }
    }
}
