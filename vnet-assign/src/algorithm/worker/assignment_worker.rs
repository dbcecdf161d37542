use vnet_core::{
    model::OdClass,
    util::{WorkItem, WorkQueue},
};

use crate::model::{output::PathRecord, virtual_network::GroupFlows};

use super::{WorkerContext, WorkerStrategy};

/// one unit of work: the demand of a commodity group in an OD class. the
/// flow accumulators of the group travel with the item, so the worker that
/// dequeues it is the only writer of the group's flows.
#[derive(Debug)]
pub struct AssignmentWorkerParameters {
    pub group_index: usize,
    pub od_class: OdClass,
    pub iteration: usize,
    pub flows: GroupFlows,
}

/// what a worker hands back when it leaves its loop.
#[derive(Debug, Default)]
pub struct WorkerOutcome {
    /// the accumulators of every group the worker dequeued
    pub flows: Vec<GroupFlows>,
    pub paths: Vec<PathRecord>,
    pub lost_paths: usize,
    pub cancelled: bool,
}

/// consumes work items from a queue until it dequeues a stop marker.
pub struct AssignmentWorker<'a, S: WorkerStrategy> {
    queue: &'a WorkQueue<AssignmentWorkerParameters>,
    context: WorkerContext<'a>,
    strategy: &'a S,
}

impl<'a, S: WorkerStrategy> AssignmentWorker<'a, S> {
    pub fn new(
        queue: &'a WorkQueue<AssignmentWorkerParameters>,
        context: WorkerContext<'a>,
        strategy: &'a S,
    ) -> AssignmentWorker<'a, S> {
        AssignmentWorker {
            queue,
            context,
            strategy,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.context.cancel.is_cancelled()
    }

    /// the worker loop. once the run is cancelled the remaining items are
    /// still dequeued, so their flows are returned, but no longer assigned.
    pub fn run(self) -> WorkerOutcome {
        let mut outcome = WorkerOutcome::default();
        loop {
            match self.queue.get_work() {
                WorkItem::Stop => break,
                WorkItem::Task(mut item) => {
                    if !self.is_cancelled() {
                        self.assign_group(&mut item, &mut outcome);
                    }
                    outcome.flows.push(item.flows);
                }
            }
        }
        outcome.cancelled = self.is_cancelled();
        outcome
    }

    fn assign_group(&self, item: &mut AssignmentWorkerParameters, outcome: &mut WorkerOutcome) {
        let ctx = &self.context;
        let group = ctx.vnet.groups()[item.group_index];
        let state = self.strategy.prepare(ctx, item);
        log::debug!(
            "assigning group {} in OD class {} (iteration {})",
            group,
            item.od_class,
            item.iteration
        );
        for origin in ctx.vnet.node_lists() {
            if !origin.has_demand_for_group(group, item.od_class) {
                continue;
            }
            self.strategy
                .assign_origin(ctx, &state, item, origin, outcome);
            if self.is_cancelled() {
                return;
            }
            let message = format!("group {} origin {}", group, origin.real_node);
            if !ctx.progress.update_progress(&message) {
                log::info!("assignment aborted through progress sink");
                ctx.cancel.cancel();
                return;
            }
        }
    }
}
