use itertools::Itertools;
use vnet_core::{model::OdClass, util::WorkQueue};

use crate::{
    algorithm::worker::{
        AssignmentWorker, AssignmentWorkerParameters, WorkerContext, WorkerOutcome,
        WorkerStrategy,
    },
    model::{
        output::{FlowRecord, OutputError, PathStore},
        progress::CancellationToken,
        virtual_network::VirtualNetwork,
    },
};

use super::{AssignmentContext, AssignmentError, AssignmentState};

/// the state shared by both assignment methods: collaborators, virtual
/// network, collected paths and the position in the run.
pub struct AssignmentRun {
    pub context: AssignmentContext,
    pub state: AssignmentState,
    pub vnet: Option<VirtualNetwork>,
    pub paths: PathStore,
    pub lost_paths: usize,
}

impl AssignmentRun {
    pub fn new(context: AssignmentContext) -> AssignmentRun {
        AssignmentRun {
            context,
            state: AssignmentState::Init,
            vnet: None,
            paths: PathStore::new(),
            lost_paths: 0,
        }
    }

    pub fn transition(&mut self, next: AssignmentState) {
        log::info!("scenario {}: {} -> {}", self.context.parameters.scenario, self.state, next);
        self.state = next;
    }

    pub fn abort(&mut self, error: &AssignmentError) {
        log::error!(
            "scenario {}: assignment failed: {}",
            self.context.parameters.scenario,
            error
        );
        self.transition(AssignmentState::Aborted);
    }

    pub fn vnet(&self) -> Result<&VirtualNetwork, AssignmentError> {
        self.vnet.as_ref().ok_or(AssignmentError::NetworkNotBuilt)
    }

    pub fn vnet_mut(&mut self) -> Result<&mut VirtualNetwork, AssignmentError> {
        self.vnet.as_mut().ok_or(AssignmentError::NetworkNotBuilt)
    }

    /// checks the output slot, builds the virtual network and loads the
    /// exclusions and the demand.
    pub fn prepare(&mut self) -> Result<(), AssignmentError> {
        let params = &self.context.parameters;
        self.context
            .output
            .accept_scenario(params.scenario, params.confirm_overwrite)
            .map_err(|e| match e {
                OutputError::ScenarioExists(s) => AssignmentError::ScenarioRejected(s),
                other => AssignmentError::from(other),
            })?;

        let mut vnet = VirtualNetwork::generate(&self.context.network, params.time_slices)?;
        self.transition(AssignmentState::NetworkBuilt);

        if self.context.exclusions.has_exclusions() {
            let exclusions = self.context.exclusions.load_exclusions()?;
            vnet.set_exclusions(exclusions);
        }
        self.context.demand.load_demand(&mut vnet)?;
        if !vnet.has_demand() {
            return Err(AssignmentError::NoDemand);
        }
        self.vnet = Some(vnet);
        self.transition(AssignmentState::DemandLoaded);
        Ok(())
    }

    /// OD classes that carry demand, in increasing order.
    pub fn od_classes(&self) -> Result<Vec<OdClass>, AssignmentError> {
        let vnet = self.vnet()?;
        let classes = (0..vnet.nb_od_classes())
            .map(|c| OdClass(c as u8))
            .filter(|c| vnet.od_class_has_demand(*c))
            .collect_vec();
        Ok(classes)
    }

    /// assigns one OD class: computes the link costs, then hands one work item
    /// per commodity group to a fresh pool of `threads` workers and waits for
    /// all of them.
    pub fn run_batch<S: WorkerStrategy>(
        &mut self,
        strategy: &S,
        cost_iteration: usize,
        iteration: usize,
        od_class: OdClass,
    ) -> Result<(), AssignmentError> {
        self.transition(AssignmentState::PerClassAssignment {
            iteration,
            od_class,
        });
        let threads = self.context.parameters.threads;
        let Some(vnet) = self.vnet.as_mut() else {
            return Err(AssignmentError::NetworkNotBuilt);
        };
        vnet.compute_costs(cost_iteration, od_class, &self.context.cost_functions, threads)?;
        let group_flows = vnet.take_flows();
        let vnet: &VirtualNetwork = vnet;

        let queue: WorkQueue<AssignmentWorkerParameters> = WorkQueue::new();
        let cancel = CancellationToken::new();
        let context = WorkerContext {
            vnet,
            parameters: &self.context.parameters,
            progress: self.context.progress.as_ref(),
            cancel: &cancel,
        };
        let n_groups = group_flows.len();
        context.progress.start_progress(vnet.task_length(od_class));
        log::debug!(
            "iteration {iteration}, OD class {od_class}: {n_groups} groups on {threads} workers"
        );

        let results = std::thread::scope(|s| {
            let handles = (0..threads)
                .map(|_| {
                    let worker = AssignmentWorker::new(&queue, context, strategy);
                    s.spawn(move || worker.run())
                })
                .collect_vec();
            for flows in group_flows.into_iter() {
                queue.add_task(AssignmentWorkerParameters {
                    group_index: flows.group_index(),
                    od_class,
                    iteration,
                    flows,
                });
            }
            queue.close(threads);
            handles.into_iter().map(|h| h.join()).collect_vec()
        });
        context.progress.stop_progress();

        let mut outcomes: Vec<WorkerOutcome> = vec![];
        let mut panicked = 0;
        for result in results.into_iter() {
            match result {
                Ok(outcome) => outcomes.push(outcome),
                Err(_) => panicked += 1,
            }
        }
        let cancelled = outcomes.iter().any(|o| o.cancelled);
        let mut flows = vec![];
        for outcome in outcomes.into_iter() {
            flows.extend(outcome.flows);
            self.paths.extend(outcome.paths);
            self.lost_paths += outcome.lost_paths;
        }
        if panicked > 0 {
            // the accumulators held by the panicked workers are gone
            self.vnet = None;
            return Err(AssignmentError::WorkerPanicked(panicked));
        }
        self.vnet_mut()?.restore_flows(flows);

        if cancelled {
            return Err(AssignmentError::WorkerCancelled(od_class, iteration));
        }
        Ok(())
    }

    /// writes the paths, if they are saved, and the flows.
    pub fn persist(&mut self) -> Result<(usize, usize), AssignmentError> {
        let scenario = self.context.parameters.scenario;
        let complete = self.context.parameters.save_complete_network;
        let n_paths = if self.context.parameters.save_paths {
            self.paths.sort();
            self.context
                .output
                .save_paths(scenario, self.paths.records())?;
            self.paths.len()
        } else {
            0
        };
        let vnet = self.vnet.as_ref().ok_or(AssignmentError::NetworkNotBuilt)?;
        let records = FlowRecord::from_network(vnet, complete);
        self.context
            .output
            .save_flows(scenario, vnet.groups(), &records)?;
        self.transition(AssignmentState::Persisted);
        Ok((n_paths, records.len()))
    }
}
