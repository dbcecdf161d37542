use crate::{
    algorithm::worker::ExactMultiFlowStrategy, config::AssignmentMethod,
    model::virtual_network::VirtualNetwork,
};

use super::{
    assignment_ops::AssignmentRun, Assignment, AssignmentContext, AssignmentError,
    AssignmentState, AssignmentSummary,
};

/// exact multi-flow assignment: every OD class is assigned once, on the
/// initial link costs, with `iterations` alternative routes per OD pair.
pub struct ExactMfAssignment {
    run: AssignmentRun,
}

impl ExactMfAssignment {
    pub fn new(context: AssignmentContext) -> ExactMfAssignment {
        ExactMfAssignment {
            run: AssignmentRun::new(context),
        }
    }

    fn execute(&mut self) -> Result<AssignmentSummary, AssignmentError> {
        self.run.prepare()?;
        for od_class in self.run.od_classes()? {
            self.run
                .run_batch(&ExactMultiFlowStrategy, 0, 0, od_class)?;
        }

        let cost_functions = self.run.context.cost_functions.clone();
        self.run.vnet_mut()?.flows_to_vehicles(&cost_functions);
        self.run.transition(AssignmentState::FlowsFinalized);

        let (paths, flow_records) = self.run.persist()?;
        Ok(AssignmentSummary {
            scenario: self.run.context.parameters.scenario,
            method: AssignmentMethod::ExactMultiFlow,
            iterations: 1,
            lambda: None,
            gap: None,
            converged: true,
            lost_paths: self.run.lost_paths,
            paths,
            flow_records,
        })
    }
}

impl Assignment for ExactMfAssignment {
    fn assign(&mut self) -> Result<AssignmentSummary, AssignmentError> {
        let result = self.execute();
        if let Err(e) = &result {
            self.run.abort(e);
        }
        result
    }

    fn state(&self) -> AssignmentState {
        self.run.state
    }

    fn virtual_network(&self) -> Option<&VirtualNetwork> {
        self.run.vnet.as_ref()
    }
}
