use crate::{
    algorithm::worker::FrankWolfeStrategy, config::AssignmentMethod,
    model::virtual_network::VirtualNetwork,
};

use super::{
    assignment_ops::AssignmentRun,
    line_search,
    stop_rule::{convergence_gap, stop_rule},
    Assignment, AssignmentContext, AssignmentError, AssignmentState, AssignmentSummary,
};

/// Frank-Wolfe equilibrium assignment. every iteration computes an
/// all-or-nothing assignment on the costs of the current flows and moves
/// the current flows towards it by the step size that minimizes the
/// objective, until the flows stop changing or the iteration cap is reached.
pub struct FrankWolfeAssignment {
    run: AssignmentRun,
}

impl FrankWolfeAssignment {
    pub fn new(context: AssignmentContext) -> FrankWolfeAssignment {
        FrankWolfeAssignment {
            run: AssignmentRun::new(context),
        }
    }

    fn execute(&mut self) -> Result<AssignmentSummary, AssignmentError> {
        self.run.prepare()?;
        let max_iterations = self.run.context.parameters.iterations;
        let precision = self.run.context.parameters.precision;
        let threads = self.run.context.parameters.threads;
        let save_paths = self.run.context.parameters.save_paths;
        let cost_functions = self.run.context.cost_functions.clone();
        let od_classes = self.run.od_classes()?;

        let mut lambda = 1.0;
        let mut gap = None;
        let mut converged = false;
        let mut iterations = 0;
        for iteration in 1..=max_iterations {
            iterations = iteration;
            for od_class in od_classes.iter() {
                self.run
                    .run_batch(&FrankWolfeStrategy, iteration - 1, iteration, *od_class)?;
            }

            let vnet = self.run.vnet_mut()?;
            if iteration > 1 {
                let (step, evaluations) = line_search::bisect(|m| {
                    let d = vnet.objective_function_first_derivative(m, &cost_functions, threads)?;
                    Ok(d)
                })?;
                log::debug!("iteration {iteration}: step size {step} after {evaluations} evaluations");
                lambda = step;
            }
            vnet.combine_flows(lambda);
            vnet.flows_to_vehicles(&cost_functions);
            if save_paths {
                self.run.paths.split_paths(iteration, lambda);
            }

            let vnet = self.run.vnet()?;
            if iteration > 1 {
                gap = Some(convergence_gap(vnet));
            }
            log::info!(
                "iteration {iteration}: lambda {lambda:.4}, gap {}",
                gap.map(|g| format!("{g:.6}")).unwrap_or_else(|| String::from("-"))
            );
            if stop_rule(vnet, iteration, precision) {
                converged = true;
                break;
            }
        }
        self.run.transition(AssignmentState::FlowsFinalized);

        let (paths, flow_records) = self.run.persist()?;
        Ok(AssignmentSummary {
            scenario: self.run.context.parameters.scenario,
            method: AssignmentMethod::FrankWolfe,
            iterations,
            lambda: Some(lambda),
            gap,
            converged,
            lost_paths: self.run.lost_paths,
            paths,
            flow_records,
        })
    }
}

impl Assignment for FrankWolfeAssignment {
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
