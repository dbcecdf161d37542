use serde::Serialize;

use crate::{
    config::{AssignmentMethod, AssignmentParameters},
    model::{
        cost::CostFunctionSet,
        demand::{CsvDemandReader, DemandReader},
        exclusion::{CsvExclusionReader, ExclusionReader},
        network::{read_base_network, BaseNetwork},
        output::{AssignmentOutput, CsvOutput},
        progress::{KdamProgress, ProgressSink},
    },
};

use super::AssignmentError;

/// everything an assignment run reads from and writes to.
pub struct AssignmentContext {
    pub parameters: AssignmentParameters,
    pub network: BaseNetwork,
    pub cost_functions: CostFunctionSet,
    pub demand: Box<dyn DemandReader>,
    pub exclusions: Box<dyn ExclusionReader>,
    pub progress: Box<dyn ProgressSink>,
    pub output: Box<dyn AssignmentOutput>,
}

impl AssignmentContext {
    /// reads the base network and the cost functions named in the parameters
    /// and sets up the file-based demand, exclusion and output collaborators.
    pub fn from_parameters(
        parameters: AssignmentParameters,
    ) -> Result<AssignmentContext, AssignmentError> {
        let network = read_base_network(&parameters.nodes_file, &parameters.links_file)?;
        let cost_functions = CostFunctionSet::try_from(&parameters.cost_functions_file)?;
        let demand = Box::new(CsvDemandReader::new(&parameters.demand_file));
        let exclusions = Box::new(CsvExclusionReader::new(parameters.exclusions_file.clone()));
        let output = Box::new(CsvOutput::new(&parameters.output_directory));
        let progress = Box::new(KdamProgress::new("assignment"));
        Ok(AssignmentContext {
            parameters,
            network,
            cost_functions,
            demand,
            exclusions,
            progress,
            output,
        })
    }
}

/// what a successful run reports.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignmentSummary {
    pub scenario: u32,
    pub method: AssignmentMethod,
    /// outer iterations run (1 for the exact multi-flow assignment)
    pub iterations: usize,
    /// step size of the last Frank-Wolfe iteration
    pub lambda: Option<f64>,
    /// convergence gap of the last Frank-Wolfe iteration
    pub gap: Option<f64>,
    pub converged: bool,
    pub lost_paths: usize,
    pub paths: usize,
    pub flow_records: usize,
}
