use thiserror::Error;
use vnet_core::model::OdClass;

use crate::{
    config::ConfigurationError,
    model::{
        cost::CostError, demand::DemandError, exclusion::ExclusionError, network::NetworkError,
        output::OutputError, virtual_network::VirtualNetworkError,
    },
};

#[derive(Error, Debug)]
pub enum AssignmentError {
    #[error(transparent)]
    Configuration {
        #[from]
        source: ConfigurationError,
    },
    #[error(transparent)]
    Network {
        #[from]
        source: NetworkError,
    },
    #[error(transparent)]
    VirtualNetwork {
        #[from]
        source: VirtualNetworkError,
    },
    #[error(transparent)]
    Exclusion {
        #[from]
        source: ExclusionError,
    },
    #[error(transparent)]
    Demand {
        #[from]
        source: DemandError,
    },
    #[error(transparent)]
    Cost {
        #[from]
        source: CostError,
    },
    #[error(transparent)]
    Output {
        #[from]
        source: OutputError,
    },
    #[error("results of scenario {0} already exist and overwriting was not confirmed")]
    ScenarioRejected(u32),
    #[error("the demand is empty")]
    NoDemand,
    #[error("assignment of OD class {0} was cancelled in iteration {1}")]
    WorkerCancelled(OdClass, usize),
    #[error("{0} assignment worker(s) panicked")]
    WorkerPanicked(usize),
    #[error("line search failed: objective derivative is {0}")]
    NumericFailure(f64),
    #[error("the virtual network has not been built")]
    NetworkNotBuilt,
}
