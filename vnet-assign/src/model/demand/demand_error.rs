use thiserror::Error;
use vnet_core::model::NodeId;

#[derive(Error, Debug)]
pub enum DemandError {
    #[error("failure reading demand file {0}: {1}")]
    CsvReadError(String, csv::Error),
    #[error("demand from '{0}' to '{1}' has invalid quantity {2}")]
    InvalidQuantity(NodeId, NodeId, f64),
    #[error("demand references node '{0}' which is not in the network")]
    UnknownNode(NodeId),
    #[error("demand from '{0}' to '{1}' departs in time slice {2} but only {3} slices are configured")]
    InvalidTimeSlice(NodeId, NodeId, usize, usize),
}
