use thiserror::Error;
use vnet_core::model::NodeId;

#[derive(Error, Debug)]
pub enum ExclusionError {
    #[error("failure reading exclusions file {0}: {1}")]
    CsvReadError(String, csv::Error),
    #[error("exclusion at node '{0}' has invalid {1} {2}")]
    InvalidField(NodeId, String, i32),
    #[error("exclusion has invalid node '{0}'")]
    InvalidNode(NodeId),
}
