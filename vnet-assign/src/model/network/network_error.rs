use thiserror::Error;
use vnet_core::model::{LinkId, NodeId};

#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("failure reading network file {0}: {1}")]
    CsvReadError(String, csv::Error),
    #[error("node '{0}' occurs more than once in the network")]
    DuplicateNode(NodeId),
    #[error("link '{0}' occurs more than once in the network")]
    DuplicateLink(LinkId),
    #[error("link '{0}' references node '{1}' which is not in the network")]
    MissingNode(LinkId, NodeId),
    #[error("link '{0}' is invalid: {1}")]
    InvalidLink(LinkId, String),
    #[error("network does not contain any links")]
    NoLinks,
}
