use thiserror::Error;
use vnet_core::model::NodeId;

use crate::model::network::NetworkError;

use super::VirtualNodeKey;

#[derive(Error, Debug)]
pub enum VirtualNetworkError {
    #[error("base network is inconsistent: {source}")]
    Network {
        #[from]
        source: NetworkError,
    },
    #[error("virtual node {0} occurs more than once")]
    DuplicateVirtualNode(VirtualNodeKey),
    #[error("virtual link references virtual node index {0} which does not exist")]
    MissingVirtualNode(usize),
    #[error("real node '{0}' has no virtual node list")]
    MissingNodeList(NodeId),
    #[error("virtual link {0} -> {1} is invalid: {2}")]
    InvalidVirtualLink(VirtualNodeKey, VirtualNodeKey, String),
    #[error("virtual network does not contain any links")]
    Empty,
}
