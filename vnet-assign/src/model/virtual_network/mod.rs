mod cost_ops;
mod group_flows;
mod virtual_link;
mod virtual_network;
mod virtual_network_builder;
mod virtual_network_error;
mod virtual_node;
mod virtual_node_list;

pub use group_flows::GroupFlows;
pub use virtual_link::{VirtualLink, VirtualLinkKind};
pub use virtual_network::VirtualNetwork;
pub use virtual_network_builder::VirtualNetworkBuilder;
pub use virtual_network_error::VirtualNetworkError;
pub use virtual_node::{VirtualNode, VirtualNodeKey, VirtualNodeKind};
pub use virtual_node_list::VirtualNodeList;

/// position of a virtual node in [`VirtualNetwork::nodes`].
pub type VirtualNodeIndex = usize;

/// position of a virtual link in [`VirtualNetwork::links`].
pub type VirtualLinkIndex = usize;
