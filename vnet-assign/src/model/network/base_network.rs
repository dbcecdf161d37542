use std::collections::{HashMap, HashSet};

use vnet_core::model::NodeId;

use super::{NetworkError, RealLink, RealNode};

/// the real transport network the virtual network is generated from.
#[derive(Debug, Clone, Default)]
pub struct BaseNetwork {
    pub nodes: Vec<RealNode>,
    pub links: Vec<RealLink>,
}

impl BaseNetwork {
    /// builds a base network, checking that its topology is consistent.
    pub fn new(nodes: Vec<RealNode>, links: Vec<RealLink>) -> Result<BaseNetwork, NetworkError> {
        let network = BaseNetwork { nodes, links };
        network.validate()?;
        Ok(network)
    }

    /// node lookup by identifier.
    pub fn node_lookup(&self) -> HashMap<NodeId, &RealNode> {
        self.nodes.iter().map(|n| (n.id, n)).collect()
    }

    fn validate(&self) -> Result<(), NetworkError> {
        if self.links.is_empty() {
            return Err(NetworkError::NoLinks);
        }
        let mut node_ids = HashSet::new();
        for node in self.nodes.iter() {
            if !node_ids.insert(node.id) {
                return Err(NetworkError::DuplicateNode(node.id));
            }
        }
        let mut link_ids = HashSet::new();
        for link in self.links.iter() {
            if !link_ids.insert(link.id) {
                return Err(NetworkError::DuplicateLink(link.id));
            }
            for node in [link.node1, link.node2] {
                if !node_ids.contains(&node) {
                    return Err(NetworkError::MissingNode(link.id, node));
                }
            }
            if link.node1 == link.node2 {
                return Err(NetworkError::InvalidLink(
                    link.id,
                    String::from("both ends are the same node"),
                ));
            }
            if link.mode <= 0 || link.means <= 0 {
                return Err(NetworkError::InvalidLink(
                    link.id,
                    format!(
                        "mode and means must be positive, found {}/{}",
                        link.mode, link.means
                    ),
                ));
            }
            if !link.length.is_finite() || link.length < 0.0 {
                return Err(NetworkError::InvalidLink(
                    link.id,
                    format!("invalid length {}", link.length),
                ));
            }
        }
        Ok(())
    }
}
