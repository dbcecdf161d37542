use std::collections::HashMap;

use itertools::Itertools;
use kdam::tqdm;
use vnet_core::model::NodeId;

use crate::{config::TimeSlices, model::network::BaseNetwork};

use super::{
    VirtualLink, VirtualLinkIndex, VirtualLinkKind, VirtualNetwork, VirtualNetworkError,
    VirtualNode, VirtualNodeIndex, VirtualNodeKey, VirtualNodeKind, VirtualNodeList,
};

/// assembles a [`VirtualNetwork`] node by node and link by link.
#[derive(Debug, Default)]
pub struct VirtualNetworkBuilder {
    nodes: Vec<VirtualNode>,
    links: Vec<VirtualLink>,
    node_lookup: HashMap<VirtualNodeKey, VirtualNodeIndex>,
    lists: Vec<VirtualNodeList>,
    list_lookup: HashMap<NodeId, usize>,
}

impl VirtualNetworkBuilder {
    pub fn new() -> VirtualNetworkBuilder {
        VirtualNetworkBuilder::default()
    }

    /// registers a real node. its virtual nodes are grouped in one [`VirtualNodeList`].
    pub fn add_real_node(&mut self, real_node: NodeId, x: f64, y: f64) {
        if !self.list_lookup.contains_key(&real_node) {
            self.list_lookup.insert(real_node, self.lists.len());
            self.lists.push(VirtualNodeList::new(real_node, x, y));
        }
    }

    /// adds a virtual node to the list of its real node, which must have been registered.
    pub fn add_node(&mut self, node: VirtualNode) -> Result<VirtualNodeIndex, VirtualNetworkError> {
        let key = node.key();
        if self.node_lookup.contains_key(&key) {
            return Err(VirtualNetworkError::DuplicateVirtualNode(key));
        }
        let list_idx = *self
            .list_lookup
            .get(&node.real_node)
            .ok_or(VirtualNetworkError::MissingNodeList(node.real_node))?;
        let index = self.nodes.len();
        let list = &mut self.lists[list_idx];
        list.virtual_nodes.push(index);
        match node.kind {
            VirtualNodeKind::Origin => list.origin = Some(index),
            VirtualNodeKind::Destination => list.destination = Some(index),
            VirtualNodeKind::Endpoint => {}
        }
        self.node_lookup.insert(key, index);
        self.nodes.push(node);
        Ok(index)
    }

    /// index of an existing virtual node, or a new one.
    pub fn get_or_add_node(
        &mut self,
        node: VirtualNode,
    ) -> Result<VirtualNodeIndex, VirtualNetworkError> {
        match self.node_lookup.get(&node.key()) {
            Some(index) => Ok(*index),
            None => self.add_node(node),
        }
    }

    /// adds a directed link. the carrier of loading links is the vehicle at the
    /// end node, for every other link it is the vehicle at the begin node.
    pub fn add_link(
        &mut self,
        kind: VirtualLinkKind,
        begin: VirtualNodeIndex,
        end: VirtualNodeIndex,
        length: f64,
    ) -> Result<VirtualLinkIndex, VirtualNetworkError> {
        let b = self
            .nodes
            .get(begin)
            .ok_or(VirtualNetworkError::MissingVirtualNode(begin))?;
        let e = self
            .nodes
            .get(end)
            .ok_or(VirtualNetworkError::MissingVirtualNode(end))?;
        if b.kind == VirtualNodeKind::Destination || e.kind == VirtualNodeKind::Origin {
            return Err(VirtualNetworkError::InvalidVirtualLink(
                b.key(),
                e.key(),
                String::from("origin nodes only have outgoing links and destination nodes only incoming links"),
            ));
        }
        if kind.is_node_transition() && b.real_node != e.real_node {
            return Err(VirtualNetworkError::InvalidVirtualLink(
                b.key(),
                e.key(),
                format!("{kind:?} link must stay at one real node"),
            ));
        }
        let (carrier_mode, carrier_means) = match kind {
            VirtualLinkKind::Loading => (e.mode, e.means),
            _ => (b.mode, b.means),
        };
        let index = self.links.len();
        self.links.push(VirtualLink {
            kind,
            begin,
            end,
            length,
            carrier_mode,
            carrier_means,
        });
        self.nodes[begin].out_links.push(index);
        Ok(index)
    }

    pub fn build(self, time_slices: TimeSlices) -> Result<VirtualNetwork, VirtualNetworkError> {
        if self.links.is_empty() {
            return Err(VirtualNetworkError::Empty);
        }
        Ok(VirtualNetwork::from_parts(
            self.nodes,
            self.links,
            self.lists,
            self.list_lookup,
            time_slices,
        ))
    }
}

/// expands a base network in its virtual network.
///
/// every real link gets one endpoint virtual node per end and a moving link
/// per direction. at every real node, origin and destination virtual nodes
/// are connected to the endpoints by loading and unloading links, and the
/// endpoints of different real links are connected by transit links (same
/// mode, means and service) or transhipment links (if the node allows it).
pub fn generate(
    base: &BaseNetwork,
    time_slices: TimeSlices,
) -> Result<VirtualNetwork, VirtualNetworkError> {
    let mut builder = VirtualNetworkBuilder::new();
    for node in base.nodes.iter() {
        builder.add_real_node(node.id, node.x, node.y);
    }
    let transhipment_nodes: HashMap<NodeId, bool> =
        base.nodes.iter().map(|n| (n.id, n.transhipment)).collect();

    let mut endpoints: HashMap<NodeId, Vec<VirtualNodeIndex>> = HashMap::new();
    let links_iter = tqdm!(
        base.links.iter(),
        total = base.links.len(),
        desc = "generate moving virtual links"
    );
    for link in links_iter {
        let a = builder.add_node(VirtualNode::endpoint(
            link.node1,
            link.id,
            link.mode,
            link.means,
            link.service,
        ))?;
        let b = builder.add_node(VirtualNode::endpoint(
            link.node2,
            link.id,
            link.mode,
            link.means,
            link.service,
        ))?;
        builder.add_link(VirtualLinkKind::Moving, a, b, link.length)?;
        if !link.oneway {
            builder.add_link(VirtualLinkKind::Moving, b, a, link.length)?;
        }
        endpoints.entry(link.node1).or_default().push(a);
        endpoints.entry(link.node2).or_default().push(b);
    }
    eprintln!();

    let nodes_iter = tqdm!(
        base.nodes.iter(),
        total = base.nodes.len(),
        desc = "generate virtual links at nodes"
    );
    for node in nodes_iter {
        let Some(node_endpoints) = endpoints.get(&node.id) else {
            continue;
        };
        let origin = builder.add_node(VirtualNode::origin(node.id))?;
        let destination = builder.add_node(VirtualNode::destination(node.id))?;
        for endpoint in node_endpoints.iter() {
            builder.add_link(VirtualLinkKind::Loading, origin, *endpoint, 0.0)?;
            builder.add_link(VirtualLinkKind::Unloading, *endpoint, destination, 0.0)?;
        }
        let allows_transhipment = transhipment_nodes.get(&node.id).copied().unwrap_or(false);
        for (from, to) in node_endpoints
            .iter()
            .cartesian_product(node_endpoints.iter())
        {
            let (f, t) = (&builder.nodes[*from], &builder.nodes[*to]);
            if f.real_link == t.real_link {
                continue;
            }
            let same_vehicle = f.mode == t.mode && f.means == t.means && f.service == t.service;
            if same_vehicle {
                builder.add_link(VirtualLinkKind::Transit, *from, *to, 0.0)?;
            } else if allows_transhipment {
                builder.add_link(VirtualLinkKind::Transhipment, *from, *to, 0.0)?;
            }
        }
    }
    eprintln!();

    let vnet = builder.build(time_slices)?;
    log::info!(
        "generated virtual network with {} virtual nodes and {} virtual links",
        vnet.nodes().len(),
        vnet.links().len()
    );
    Ok(vnet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::network::{RealLink, RealNode};
    use vnet_core::model::LinkId;

    fn count(vnet: &VirtualNetwork, kind: VirtualLinkKind) -> usize {
        vnet.links().iter().filter(|l| l.kind == kind).count()
    }

    #[test]
    fn test_single_link_network() {
        let base = BaseNetwork::new(
            vec![
                RealNode::new(1, 0.0, 0.0, false),
                RealNode::new(2, 1.0, 0.0, false),
            ],
            vec![RealLink::new(10, 1, 2, 1, 1, 1.0)],
        )
        .unwrap();
        let vnet = generate(&base, TimeSlices::default()).unwrap();
        // 2 endpoints + origin/destination per node
        assert_eq!(vnet.nodes().len(), 6);
        assert_eq!(count(&vnet, VirtualLinkKind::Moving), 2);
        assert_eq!(count(&vnet, VirtualLinkKind::Loading), 2);
        assert_eq!(count(&vnet, VirtualLinkKind::Unloading), 2);
        assert_eq!(count(&vnet, VirtualLinkKind::Transit), 0);
        assert_eq!(count(&vnet, VirtualLinkKind::Transhipment), 0);
    }

    #[test]
    fn test_transit_and_transhipment() {
        // node 2 joins a road link, a second road link and a rail link
        let base = BaseNetwork::new(
            vec![
                RealNode::new(1, 0.0, 0.0, false),
                RealNode::new(2, 1.0, 0.0, true),
                RealNode::new(3, 2.0, 0.0, false),
                RealNode::new(4, 2.0, 1.0, false),
            ],
            vec![
                RealLink::new(10, 1, 2, 1, 1, 1.0),
                RealLink::new(11, 2, 3, 1, 1, 1.0),
                RealLink::new(12, 2, 4, 2, 1, 1.5).oneway(),
            ],
        )
        .unwrap();
        let vnet = generate(&base, TimeSlices::default()).unwrap();
        assert_eq!(count(&vnet, VirtualLinkKind::Moving), 5);
        // road 10 <-> road 11
        assert_eq!(count(&vnet, VirtualLinkKind::Transit), 2);
        // road 10/11 <-> rail 12
        assert_eq!(count(&vnet, VirtualLinkKind::Transhipment), 4);
        let rail_moving = vnet
            .links()
            .iter()
            .filter(|l| l.kind == VirtualLinkKind::Moving)
            .filter(|l| vnet.node(l.begin).real_link == LinkId(12))
            .count();
        assert_eq!(rail_moving, 1);
    }

    #[test]
    fn test_no_transhipment_without_flag() {
        let base = BaseNetwork::new(
            vec![
                RealNode::new(1, 0.0, 0.0, false),
                RealNode::new(2, 1.0, 0.0, false),
                RealNode::new(3, 2.0, 0.0, false),
            ],
            vec![
                RealLink::new(10, 1, 2, 1, 1, 1.0),
                RealLink::new(11, 2, 3, 2, 1, 1.0),
            ],
        )
        .unwrap();
        let vnet = generate(&base, TimeSlices::default()).unwrap();
        assert_eq!(count(&vnet, VirtualLinkKind::Transhipment), 0);
    }

    #[test]
    fn test_builder_rejects_links_into_origin() {
        let mut builder = VirtualNetworkBuilder::new();
        builder.add_real_node(NodeId(1), 0.0, 0.0);
        let o = builder.add_node(VirtualNode::origin(NodeId(1))).unwrap();
        let e = builder
            .add_node(VirtualNode::endpoint(NodeId(1), LinkId(1), 1, 1, 0))
            .unwrap();
        assert!(builder.add_link(VirtualLinkKind::Unloading, e, o, 0.0).is_err());
        assert!(builder
            .add_node(VirtualNode::origin(NodeId(1)))
            .is_err());
        assert!(builder
            .add_node(VirtualNode::origin(NodeId(2)))
            .is_err());
    }
}
