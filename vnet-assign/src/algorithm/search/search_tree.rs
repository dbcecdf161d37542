use crate::model::virtual_network::{VirtualLinkIndex, VirtualNetwork, VirtualNodeIndex};

/// shortest path tree of a one-to-all search.
#[derive(Debug, Clone)]
pub struct SearchTree {
    pub(super) dist: Vec<f64>,
    pub(super) pred: Vec<Option<VirtualLinkIndex>>,
}

impl SearchTree {
    pub(super) fn new(n_nodes: usize) -> SearchTree {
        SearchTree {
            dist: vec![f64::INFINITY; n_nodes],
            pred: vec![None; n_nodes],
        }
    }

    /// cost of the shortest path to a node, if it was reached.
    pub fn cost_to(&self, node: VirtualNodeIndex) -> Option<f64> {
        self.dist.get(node).copied().filter(|d| d.is_finite())
    }

    /// links of the shortest path to a node, from the root of the tree.
    pub fn path_to(
        &self,
        vnet: &VirtualNetwork,
        node: VirtualNodeIndex,
    ) -> Option<Vec<VirtualLinkIndex>> {
        self.cost_to(node)?;
        Some(backtrack(&self.pred, vnet, node))
    }
}

/// follows predecessor links from `node` back to the root.
pub(super) fn backtrack(
    pred: &[Option<VirtualLinkIndex>],
    vnet: &VirtualNetwork,
    node: VirtualNodeIndex,
) -> Vec<VirtualLinkIndex> {
    let mut links = vec![];
    let mut current = node;
    while let Some(link) = pred[current] {
        links.push(link);
        current = vnet.link(link).begin;
    }
    links.reverse();
    links
}
