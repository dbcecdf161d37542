use std::{cmp::Reverse, collections::BinaryHeap};

use ordered_float::OrderedFloat;

use crate::model::virtual_network::{VirtualLinkIndex, VirtualNetwork, VirtualNodeIndex};

use super::SearchTree;

/// shortest paths from `source` to every reachable virtual node.
///
/// `link_cost` returns `None` for links the search may not use.
pub fn one_to_all<F>(vnet: &VirtualNetwork, source: VirtualNodeIndex, link_cost: F) -> SearchTree
where
    F: Fn(VirtualLinkIndex) -> Option<f64>,
{
    let mut tree = SearchTree::new(vnet.nodes().len());
    let mut heap = BinaryHeap::new();
    tree.dist[source] = 0.0;
    heap.push(Reverse((OrderedFloat(0.0), source)));

    while let Some(Reverse((OrderedFloat(dist), node))) = heap.pop() {
        if dist > tree.dist[node] {
            continue;
        }
        for link_idx in vnet.node(node).out_links() {
            let Some(cost) = link_cost(*link_idx) else {
                continue;
            };
            let next = vnet.link(*link_idx).end;
            let candidate = dist + cost;
            if candidate < tree.dist[next] {
                tree.dist[next] = candidate;
                tree.pred[next] = Some(*link_idx);
                heap.push(Reverse((OrderedFloat(candidate), next)));
            }
        }
    }
    tree
}
