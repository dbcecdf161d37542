use std::{cmp::Reverse, collections::BinaryHeap};

use ordered_float::OrderedFloat;

use crate::model::virtual_network::{
    VirtualLinkIndex, VirtualLinkKind, VirtualNetwork, VirtualNodeIndex,
};

use super::search_tree::backtrack;

/// smallest cost per unit of straight-line distance over the usable moving
/// links. multiplied by the distance to the destination it never
/// overestimates the remaining cost.
pub fn heuristic_factor<F>(vnet: &VirtualNetwork, link_cost: F) -> f64
where
    F: Fn(VirtualLinkIndex) -> Option<f64>,
{
    let factor = vnet
        .links()
        .iter()
        .enumerate()
        .filter(|(_, l)| l.kind == VirtualLinkKind::Moving)
        .filter_map(|(idx, l)| {
            let cost = link_cost(idx)?;
            let a = vnet.node_list_of(vnet.node(l.begin).real_node)?;
            let b = vnet.node_list_of(vnet.node(l.end).real_node)?;
            let distance = (a.x - b.x).hypot(a.y - b.y);
            (distance > 0.0).then_some(cost / distance)
        })
        .fold(f64::INFINITY, f64::min);
    if factor.is_finite() {
        factor
    } else {
        0.0
    }
}

/// A* search from `source` to `target`. returns the cost and the links of
/// the path, or `None` if the target cannot be reached.
///
/// `link_cost` returns `None` for links the search may not use and
/// `heuristic` must not overestimate the cost from a node to the target.
pub fn shortest_path<F, H>(
    vnet: &VirtualNetwork,
    source: VirtualNodeIndex,
    target: VirtualNodeIndex,
    link_cost: F,
    heuristic: H,
) -> Option<(f64, Vec<VirtualLinkIndex>)>
where
    F: Fn(VirtualLinkIndex) -> Option<f64>,
    H: Fn(VirtualNodeIndex) -> f64,
{
    let n_nodes = vnet.nodes().len();
    let mut dist = vec![f64::INFINITY; n_nodes];
    let mut pred: Vec<Option<VirtualLinkIndex>> = vec![None; n_nodes];
    let mut closed = vec![false; n_nodes];
    let mut heap = BinaryHeap::new();
    dist[source] = 0.0;
    heap.push(Reverse((OrderedFloat(heuristic(source)), source)));

    while let Some(Reverse((_, node))) = heap.pop() {
        if node == target {
            return Some((dist[target], backtrack(&pred, vnet, target)));
        }
        if closed[node] {
            continue;
        }
        closed[node] = true;
        for link_idx in vnet.node(node).out_links() {
            let Some(cost) = link_cost(*link_idx) else {
                continue;
            };
            let next = vnet.link(*link_idx).end;
            if closed[next] {
                continue;
            }
            let candidate = dist[node] + cost;
            if candidate < dist[next] {
                dist[next] = candidate;
                pred[next] = Some(*link_idx);
                heap.push(Reverse((OrderedFloat(candidate + heuristic(next)), next)));
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        algorithm::search::one_to_all,
        config::TimeSlices,
        model::network::{BaseNetwork, RealLink, RealNode},
    };
    use vnet_core::model::{LinkId, NodeId};

    fn diamond() -> VirtualNetwork {
        let base = BaseNetwork::new(
            vec![
                RealNode::new(1, 0.0, 0.0, false),
                RealNode::new(2, 1.0, 0.0, false),
                RealNode::new(3, 2.0, 0.0, false),
                RealNode::new(4, 1.0, 1.0, false),
            ],
            vec![
                RealLink::new(12, 1, 2, 1, 1, 1.0),
                RealLink::new(23, 2, 3, 1, 1, 1.0),
                RealLink::new(14, 1, 4, 1, 1, 2.0),
                RealLink::new(43, 4, 3, 1, 1, 2.0),
            ],
        )
        .unwrap();
        VirtualNetwork::generate(&base, TimeSlices::default()).unwrap()
    }

    fn length_cost(vnet: &VirtualNetwork) -> impl Fn(VirtualLinkIndex) -> Option<f64> + '_ {
        |l| Some(vnet.link(l).length)
    }

    fn od(vnet: &VirtualNetwork, o: i64, d: i64) -> (VirtualNodeIndex, VirtualNodeIndex) {
        let origin = vnet.node_list_of(NodeId(o)).unwrap().origin().unwrap();
        let destination = vnet.node_list_of(NodeId(d)).unwrap().destination().unwrap();
        (origin, destination)
    }

    #[test]
    fn test_astar_matches_dijkstra() {
        let vnet = diamond();
        let cost = length_cost(&vnet);
        let factor = heuristic_factor(&vnet, &cost);
        assert_eq!(factor, 1.0);
        let (origin, destination) = od(&vnet, 1, 3);
        let target = vnet.node_list_of(NodeId(3)).unwrap();
        let (tx, ty) = (target.x, target.y);
        let heuristic = |n: VirtualNodeIndex| {
            let list = vnet.node_list_of(vnet.node(n).real_node).unwrap();
            factor * (list.x - tx).hypot(list.y - ty)
        };
        let (astar_cost, links) = shortest_path(&vnet, origin, destination, &cost, heuristic).unwrap();
        let tree = one_to_all(&vnet, origin, &cost);
        assert_eq!(tree.cost_to(destination), Some(astar_cost));
        assert_eq!(astar_cost, 2.0);
        assert_eq!(tree.path_to(&vnet, destination), Some(links.clone()));
        let real_links: Vec<LinkId> = links
            .iter()
            .filter(|l| vnet.link(**l).kind == VirtualLinkKind::Moving)
            .map(|l| vnet.node(vnet.link(*l).begin).real_link)
            .collect();
        assert_eq!(real_links, vec![LinkId(12), LinkId(23)]);
    }

    #[test]
    fn test_pruned_links_force_detour() {
        let vnet = diamond();
        // forbid both directions of real link 23
        let cost = |l: VirtualLinkIndex| {
            let link = vnet.link(l);
            let on_23 = link.kind == VirtualLinkKind::Moving
                && vnet.node(link.begin).real_link == LinkId(23);
            (!on_23).then_some(link.length)
        };
        let (origin, destination) = od(&vnet, 1, 3);
        let (c, _) = shortest_path(&vnet, origin, destination, &cost, |_| 0.0).unwrap();
        assert_eq!(c, 4.0);
    }

    #[test]
    fn test_unreachable() {
        let vnet = diamond();
        let (origin, destination) = od(&vnet, 1, 3);
        let none = |_: VirtualLinkIndex| None;
        assert!(shortest_path(&vnet, origin, destination, none, |_| 0.0).is_none());
        let tree = one_to_all(&vnet, origin, none);
        assert!(tree.cost_to(destination).is_none());
        assert!(tree.path_to(&vnet, destination).is_none());
    }
}
