use crate::model::virtual_network::VirtualNetwork;

/// relative change of the flows between the two last iterations.
///
/// `|current - previous|` and `current` are summed over the outgoing links
/// of the virtual nodes, node list after node list, and the ratio of the
/// running sums is taken after every virtual node. the sums are never reset,
/// the gap is the largest of these running ratios.
pub fn convergence_gap(vnet: &VirtualNetwork) -> f64 {
    let mut numerator = 0.0;
    let mut denominator = 0.0;
    let mut max_gap = 0.0;
    for list in vnet.node_lists() {
        for node in list.virtual_nodes() {
            for link in vnet.node(*node).out_links() {
                for flows in vnet.flows() {
                    let current = flows.current_total(*link);
                    numerator += (current - flows.previous_total(*link)).abs();
                    denominator += current;
                }
            }
            let gap = numerator / denominator;
            if gap > max_gap {
                max_gap = gap;
            }
        }
    }
    max_gap
}

/// true when the flows did not move by more than `precision` since the
/// previous iteration. never true after the first iteration.
pub fn stop_rule(vnet: &VirtualNetwork, iteration: usize, precision: f64) -> bool {
    iteration > 1 && convergence_gap(vnet) < precision
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::TimeSlices,
        model::{
            demand::DemandCell,
            network::{BaseNetwork, RealLink, RealNode},
        },
    };

    fn network() -> VirtualNetwork {
        let base = BaseNetwork::new(
            vec![
                RealNode::new(1, 0.0, 0.0, false),
                RealNode::new(2, 1.0, 0.0, false),
                RealNode::new(3, 2.0, 0.0, false),
            ],
            vec![
                RealLink::new(10, 1, 2, 1, 1, 1.0),
                RealLink::new(11, 2, 3, 1, 1, 1.0),
            ],
        )
        .unwrap();
        let mut vnet = VirtualNetwork::generate(&base, TimeSlices::default()).unwrap();
        vnet.load_demand_cells(vec![DemandCell::new(0, 1, 3, 10.0)])
            .unwrap();
        vnet
    }

    #[test]
    fn test_identical_flows_converge() {
        let mut vnet = network();
        let mut flows = vnet.take_flows();
        for link in 0..vnet.nb_virtual_links() {
            flows[0].add_auxiliary(link, 0, 10.0);
        }
        vnet.restore_flows(flows);
        vnet.combine_flows(1.0);
        // second iteration finds the same all-or-nothing flows
        let mut flows = vnet.take_flows();
        for link in 0..vnet.nb_virtual_links() {
            flows[0].add_auxiliary(link, 0, 10.0);
        }
        vnet.restore_flows(flows);
        vnet.combine_flows(0.5);
        assert_eq!(convergence_gap(&vnet), 0.0);
        assert!(stop_rule(&vnet, 2, 0.01));
        assert!(!stop_rule(&vnet, 1, 0.01));
    }

    #[test]
    fn test_gap_of_moved_flows() {
        let mut vnet = network();
        let mut flows = vnet.take_flows();
        flows[0].add_auxiliary(0, 0, 10.0);
        vnet.restore_flows(flows);
        vnet.combine_flows(1.0);
        let mut flows = vnet.take_flows();
        flows[0].add_auxiliary(0, 0, 20.0);
        vnet.restore_flows(flows);
        vnet.combine_flows(0.5);
        // one link went from 10 to 15
        assert!((convergence_gap(&vnet) - 5.0 / 15.0).abs() < 1e-12);
        assert!(!stop_rule(&vnet, 2, 0.01));
    }

    #[test]
    fn test_no_flow_is_ignored() {
        let vnet = network();
        assert_eq!(convergence_gap(&vnet), 0.0);
    }
}
